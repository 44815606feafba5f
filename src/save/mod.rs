pub mod backup;
pub mod disk;
pub mod reader;
pub mod writer;

pub use backup::backup;
pub use disk::Disk;
