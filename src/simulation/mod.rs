pub mod driver;
pub mod tally;

pub use driver::{run, Simulation};
pub use tally::Tally;
