pub mod bounds;
pub mod estimate;
pub mod grid;
pub mod key;
pub mod sheet;

pub use bounds::Bounds;
pub use estimate::estimate;
pub use grid::{Grid, Row};
pub use key::{Category, Cell, RowKey};
pub use sheet::{Mask, PayoutTable, Sheet};
