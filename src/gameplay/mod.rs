pub mod dealer;
pub mod round;
pub mod settlement;
pub mod strategy;

pub use dealer::dealer_play;
pub use round::Round;
pub use settlement::Settlement;
pub use strategy::Strategy;
