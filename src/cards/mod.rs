pub mod card;
pub mod hand;
pub mod shoe;
pub mod source;

pub use card::Card;
pub use hand::{hand_value, Hand};
pub use shoe::Shoe;
pub use source::{Infinite, Sample, Source};
