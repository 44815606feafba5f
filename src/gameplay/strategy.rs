use serde::Deserialize;
use serde::Serialize;

/// fixed player policies a cash-out table is evaluated under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
pub enum Strategy {
    /// A: cash out at the first chance, pairs included
    Immediate,
    /// B: split pairs into two hands, then cash out each at the first chance
    Split,
}

impl Strategy {
    pub const fn all() -> [Self; 2] {
        [Self::Immediate, Self::Split]
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Immediate => write!(f, "A"),
            Self::Split => write!(f, "B"),
        }
    }
}
