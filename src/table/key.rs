use crate::cards::hand::Hand;
use serde::Serialize;

/// which block of a cash-out table a row lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Hard,
    Soft,
    Split,
}

impl Category {
    pub const fn all() -> [Self; 3] {
        [Self::Hard, Self::Soft, Self::Split]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Hard => write!(f, "hard"),
            Self::Soft => write!(f, "soft"),
            Self::Split => write!(f, "split"),
        }
    }
}

/// a row of a cash-out table. hard and soft rows are keyed by
/// hand total, pair rows by the rank of the paired card so that
/// A,A and 6,6 never collide on 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RowKey {
    Hard(u8),
    Soft(u8),
    Pair(u8),
}

impl RowKey {
    /// the row a two-card hand cashes out from.
    /// block priority is pair, then soft, then hard.
    pub fn of(total: u8, soft: bool, pair: bool) -> Self {
        match (pair, soft) {
            (true, true) => Self::Pair(11),
            (true, false) => Self::Pair(total / 2),
            (false, true) => Self::Soft(total),
            (false, false) => Self::Hard(total),
        }
    }
    pub fn category(&self) -> Category {
        match self {
            Self::Hard(_) => Category::Hard,
            Self::Soft(_) => Category::Soft,
            Self::Pair(_) => Category::Split,
        }
    }
    /// recover a key from a row label within a block.
    /// hard and soft labels lead with their total ("17", "17 (A,6)");
    /// pair labels lead with the paired rank ("8,8", "A,A", "8").
    pub fn parse(category: Category, label: &str) -> Option<Self> {
        let label = label.trim();
        match category {
            Category::Hard => leading(label).map(Self::Hard),
            Category::Soft => leading(label)
                .or_else(|| label.strip_prefix("A,").and_then(leading).map(|n| n + 11))
                .map(Self::Soft),
            Category::Split => {
                let rank = label.split(',').next()?.trim();
                match rank {
                    "A" | "a" => Some(Self::Pair(11)),
                    _ => match rank.parse::<u8>().ok()? {
                        1 | 11 => Some(Self::Pair(11)),
                        n @ 2..=10 => Some(Self::Pair(n)),
                        _ => None,
                    },
                }
            }
        }
    }
    /// canonical label as written back to disk
    pub fn label(&self) -> String {
        match *self {
            Self::Hard(total) => total.to_string(),
            Self::Soft(12) => String::from("12 (A,A)"),
            Self::Soft(total) => format!("{} (A,{})", total, total.saturating_sub(11)),
            Self::Pair(11) => String::from("A,A"),
            Self::Pair(rank) => format!("{},{}", rank, rank),
        }
    }
}

impl From<&Hand> for RowKey {
    fn from(hand: &Hand) -> Self {
        let (total, soft) = hand.value();
        Self::of(total, soft, hand.is_pair())
    }
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.category(), self.label())
    }
}

/// one addressable cash-out amount: a row and a dealer upcard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    pub row: RowKey,
    pub upcard: u8,
}

impl From<(RowKey, u8)> for Cell {
    fn from((row, upcard): (RowKey, u8)) -> Self {
        Self { row, upcard }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} vs {}", self.row, self.upcard)
    }
}

/// dealer upcard named by a column header. anything mentioning
/// the Ace ("A", "A (11)") is 11, and 1 is accepted as an Ace.
pub fn column(header: &str) -> Option<u8> {
    let header = header.trim();
    if header.contains('A') {
        return Some(11);
    }
    match header.parse::<u8>().ok()? {
        1 | 11 => Some(11),
        n @ 2..=10 => Some(n),
        _ => None,
    }
}

/// header as written back to disk
pub fn heading(upcard: u8) -> String {
    match upcard {
        11 => String::from("A (11)"),
        n => n.to_string(),
    }
}

fn leading(label: &str) -> Option<u8> {
    let end = label
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(label.len());
    label[..end].parse().ok()
}
