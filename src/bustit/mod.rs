pub mod batch;
pub mod exact;
pub mod sweep;

pub use batch::{BustSimulation, BustTally};
pub use exact::Exact;
pub use sweep::{DeckSweep, SweepOutcome, SweepPoint};

use crate::cards::hand::hand_value;
use crate::cards::source::Source;
use serde::Serialize;
use smallvec::SmallVec;

/// bust side bet pays by the number of cards in the busted hand.
/// eight or more cards all pay the top multiplier.
pub const PAYOUTS: [(usize, f64); 6] = [
    (3, 1.0),
    (4, 2.0),
    (5, 9.0),
    (6, 50.0),
    (7, 100.0),
    (8, 250.0),
];

/// multiplier for a bust on `cards` cards. two cards can never bust.
pub fn multiplier(cards: usize) -> f64 {
    let cards = cards.min(crate::BUST_CAP);
    PAYOUTS
        .iter()
        .find(|(n, _)| *n == cards)
        .map(|(_, m)| *m)
        .unwrap_or(0.0)
}

/// chips returned per chip staked: stake plus winnings on a bust, else nothing
pub fn payout(bust: Option<usize>) -> f64 {
    bust.map(|cards| 1.0 + multiplier(cards)).unwrap_or(0.0)
}

/// deal a dealer hand from nothing, drawing to 17 and standing on
/// soft 17. the card count if it busts, capped at the "8 or more" bucket.
/// a hand that stands, or that outlasts the draw limit or the source, is None.
pub fn bust_count<S: Source>(source: &mut S) -> Option<usize> {
    let mut cards = SmallVec::<[_; 12]>::new();
    while cards.len() < crate::BUST_MAX_CARDS {
        cards.push(source.draw()?);
        let (total, _) = hand_value(&cards);
        if total > 21 {
            return Some(cards.len().min(crate::BUST_CAP));
        }
        if total >= crate::BUST_STAND {
            return None;
        }
    }
    None
}

/// how the dealer's cards are drawn for each side bet hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Model {
    /// a fresh sample without replacement from this many full decks
    Finite(usize),
    /// independent draws from one deck's composition
    Infinite,
}

impl From<Option<usize>> for Model {
    fn from(decks: Option<usize>) -> Self {
        match decks {
            Some(n) => Self::Finite(n.max(1)),
            None => Self::Infinite,
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Finite(1) => write!(f, "1 deck"),
            Self::Finite(n) => write!(f, "{} decks", n),
            Self::Infinite => write!(f, "infinite deck"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;
    use crate::cards::shoe::Shoe;

    fn stacked(values: &[u8]) -> Shoe {
        Shoe::stacked(values.iter().map(|v| Card::of(*v)))
    }

    #[test]
    fn three_card_bust_returns_two() {
        // 10,10 stands on 20 before a third card is drawn
        let bust = bust_count(&mut stacked(&[10, 10, 5]));
        assert_eq!(bust, None);
        let bust = bust_count(&mut stacked(&[10, 5, 10]));
        assert_eq!(bust, Some(3));
        assert_eq!(payout(bust), 2.0);
    }

    #[test]
    fn stands_on_soft_17() {
        assert_eq!(bust_count(&mut stacked(&[11, 6, 10])), None);
    }

    #[test]
    fn aces_soften_before_busting() {
        // A,5 soft 16, 10 makes hard 16, 10 busts on four cards
        let bust = bust_count(&mut stacked(&[11, 5, 10, 10]));
        assert_eq!(bust, Some(4));
        assert_eq!(payout(bust), 3.0);
    }

    #[test]
    fn long_busts_cap_at_eight() {
        let bust = bust_count(&mut stacked(&[2, 2, 2, 2, 2, 2, 3, 10]));
        assert_eq!(bust, Some(8));
        assert_eq!(payout(bust), 251.0);
        assert_eq!(multiplier(9), 250.0);
    }

    #[test]
    fn no_bust_no_return() {
        assert_eq!(payout(None), 0.0);
        assert_eq!(multiplier(2), 0.0);
    }
}
