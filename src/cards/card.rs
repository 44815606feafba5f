use crate::Arbitrary;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// a card as blackjack scores it. face cards collapse to 10
/// and an Ace is carried at 11, to be softened by the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card(u8);

impl Card {
    pub const ACE: Self = Self(11);
    pub const TEN: Self = Self(10);

    /// one suit of values. a deck is four of these.
    pub const SUIT: [Self; 13] = [
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
        Self(9),
        Self(10),
        Self(10),
        Self(10),
        Self(10),
        Self(11),
    ];

    pub const fn value(&self) -> u8 {
        self.0
    }
    pub const fn is_ace(&self) -> bool {
        self.0 == 11
    }
    /// one draw with replacement from a single deck.
    /// every value appears four times per deck, so uniform over the suit.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self::SUIT[rng.gen_range(0..Self::SUIT.len())]
    }
    /// unshuffled composition of n full decks
    pub fn decks(n: usize) -> Vec<Self> {
        Self::SUIT
            .iter()
            .copied()
            .cycle()
            .take(Self::SUIT.len() * 4 * n)
            .collect()
    }
}

impl TryFrom<u8> for Card {
    type Error = crate::Error;
    /// 1 is accepted as an alias for the Ace
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 | 11 => Ok(Self::ACE),
            2..=10 => Ok(Self(value)),
            _ => Err(crate::Error::Card(value)),
        }
    }
}

#[cfg(test)]
impl Card {
    /// shorthand for stacking shoes and hands in tests
    pub(crate) fn of(value: u8) -> Self {
        Self::try_from(value).expect("card value in 1..=11")
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.0 {
            11 => write!(f, "A"),
            n => write!(f, "{}", n),
        }
    }
}

impl Arbitrary for Card {
    fn random() -> Self {
        Self::sample(&mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_composition() {
        let deck = Card::decks(1);
        assert_eq!(deck.len(), 52);
        assert_eq!(deck.iter().filter(|c| c.value() == 10).count(), 16);
        assert_eq!(deck.iter().filter(|c| c.is_ace()).count(), 4);
        assert_eq!(deck.iter().map(|c| c.value() as u32).sum::<u32>(), 380);
    }

    #[test]
    fn shoe_composition_scales() {
        let shoe = Card::decks(8);
        assert_eq!(shoe.len(), 416);
        assert_eq!(shoe.iter().filter(|c| c.is_ace()).count(), 32);
    }

    #[test]
    fn ace_aliases() {
        assert_eq!(Card::try_from(1).ok(), Some(Card::ACE));
        assert_eq!(Card::try_from(11).ok(), Some(Card::ACE));
        assert_eq!(Card::ACE.to_string(), "A");
        assert_eq!(Card::of(7).to_string(), "7");
    }

    #[test]
    fn rejects_values_outside_the_deck() {
        assert!(matches!(Card::try_from(12), Err(crate::Error::Card(12))));
        assert!(matches!(Card::try_from(0), Err(crate::Error::Card(0))));
        assert!((2..=10).all(|v| Card::try_from(v).is_ok_and(|c| c.value() == v)));
    }

    #[test]
    fn sampled_cards_are_legal() {
        for _ in 0..1_000 {
            let card = Card::random();
            assert!((2..=11).contains(&card.value()));
        }
    }
}
