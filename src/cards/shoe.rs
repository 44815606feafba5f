use super::card::Card;
use super::source::Source;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// a multi-deck shoe dealt from the top and topped up once it runs low.
/// owned by a single simulation run, so its state carries across rounds.
pub struct Shoe {
    cards: Vec<Card>,
    decks: usize,
    cut: usize,
    rng: SmallRng,
}

impl Shoe {
    /// a shuffled shoe of `decks` decks, reshuffled below one deck
    pub fn new(decks: usize, rng: SmallRng) -> Self {
        let mut shoe = Self {
            cards: Vec::new(),
            decks: decks.max(1),
            cut: crate::RESHUFFLE_AT,
            rng,
        };
        shoe.refill();
        shoe
    }
    /// seeded for reproducible runs, or from entropy
    pub fn seeded(decks: usize, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(decks, SmallRng::seed_from_u64(seed)),
            None => Self::new(decks, SmallRng::from_entropy()),
        }
    }
    /// a shoe that deals exactly `cards` in order before falling back
    /// to fresh decks. never reshuffles early.
    pub fn stacked(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut cards = cards.into_iter().collect::<Vec<_>>();
        cards.reverse();
        Self {
            cards,
            decks: crate::SHOE_DECKS,
            cut: 0,
            rng: SmallRng::seed_from_u64(0),
        }
    }
    pub fn len(&self) -> usize {
        self.cards.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
    /// top up with a fresh composition below the cut.
    /// cards already dealt are gone; the leftovers are mixed back in.
    pub fn replenish(&mut self) -> bool {
        if self.cards.len() < self.cut {
            self.refill();
            true
        } else {
            false
        }
    }
    /// deal from the top. an empty shoe refills first, so this never fails.
    pub fn deal(&mut self) -> Card {
        loop {
            if let Some(card) = self.cards.pop() {
                return card;
            }
            self.refill();
        }
    }
    fn refill(&mut self) {
        log::trace!("reshuffling shoe with {} cards left", self.cards.len());
        self.cards.extend(Card::decks(self.decks));
        self.cards.shuffle(&mut self.rng);
    }
}

impl Source for Shoe {
    /// a shoe refills rather than running dry
    fn draw(&mut self) -> Option<Card> {
        Some(self.deal())
    }
}
