use super::card::Card;
use rand::Rng;

/// anything cards can be drawn from, one at a time
pub trait Source {
    /// next card, or None once the source is exhausted
    fn draw(&mut self) -> Option<Card>;
}

/// infinite deck. every draw is an independent sample
/// from one deck's composition, so it never runs dry.
pub struct Infinite<R: Rng>(R);

impl<R: Rng> From<R> for Infinite<R> {
    fn from(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: Rng> Source for Infinite<R> {
    fn draw(&mut self) -> Option<Card> {
        Some(Card::sample(&mut self.0))
    }
}

/// a fresh draw without replacement from a full composition,
/// done lazily as a partial Fisher-Yates shuffle. the borrowed
/// cards are left permuted, which is harmless: each sample is
/// uniform over the composition whatever order it starts in.
pub struct Sample<'a, R: Rng> {
    cards: &'a mut [Card],
    rng: &'a mut R,
    next: usize,
}

impl<'a, R: Rng> Sample<'a, R> {
    pub fn new(cards: &'a mut [Card], rng: &'a mut R) -> Self {
        Self {
            cards,
            rng,
            next: 0,
        }
    }
}

impl<R: Rng> Source for Sample<'_, R> {
    fn draw(&mut self) -> Option<Card> {
        if self.next >= self.cards.len() {
            return None;
        }
        let j = self.rng.gen_range(self.next..self.cards.len());
        self.cards.swap(self.next, j);
        self.next += 1;
        Some(self.cards[self.next - 1])
    }
}
