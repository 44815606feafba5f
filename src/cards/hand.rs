use super::card::Card;
use crate::Arbitrary;
use smallvec::SmallVec;

/// total of a hand and whether an Ace is still counted high.
/// every Ace starts at 11; while the total busts and an Ace
/// is still high, one Ace drops to 1.
pub fn hand_value(cards: &[Card]) -> (u8, bool) {
    let mut total = cards.iter().map(|c| c.value() as u16).sum::<u16>();
    let mut aces = cards.iter().filter(|c| c.is_ace()).count();
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    let total = total.min(u8::MAX as u16) as u8;
    (total, aces > 0 && total <= 21)
}

/// cards held by the player or the dealer, in the order drawn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand(SmallVec<[Card; 8]>);

impl Hand {
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn first(&self) -> Option<Card> {
        self.0.first().copied()
    }
    pub fn value(&self) -> (u8, bool) {
        hand_value(&self.0)
    }
    pub fn total(&self) -> u8 {
        self.value().0
    }
    pub fn is_soft(&self) -> bool {
        self.value().1
    }
    pub fn is_bust(&self) -> bool {
        self.total() > 21
    }
    /// exactly two cards of equal value. 10 and K count as a pair.
    pub fn is_pair(&self) -> bool {
        self.0.len() == 2 && self.0[0] == self.0[1]
    }
    /// 21 on the first two cards
    pub fn is_natural(&self) -> bool {
        self.0.len() == 2 && self.total() == 21
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
impl<const N: usize> From<[u8; N]> for Hand {
    fn from(values: [u8; N]) -> Self {
        values.into_iter().map(Card::of).collect()
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = self
            .0
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let (total, soft) = self.value();
        let kind = if soft { "soft" } else { "hard" };
        write!(f, "[{}] {} {}", cards, kind, total)
    }
}

impl Arbitrary for Hand {
    /// two to six random cards
    fn random() -> Self {
        use rand::Rng;
        let n = rand::thread_rng().gen_range(2..=6);
        (0..n).map(|_| Card::random()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_total() {
        assert_eq!(Hand::from([2, 3]).value(), (5, false));
        assert_eq!(Hand::from([10, 10]).value(), (20, false));
    }

    #[test]
    fn ace_counts_high() {
        assert_eq!(Hand::from([11, 6]).value(), (17, true));
    }

    #[test]
    fn ace_softens_when_busting() {
        assert_eq!(Hand::from([11, 6, 9]).value(), (16, false));
    }

    #[test]
    fn multiple_aces_soften_one_at_a_time() {
        assert_eq!(Hand::from([11, 11]).value(), (12, true));
        assert_eq!(Hand::from([11, 11, 9]).value(), (21, true));
        assert_eq!(Hand::from([11, 11, 11, 11]).value(), (14, true));
        assert_eq!(Hand::from([11, 11, 10]).value(), (12, false));
    }

    #[test]
    fn bust_keeps_hard_total() {
        let hand = Hand::from([10, 10, 5]);
        assert_eq!(hand.value(), (25, false));
        assert!(hand.is_bust());
    }

    #[test]
    fn natural_needs_two_cards() {
        assert!(Hand::from([11, 10]).is_natural());
        assert!(!Hand::from([7, 7, 7]).is_natural());
        assert!(!Hand::from([10, 10]).is_natural());
    }

    #[test]
    fn pair_needs_two_equal_values() {
        assert!(Hand::from([8, 8]).is_pair());
        assert!(Hand::from([11, 11]).is_pair());
        assert!(!Hand::from([8, 9]).is_pair());
        assert!(!Hand::from([8, 8, 2]).is_pair());
    }

    #[test]
    fn softening_never_overshoots() {
        for _ in 0..10_000 {
            let hand = Hand::random();
            let (total, soft) = hand.value();
            let aces = hand.cards().iter().filter(|c| c.is_ace()).count() as u16;
            let low = hand.cards().iter().map(|c| c.value() as u16).sum::<u16>() - 10 * aces;
            // either every ace is already low, or the total fits
            assert!(total <= 21 || total as u16 == low, "{}", hand);
            // a soft total is exactly the all-low total plus ten
            if soft {
                assert_eq!(total as u16, low + 10, "{}", hand);
            }
        }
    }

    #[test]
    fn display() {
        assert_eq!(Hand::from([11, 6]).to_string(), "[A,6] soft 17");
    }
}
