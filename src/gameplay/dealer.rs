use crate::cards::hand::Hand;
use crate::cards::source::Source;

/// dealer draws to 17 and stands on soft 17.
/// stops early only if the source runs out.
pub fn dealer_play<S: Source>(source: &mut S, dealer: &mut Hand) -> u8 {
    loop {
        let total = dealer.total();
        if total >= crate::DEALER_STAND {
            return total;
        }
        match source.draw() {
            Some(card) => dealer.push(card),
            None => return total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;
    use crate::cards::source::Infinite;
    use crate::cards::source::Sample;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn stands_on_soft_17() {
        let mut source = Infinite::from(SmallRng::seed_from_u64(0));
        let mut dealer = Hand::from([11, 6]);
        assert_eq!(dealer_play(&mut source, &mut dealer), 17);
        assert_eq!(dealer.len(), 2);
    }

    #[test]
    fn always_reaches_17() {
        let mut source = Infinite::from(SmallRng::seed_from_u64(1));
        for _ in 0..10_000 {
            let mut dealer = Hand::empty();
            let total = dealer_play(&mut source, &mut dealer);
            assert!(total >= 17, "{}", dealer);
            assert_eq!(total, dealer.total());
        }
    }

    #[test]
    fn stops_when_source_runs_out() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        let mut cards = [2, 2, 3].map(Card::of);
        let mut source = Sample::new(&mut cards, rng);
        let mut dealer = Hand::from([2]);
        assert_eq!(dealer_play(&mut source, &mut dealer), 9);
        assert_eq!(dealer.len(), 4);
    }
}
