use super::payout;
use crate::cards::card::Card;
use crate::Percent;
use crate::Probability;
use serde::Serialize;

/// exact bust distribution of the infinite-deck model.
///
/// a dealer hand below 17 is fully described by its total and whether
/// an Ace still counts 11, so the chance of every (total, soft) state
/// after k cards is propagated one card at a time until every path
/// has either stood or busted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exact {
    /// bust probability by card count, capped bucket last
    pub busts: [Probability; crate::BUST_CAP + 1],
    pub rtp: Percent,
    /// variance of the per-hand return, in stakes squared
    pub variance: f64,
}

impl Exact {
    pub fn infinite() -> Self {
        let ref draws = Self::draws();
        // live[total][soft] for hands still drawing
        let mut live = [[0.0; 2]; 17];
        live[0][0] = 1.0;
        let mut busts = [0.0; crate::BUST_CAP + 1];
        for k in 1..=crate::BUST_MAX_CARDS {
            let mut next = [[0.0; 2]; 17];
            for total in 0..17 {
                for soft in [false, true] {
                    let p = live[total][soft as usize];
                    if p == 0.0 {
                        continue;
                    }
                    for (value, q) in draws {
                        let (total, soft) = Self::add(total as u8, soft, *value);
                        if total > 21 {
                            busts[k.min(crate::BUST_CAP)] += p * q;
                        } else if total < crate::BUST_STAND {
                            next[total as usize][soft as usize] += p * q;
                        }
                    }
                }
            }
            live = next;
        }
        let mean = (0..busts.len())
            .map(|k| busts[k] * payout(Some(k)))
            .sum::<f64>();
        let square = (0..busts.len())
            .map(|k| busts[k] * payout(Some(k)).powi(2))
            .sum::<f64>();
        log::debug!("{:<32}{:<32}", "exact       infinite deck", format!("rtp {:.5}%", 100.0 * mean));
        Self {
            busts,
            rtp: 100.0 * mean,
            variance: square - mean * mean,
        }
    }
    pub fn probability(&self, cards: usize) -> Probability {
        self.busts.get(cards).copied().unwrap_or(0.0)
    }
    /// distinct card values and their chance of being drawn
    fn draws() -> Vec<(u8, Probability)> {
        let n = Card::SUIT.len() as f64;
        let mut draws = Vec::<(u8, Probability)>::new();
        for card in Card::SUIT {
            match draws.iter_mut().find(|(v, _)| *v == card.value()) {
                Some((_, q)) => *q += 1.0 / n,
                None => draws.push((card.value(), 1.0 / n)),
            }
        }
        draws
    }
    /// one more card on a (total, soft) hand. at most one Ace is ever
    /// high in a live hand, so the soft flag stands in for the count.
    fn add(total: u8, soft: bool, value: u8) -> (u8, bool) {
        let mut total = total + value;
        let mut high = soft as u8 + (value == 11) as u8;
        while total > 21 && high > 0 {
            total -= 10;
            high -= 1;
        }
        (total, high > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::hand::hand_value;
    use crate::cards::hand::Hand;
    use crate::Arbitrary;

    #[test]
    fn infinite_deck_rtp() {
        let exact = Exact::infinite();
        assert!((exact.rtp - 94.25229).abs() < 1e-4, "{}", exact.rtp);
        assert!((exact.probability(3) - 0.172963).abs() < 1e-6);
        assert!((exact.variance - 11.32302).abs() < 1e-4);
    }

    #[test]
    fn busts_need_three_cards() {
        let exact = Exact::infinite();
        assert_eq!(exact.probability(1), 0.0);
        assert_eq!(exact.probability(2), 0.0);
        assert!(exact.busts.iter().all(|p| *p >= 0.0));
        assert!(exact.busts.iter().sum::<f64>() < 1.0);
    }

    #[test]
    fn draws_follow_one_deck() {
        let draws = Exact::draws();
        assert_eq!(draws.len(), 10);
        assert!((draws.iter().map(|(_, q)| q).sum::<f64>() - 1.0).abs() < 1e-12);
        let tens = draws.iter().find(|(v, _)| *v == 10).map(|(_, q)| *q);
        assert!((tens.unwrap_or(0.0) - 4.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn incremental_total_matches_hand_value() {
        for _ in 0..10_000 {
            let hand = Hand::random();
            let mut state = (0, false);
            for card in hand.cards() {
                if state.0 > 21 {
                    break;
                }
                state = Exact::add(state.0, state.1, card.value());
            }
            let prefix = hand
                .cards()
                .iter()
                .scan(Vec::new(), |seen, c| {
                    seen.push(*c);
                    Some(hand_value(&seen[..]))
                })
                .find(|(t, _)| *t > 21)
                .unwrap_or_else(|| hand.value());
            assert_eq!(state, prefix, "{}", hand);
        }
    }
}
