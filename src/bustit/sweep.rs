use super::batch::BustSimulation;
use super::Model;
use crate::Percent;
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;
use serde::Serialize;
use std::ops::RangeInclusive;

/// one deck count's simulated RTP against the target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub decks: usize,
    pub rtp: Percent,
    pub deviation: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepOutcome {
    pub target: Percent,
    pub points: Vec<SweepPoint>,
    pub best: Option<SweepPoint>,
}

impl From<(Percent, Vec<SweepPoint>)> for SweepOutcome {
    /// closest to the target wins; the first of equals is kept
    fn from((target, points): (Percent, Vec<SweepPoint>)) -> Self {
        let best = points.iter().copied().fold(None, |best: Option<SweepPoint>, p| match best {
            Some(b) if b.deviation.abs() <= p.deviation.abs() => Some(b),
            _ => Some(p),
        });
        Self {
            target,
            points,
            best,
        }
    }
}

/// infer the effective shoe size of a published bust RTP by
/// simulating the finite model at every deck count in a range
pub struct DeckSweep {
    decks: RangeInclusive<usize>,
    hands: usize,
    seed: Option<u64>,
    target: Percent,
}

impl DeckSweep {
    pub fn new(decks: RangeInclusive<usize>, hands: usize, target: Percent) -> Self {
        Self {
            decks,
            hands,
            seed: None,
            target,
        }
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
    pub fn run(&self) -> SweepOutcome {
        let progress = crate::progress(self.decks.clone().count());
        let mut points = self
            .decks
            .clone()
            .into_par_iter()
            .filter(|decks| *decks > 0)
            .map(|decks| {
                let seed = self.seed.map(|s| s.wrapping_add((decks as u64) << 32));
                let rtp = BustSimulation::new(Model::Finite(decks), self.hands)
                    .seed(seed)
                    .run()
                    .rtp();
                progress.inc(1);
                log::info!(
                    "{:<32}{:<32}",
                    format!("swept       {} decks", decks),
                    format!("rtp {:.5}% ({:+.4})", rtp, rtp - self.target)
                );
                SweepPoint {
                    decks,
                    rtp,
                    deviation: rtp - self.target,
                }
            })
            .collect::<Vec<SweepPoint>>();
        progress.finish_and_clear();
        points.sort_by_key(|p| p.decks);
        SweepOutcome::from((self.target, points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(decks: usize, deviation: Percent) -> SweepPoint {
        SweepPoint {
            decks,
            rtp: 94.12 + deviation,
            deviation,
        }
    }

    #[test]
    fn best_is_closest_either_side() {
        let outcome = SweepOutcome::from((
            94.12,
            vec![point(1, -0.9), point(2, 0.05), point(3, -0.03), point(4, 0.4)],
        ));
        assert_eq!(outcome.best.map(|p| p.decks), Some(3));
    }

    #[test]
    fn first_of_equals_wins() {
        let outcome = SweepOutcome::from((94.12, vec![point(5, 0.1), point(6, -0.1)]));
        assert_eq!(outcome.best.map(|p| p.decks), Some(5));
    }

    #[test]
    fn empty_sweep_has_no_best() {
        assert_eq!(SweepOutcome::from((94.12, vec![])).best, None);
    }

    #[test]
    fn sweep_covers_range_in_order() {
        let outcome = DeckSweep::new(1..=3, 2_000, 94.12).seed(Some(1)).run();
        let decks = outcome.points.iter().map(|p| p.decks).collect::<Vec<_>>();
        assert_eq!(decks, vec![1, 2, 3]);
        assert!(outcome.best.is_some());
        assert!(outcome.points.iter().all(|p| (p.rtp - p.deviation - 94.12).abs() < 1e-9));
    }
}
