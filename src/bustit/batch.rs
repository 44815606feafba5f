use super::bust_count;
use super::payout;
use super::Model;
use crate::cards::card::Card;
use crate::cards::source::Infinite;
use crate::cards::source::Sample;
use crate::Percent;
use crate::Probability;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;
use serde::Serialize;

/// outcomes of a batch of side bet hands, by bust card count
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BustTally {
    pub hands: u64,
    /// indexed by card count, 3 through the capped bucket
    pub busts: [u64; crate::BUST_CAP + 1],
    pub returned: f64,
}

impl BustTally {
    pub fn record(&mut self, bust: Option<usize>) {
        self.hands += 1;
        if let Some(cards) = bust {
            self.busts[cards] += 1;
        }
        self.returned += payout(bust);
    }
    pub fn rtp(&self) -> Percent {
        if self.hands > 0 {
            100.0 * self.returned / self.hands as f64
        } else {
            0.0
        }
    }
    pub fn probability(&self, cards: usize) -> Probability {
        if self.hands > 0 {
            self.busts.get(cards).copied().unwrap_or(0) as f64 / self.hands as f64
        } else {
            0.0
        }
    }
    /// bust probability per card count label, "8+" for the capped bucket
    pub fn histogram(&self) -> Vec<(String, Probability)> {
        (3..=crate::BUST_CAP)
            .map(|cards| (label(cards), self.probability(cards)))
            .collect()
    }
}

pub fn label(cards: usize) -> String {
    if cards >= crate::BUST_CAP {
        format!("{}+", crate::BUST_CAP)
    } else {
        cards.to_string()
    }
}

impl std::ops::AddAssign for BustTally {
    fn add_assign(&mut self, other: Self) {
        self.hands += other.hands;
        self.returned += other.returned;
        for (mine, theirs) in self.busts.iter_mut().zip(other.busts) {
            *mine += theirs;
        }
    }
}

impl std::iter::Sum for BustTally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, t| {
            acc += t;
            acc
        })
    }
}

/// side bet hands split into fixed chunks run across the rayon pool.
/// each chunk draws from its own generator, seeded from the batch seed
/// and the chunk index, so a seeded batch gives the same tally on any machine.
pub struct BustSimulation {
    model: Model,
    hands: usize,
    seed: Option<u64>,
    verbose: bool,
}

impl BustSimulation {
    pub fn new(model: Model, hands: usize) -> Self {
        Self {
            model,
            hands,
            seed: None,
            verbose: false,
        }
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
    pub fn run(&self) -> BustTally {
        log::info!("{:<32}{:<32}", "simulating  bust side bet", self.model);
        let chunk = crate::PROGRESS_CHUNK;
        let chunks = (self.hands + chunk - 1) / chunk;
        let progress = self.verbose.then(|| crate::progress(self.hands));
        let tally = (0..chunks)
            .into_par_iter()
            .map(|i| {
                let hands = chunk.min(self.hands - i * chunk);
                let tally = self.chunk(i as u64, hands);
                if let Some(progress) = progress.as_ref() {
                    progress.inc(hands as u64);
                }
                log::debug!(
                    "{:<32}{:<32}",
                    format!("chunk {} of {}", i + 1, chunks),
                    format!("rtp {:.4}%", tally.rtp())
                );
                tally
            })
            .sum::<BustTally>();
        if let Some(progress) = progress {
            progress.finish_and_clear();
        }
        tally
    }
    fn chunk(&self, index: u64, hands: usize) -> BustTally {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(index)),
            None => SmallRng::from_entropy(),
        };
        let mut tally = BustTally::default();
        match self.model {
            Model::Infinite => {
                let mut source = Infinite::from(rng);
                for _ in 0..hands {
                    tally.record(bust_count(&mut source));
                }
            }
            Model::Finite(decks) => {
                let mut cards = Card::decks(decks);
                for _ in 0..hands {
                    let mut source = Sample::new(&mut cards, &mut rng);
                    tally.record(bust_count(&mut source));
                }
            }
        }
        tally
    }
}
