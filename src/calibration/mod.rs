pub mod delta;
pub mod policy;
pub mod scale;

pub use delta::{direct_delta, DeltaOutcome, DeltaSearch, Leverage};
pub use policy::TieBreak;
pub use scale::{Bisection, Candidate, ScaleOutcome, Search, Verification};

use crate::gameplay::strategy::Strategy;
use crate::simulation::driver::Simulation;
use crate::simulation::tally::Tally;
use crate::table::Bounds;
use crate::table::Mask;
use crate::table::PayoutTable;
use crate::Percent;
use serde::Serialize;

/// what a calibration aims for and how each candidate table is measured.
/// every measurement replays the same seed, so candidates see the same
/// cards and differ only by their prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calibration {
    pub target: Percent,
    pub rounds: usize,
    pub seed: u64,
    pub bounds: Bounds,
}

impl Calibration {
    /// strategy A against `table`, counting masked cash-outs if asked
    pub fn measure(&self, table: &PayoutTable, mask: Option<&Mask>) -> Tally {
        let simulation = Simulation::new(table, Strategy::Immediate, self.rounds).seed(Some(self.seed));
        match mask {
            Some(mask) => simulation.mask(mask).run(),
            None => simulation.run(),
        }
    }
    /// same target and bounds, a different sample
    pub fn resampled(&self, seed: u64, rounds: usize) -> Self {
        Self {
            seed,
            rounds,
            ..*self
        }
    }
}
