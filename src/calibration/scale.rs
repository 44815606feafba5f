use super::policy::TieBreak;
use super::Calibration;
use crate::table::PayoutTable;
use crate::Percent;
use serde::Serialize;

/// where a bisection stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Search {
    Evaluating,
    /// a candidate landed within tolerance
    Converged,
    /// iterations ran out first; the best candidate is still returned
    Exhausted,
    /// a candidate measured no return at all
    Degenerate,
}

/// one uniform scale and the RTP it measured
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub scale: f64,
    pub rtp: Percent,
    /// target minus measured
    pub error: Percent,
}

impl Candidate {
    pub fn is_under(&self) -> bool {
        self.error >= 0.0
    }
}

impl From<(f64, Percent, Percent)> for Candidate {
    fn from((scale, rtp, target): (f64, Percent, Percent)) -> Self {
        Self {
            scale,
            rtp,
            error: target - rtp,
        }
    }
}

/// the winner re-measured on a fresh seed and a larger sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verification {
    pub seed: u64,
    pub rounds: usize,
    pub rtp: Percent,
    /// one rescale applied when the check ran hot, with its re-verified RTP
    pub corrected: Option<Candidate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleOutcome {
    pub target: Percent,
    pub current: Percent,
    pub state: Search,
    pub candidates: Vec<Candidate>,
    pub best: Option<Candidate>,
    pub verification: Option<Verification>,
    /// the scale the returned table was built with
    pub scale: f64,
}

/// rescale every cell of a table by one factor, searching the factor by
/// bisection. candidates are always built from the base table, never from
/// each other, so rounding and clamping do not compound.
pub struct Bisection<'a> {
    calibration: Calibration,
    table: &'a PayoutTable,
    tolerance: Percent,
    iterations: usize,
    tie_break: TieBreak,
    verify: Option<usize>,
}

impl<'a> Bisection<'a> {
    pub fn new(calibration: Calibration, table: &'a PayoutTable) -> Self {
        Self {
            calibration,
            table,
            tolerance: crate::RTP_TOLERANCE,
            iterations: crate::MAX_SCALE_ITERATIONS,
            tie_break: TieBreak::default(),
            verify: None,
        }
    }
    pub fn tolerance(mut self, tolerance: Percent) -> Self {
        self.tolerance = tolerance;
        self
    }
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
    /// re-check the winner with this many rounds on another seed
    pub fn verify(mut self, rounds: Option<usize>) -> Self {
        self.verify = rounds;
        self
    }

    pub fn run(&self) -> (PayoutTable, ScaleOutcome) {
        let ref calibration = self.calibration;
        let current = calibration.measure(self.table, None).rtp();
        log::info!(
            "{:<32}{:<32}",
            format!("current     rtp {:.4}%", current),
            format!("target {:.2}%", calibration.target)
        );
        let (mut low, mut high) = crate::SCALE_BRACKET;
        let mut scale = self.initial(current);
        let mut state = Search::Evaluating;
        let mut best = None::<Candidate>;
        let mut candidates = Vec::new();
        for i in 0..self.iterations {
            let rtp = calibration.measure(&self.rescaled(scale), None).rtp();
            let candidate = Candidate::from((scale, rtp, calibration.target));
            log::debug!(
                "{:<32}{:<32}",
                format!("iteration {:<3} scale {:.5}", i + 1, scale),
                format!("rtp {:.4}% ({:+.4})", rtp, -candidate.error)
            );
            candidates.push(candidate);
            best = match best {
                Some(incumbent) if !self.tie_break.prefers(&candidate, &incumbent, crate::TIE_EPSILON) => {
                    Some(incumbent)
                }
                _ => Some(candidate),
            };
            if candidate.error.abs() <= self.tolerance {
                state = Search::Converged;
                break;
            }
            if rtp <= 0.0 {
                state = Search::Degenerate;
                break;
            }
            if rtp < calibration.target {
                low = scale;
            } else {
                high = scale;
            }
            scale = (low + high) / 2.0;
        }
        if state == Search::Evaluating {
            state = Search::Exhausted;
        }
        match state {
            Search::Converged => log::info!("converged after {} candidates", candidates.len()),
            Search::Exhausted => log::warn!("no candidate within {:.3} of target, keeping the best", self.tolerance),
            Search::Degenerate => log::warn!("a candidate returned nothing, stopping the search"),
            Search::Evaluating => {}
        }
        let mut scale = best.map(|b| b.scale).unwrap_or(1.0);
        let verification = match (best, self.verify) {
            (Some(winner), Some(rounds)) => {
                let verification = self.verification(&winner, rounds);
                if let Some(corrected) = verification.corrected {
                    scale = corrected.scale;
                }
                Some(verification)
            }
            _ => None,
        };
        let table = match best {
            Some(_) => self.rescaled(scale),
            None => self.table.clone(),
        };
        let outcome = ScaleOutcome {
            target: calibration.target,
            current,
            state,
            candidates,
            best,
            verification,
            scale,
        };
        (table, outcome)
    }

    /// the scale that would hit target if RTP were proportional to it
    fn initial(&self, current: Percent) -> f64 {
        let (low, high) = crate::SCALE_BRACKET;
        if current > 0.0 {
            (self.calibration.target / current).clamp(low, high)
        } else {
            high
        }
    }
    fn rescaled(&self, scale: f64) -> PayoutTable {
        self.table.apply_uniform_scale(scale, self.calibration.bounds)
    }
    /// if the fresh sample runs hotter than target by more than the
    /// margin, rescale once proportionally and measure again
    fn verification(&self, winner: &Candidate, rounds: usize) -> Verification {
        let seed = self.calibration.seed.wrapping_add(1);
        let check = self.calibration.resampled(seed, rounds);
        let rtp = check.measure(&self.rescaled(winner.scale), None).rtp();
        log::info!(
            "{:<32}{:<32}",
            format!("verified    scale {:.5}", winner.scale),
            format!("rtp {:.4}% over {} rounds", rtp, rounds)
        );
        let corrected = (rtp > check.target + crate::VERIFY_MARGIN).then(|| {
            let (low, high) = crate::SCALE_BRACKET;
            let scale = (winner.scale * check.target / rtp).clamp(low, high);
            let rtp = check.measure(&self.rescaled(scale), None).rtp();
            log::info!(
                "{:<32}{:<32}",
                format!("corrected   scale {:.5}", scale),
                format!("rtp {:.4}%", rtp)
            );
            Candidate::from((scale, rtp, check.target))
        });
        Verification {
            seed,
            rounds,
            rtp,
            corrected,
        }
    }
}
