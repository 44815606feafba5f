use super::scale::Candidate;
use crate::Percent;
use serde::Deserialize;
use serde::Serialize;

/// how to pick between two candidates whose errors are
/// within the tie epsilon of each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
pub enum TieBreak {
    /// prefer the candidate at or below target
    #[default]
    Conservative,
    /// prefer the smaller error, whichever side it falls on
    Nearest,
}

impl TieBreak {
    /// should `challenger` replace `incumbent` as the best candidate
    pub fn prefers(&self, challenger: &Candidate, incumbent: &Candidate, epsilon: Percent) -> bool {
        let a = challenger.error.abs();
        let b = incumbent.error.abs();
        if (a - b).abs() > epsilon {
            return a < b;
        }
        match self {
            Self::Nearest => a < b,
            Self::Conservative => match (challenger.is_under(), incumbent.is_under()) {
                (true, false) => true,
                (false, true) => false,
                _ => a < b,
            },
        }
    }
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Conservative => write!(f, "conservative"),
            Self::Nearest => write!(f, "nearest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(scale: f64, rtp: Percent) -> Candidate {
        Candidate::from((scale, rtp, 96.8))
    }

    #[test]
    fn clear_winner_ignores_policy() {
        let near = candidate(1.0, 96.9);
        let far = candidate(0.9, 96.0);
        for policy in [TieBreak::Conservative, TieBreak::Nearest] {
            assert!(policy.prefers(&near, &far, 0.01));
            assert!(!policy.prefers(&far, &near, 0.01));
        }
    }

    #[test]
    fn conservative_prefers_under_target_on_ties() {
        let over = candidate(1.01, 96.805);
        let under = candidate(0.99, 96.79);
        assert!(TieBreak::Conservative.prefers(&under, &over, 0.01));
        assert!(!TieBreak::Conservative.prefers(&over, &under, 0.01));
    }

    #[test]
    fn nearest_takes_smaller_error_on_ties() {
        let over = candidate(1.01, 96.805);
        let under = candidate(0.99, 96.79);
        assert!(TieBreak::Nearest.prefers(&over, &under, 0.01));
        assert!(!TieBreak::Nearest.prefers(&under, &over, 0.01));
    }

    #[test]
    fn default_is_conservative() {
        assert_eq!(TieBreak::default(), TieBreak::Conservative);
    }
}
