use crate::gameplay::settlement::Settlement;
use crate::table::Mask;
use crate::Chips;
use crate::Percent;
use crate::Probability;
use serde::Serialize;

/// running totals of a batch of rounds. tallies of independent
/// batches merge by summation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Tally {
    pub rounds: usize,
    pub wagered: Chips,
    pub returned: Chips,
    /// cash-outs priced from a masked cell
    pub masked: usize,
}

impl Tally {
    pub fn record(&mut self, settlement: &Settlement, mask: Option<&Mask>) {
        self.rounds += 1;
        self.wagered += settlement.wagered;
        self.returned += settlement.returned;
        if let Some(mask) = mask {
            self.masked += settlement
                .cashouts
                .iter()
                .filter(|cell| mask.get(**cell).copied().unwrap_or(false))
                .count();
        }
    }
    /// percent of wagered chips paid back, 0 before anything is wagered
    pub fn rtp(&self) -> Percent {
        if self.wagered > 0.0 {
            100.0 * self.returned / self.wagered
        } else {
            0.0
        }
    }
    /// masked cash-outs per base bet wagered. the RTP moves by
    /// this much per chip added to every masked cell.
    pub fn p_filled(&self) -> Probability {
        if self.wagered > 0.0 {
            self.masked as f64 * crate::BASE_BET / self.wagered
        } else {
            0.0
        }
    }
}

impl std::ops::AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.rounds += other.rounds;
        self.wagered += other.wagered;
        self.returned += other.returned;
        self.masked += other.masked;
    }
}

impl std::iter::Sum for Tally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, t| {
            acc += t;
            acc
        })
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} rounds  wagered {:.0}  returned {:.2}  rtp {:.2}%",
            self.rounds,
            self.wagered,
            self.returned,
            self.rtp()
        )
    }
}
