use super::bounds::Bounds;
use super::key::RowKey;
use super::sheet::PayoutTable;
use crate::Chips;

/// regression estimate of the cash-out for a player total against
/// a dealer upcard, per 100 wagered. cubic in both, fitted separately
/// for hard and soft hands. out of range inputs estimate to 0.
pub fn estimate(total: u8, upcard: u8, soft: bool) -> Chips {
    if !(4..=21).contains(&total) || !(2..=11).contains(&upcard) {
        return 0.0;
    }
    let p = total as f64;
    let d = upcard as f64;
    let raw = if soft {
        607.53 - 76.03 * p + 75.39 * d + 2.48 * p * p - 4.52 * p * d - 5.30 * d * d
            + 0.007 * p * p * p
            + 0.075 * p * p * d
            + 0.176 * p * d * d
            + 0.039 * d * d * d
    } else {
        -475.55 + 147.51 * p + 43.17 * d - 13.06 * p * p - 0.26 * p * d - 6.97 * d * d
            + 0.36 * p * p * p
            + 0.007 * p * p * d
            + 0.015 * p * d * d
            + 0.30 * d * d * d
    };
    raw.round_ties_even().max(0.0)
}

impl PayoutTable {
    /// a complete table from the regression, clamped into bounds.
    /// pairs read as their hard total, except A,A as soft 12.
    pub fn estimated(bounds: Bounds) -> Self {
        Self::shaped(|cell| {
            let value = match cell.row {
                RowKey::Hard(total) => estimate(total, cell.upcard, false),
                RowKey::Soft(total) => estimate(total, cell.upcard, true),
                RowKey::Pair(11) => estimate(12, cell.upcard, true),
                RowKey::Pair(rank) => estimate(rank * 2, cell.upcard, false),
            };
            bounds.clamp(value)
        })
    }
}
