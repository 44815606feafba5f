use super::Calibration;
use crate::simulation::tally::Tally;
use crate::table::Mask;
use crate::table::PayoutTable;
use crate::Chips;
use crate::Percent;
use crate::Probability;
use serde::Serialize;

/// one-shot delta for the masked cells. each chip added to every masked
/// cell moves the RTP by `p_filled` points, so the gap to target divided
/// by `p_filled` closes it, before clamping distorts the response.
/// None when masked cells are hit too rarely to steer the RTP.
pub fn direct_delta(target: Percent, current: Percent, p_filled: Probability) -> Option<Chips> {
    shifted(0.0, target, current, p_filled)
}

fn shifted(delta: Chips, target: Percent, current: Percent, p_filled: Probability) -> Option<Chips> {
    if p_filled < crate::MIN_LEVERAGE {
        None
    } else {
        Some((delta + (target - current) / p_filled).clamp(crate::DELTA_MIN, crate::DELTA_MAX))
    }
}

/// whether the masked cells carried enough of the return to be steered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Leverage {
    Sufficient,
    Insufficient,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaOutcome {
    pub target: Percent,
    pub masked: usize,
    pub before: Tally,
    pub after: Tally,
    pub p_filled: Probability,
    pub delta: Chips,
    pub steps: usize,
    pub leverage: Leverage,
}

/// calibrate only the cells the observed table left unknown, by a
/// common additive delta. the one-shot estimate is exact until clamping
/// bites; optional refinement steps re-measure and re-apply the formula.
pub struct DeltaSearch<'a> {
    calibration: Calibration,
    table: &'a PayoutTable,
    mask: &'a Mask,
    refine: usize,
}

impl<'a> DeltaSearch<'a> {
    pub fn new(calibration: Calibration, table: &'a PayoutTable, mask: &'a Mask) -> Self {
        Self {
            calibration,
            table,
            mask,
            refine: 0,
        }
    }
    pub fn refine(mut self, steps: usize) -> Self {
        self.refine = steps;
        self
    }
    pub fn run(&self) -> (PayoutTable, DeltaOutcome) {
        let ref calibration = self.calibration;
        log::info!(
            "{:<32}{:<32}",
            "calibrating masked cells",
            format!("{} cells toward {:.2}%", self.mask.count(), calibration.target)
        );
        let before = calibration.measure(self.table, Some(self.mask));
        log::info!(
            "{:<32}{:<32}",
            format!("current     rtp {:.4}%", before.rtp()),
            format!("p_filled {:.4}", before.p_filled())
        );
        let mut table = self.table.clone();
        let mut after = before;
        let mut delta = 0.0;
        let mut steps = 0;
        let mut leverage = Leverage::Sufficient;
        for step in 0..=self.refine {
            match shifted(delta, calibration.target, after.rtp(), after.p_filled()) {
                None => {
                    log::warn!(
                        "masked cells are hit on {:.4}% of wagers, too rarely to reach {:.2}%; delta stays {:.2}",
                        100.0 * after.p_filled(),
                        calibration.target,
                        delta
                    );
                    if step == 0 {
                        leverage = Leverage::Insufficient;
                        table = self.table.apply_mask_delta(self.mask, delta, calibration.bounds);
                        after = calibration.measure(&table, Some(self.mask));
                    }
                    break;
                }
                Some(next) => {
                    delta = next;
                    table = self.table.apply_mask_delta(self.mask, delta, calibration.bounds);
                    after = calibration.measure(&table, Some(self.mask));
                    steps += 1;
                    log::info!(
                        "{:<32}{:<32}",
                        format!("step {:<7} delta {:.2}", step, delta),
                        format!("rtp {:.4}%", after.rtp())
                    );
                }
            }
        }
        let outcome = DeltaOutcome {
            target: calibration.target,
            masked: self.mask.count(),
            before,
            after,
            p_filled: before.p_filled(),
            delta,
            steps,
            leverage,
        };
        (table, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Bounds;
    use crate::table::Cell;
    use crate::table::RowKey;

    #[test]
    fn one_shot_formula() {
        let delta = direct_delta(96.8, 94.0, 0.10).unwrap();
        assert!((delta - 28.0).abs() < 1e-9);
    }

    #[test]
    fn one_shot_clamps() {
        assert_eq!(direct_delta(96.8, 90.0, 0.05), Some(80.0));
        assert_eq!(direct_delta(96.8, 98.0, 0.10), Some(0.0));
    }

    #[test]
    fn too_little_leverage() {
        assert_eq!(direct_delta(96.8, 94.0, 0.004), None);
        assert!(direct_delta(96.8, 94.0, 0.005).is_some());
    }

    fn calibration(target: Percent) -> Calibration {
        Calibration {
            target,
            rounds: 20_000,
            seed: crate::CALIBRATION_SEED,
            bounds: Bounds::from(crate::DELTA_CLAMP),
        }
    }

    #[test]
    fn reaches_a_reachable_target() {
        // prices inside the clamp everywhere, so the response stays linear
        let table = PayoutTable::shaped(|_| 80.0);
        let mask = Mask::shaped(|cell| matches!(cell.row, RowKey::Hard(_)));
        let current = calibration(0.0).measure(&table, Some(&mask));
        let target = current.rtp() + 10.0 * current.p_filled();
        let (calibrated, outcome) = DeltaSearch::new(calibration(target), &table, &mask).run();
        assert_eq!(outcome.leverage, Leverage::Sufficient);
        assert!((outcome.delta - 10.0).abs() < 1e-6);
        assert!((outcome.after.rtp() - target).abs() < 1e-6);
        assert_eq!(calibrated.unknowns(), 0);
        for (cell, value) in calibrated.cells() {
            let expected = if mask.get(cell) == Some(&true) { 90.0 } else { 80.0 };
            assert!((value - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn unmasked_table_is_left_alone() {
        let table = PayoutTable::shaped(|_| 80.0);
        let mask = Mask::shaped(|_| false);
        let (calibrated, outcome) = DeltaSearch::new(calibration(96.8), &table, &mask).run();
        assert_eq!(outcome.leverage, Leverage::Insufficient);
        assert_eq!(outcome.delta, 0.0);
        assert_eq!(outcome.steps, 0);
        assert_eq!(calibrated, table);
    }

    #[test]
    fn rarely_hit_cells_are_still_clamped() {
        // hard 5 against a 2 is dealt about once in a thousand rounds
        let table = PayoutTable::shaped(|_| 10.0);
        let rare = Cell::from((RowKey::Hard(5), 2));
        let mask = Mask::shaped(|cell| cell == rare);
        let (calibrated, outcome) = DeltaSearch::new(calibration(96.8), &table, &mask).run();
        assert_eq!(outcome.leverage, Leverage::Insufficient);
        assert_eq!(outcome.delta, 0.0);
        assert_eq!(calibrated.get(rare), Some(&crate::DELTA_CLAMP.0));
        assert_eq!(calibrated.get(Cell::from((RowKey::Hard(5), 3))), Some(&10.0));
    }

    #[test]
    fn refinement_recovers_clamped_response() {
        // masked cells start near the upper clamp, so the one-shot
        // estimate undershoots and refinement pushes further
        let table = PayoutTable::shaped(|cell| if cell.upcard == 11 { 195.0 } else { 100.0 });
        let mask = Mask::shaped(|_| true);
        let current = calibration(0.0).measure(&table, Some(&mask));
        let target = current.rtp() + 8.0 * current.p_filled();
        let (_, once) = DeltaSearch::new(calibration(target), &table, &mask).run();
        let (_, refined) = DeltaSearch::new(calibration(target), &table, &mask)
            .refine(3)
            .run();
        assert!(once.after.rtp() < target);
        assert!(refined.delta > once.delta);
        assert!((refined.after.rtp() - target).abs() < (once.after.rtp() - target).abs());
        assert!(refined.delta <= crate::DELTA_MAX);
    }
}
