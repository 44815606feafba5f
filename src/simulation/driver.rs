use super::tally::Tally;
use crate::cards::shoe::Shoe;
use crate::gameplay::round::Round;
use crate::gameplay::strategy::Strategy;
use crate::table::Mask;
use crate::table::PayoutTable;
use indicatif::ProgressBar;

/// a batch of rounds of one strategy against one table, dealt from
/// a single shoe that persists across the whole batch
pub struct Simulation<'a> {
    table: &'a PayoutTable,
    strategy: Strategy,
    rounds: usize,
    seed: Option<u64>,
    mask: Option<&'a Mask>,
    progress: Option<ProgressBar>,
}

impl<'a> Simulation<'a> {
    pub fn new(table: &'a PayoutTable, strategy: Strategy, rounds: usize) -> Self {
        Self {
            table,
            strategy,
            rounds,
            seed: None,
            mask: None,
            progress: None,
        }
    }
    /// seeded once at the start of the batch
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
    /// count cash-outs that land on masked cells
    pub fn mask(mut self, mask: &'a Mask) -> Self {
        self.mask = Some(mask);
        self
    }
    /// report on this bar, typically one of several in a MultiProgress
    pub fn progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }
    pub fn run(&self) -> Tally {
        let mut shoe = Shoe::seeded(crate::SHOE_DECKS, self.seed);
        let mut tally = Tally::default();
        for i in 1..=self.rounds {
            let settlement = Round::play(&mut shoe, self.table, self.strategy);
            tally.record(&settlement, self.mask);
            if i % crate::PROGRESS_CHUNK == 0 {
                if let Some(progress) = self.progress.as_ref() {
                    progress.inc(crate::PROGRESS_CHUNK as u64);
                }
                log::debug!(
                    "{:<32}{:<32}",
                    format!("strategy {} round {}", self.strategy, i),
                    format!("rtp {:.4}%", tally.rtp())
                );
            }
        }
        if let Some(progress) = self.progress.as_ref() {
            progress.finish();
        }
        tally
    }
}

/// rounds of one strategy against a table, reproducible given a seed
pub fn run(table: &PayoutTable, strategy: Strategy, rounds: usize, seed: Option<u64>) -> Tally {
    Simulation::new(table, strategy, rounds).seed(seed).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Bounds;

    fn table() -> PayoutTable {
        PayoutTable::estimated(Bounds::from((40.0, 177.0)))
    }

    #[test]
    fn same_seed_same_tally() {
        let ref table = table();
        for strategy in Strategy::all() {
            let a = run(table, strategy, 20_000, Some(7));
            let b = run(table, strategy, 20_000, Some(7));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn zero_rounds() {
        let tally = run(&table(), Strategy::Immediate, 0, Some(1));
        assert_eq!(tally.rounds, 0);
        assert_eq!(tally.rtp(), 0.0);
    }

    #[test]
    fn immediate_wagers_one_base_bet_per_round() {
        let tally = run(&table(), Strategy::Immediate, 10_000, Some(3));
        assert_eq!(tally.wagered, 10_000.0 * crate::BASE_BET);
    }

    #[test]
    fn split_wagers_more_on_pairs() {
        // equal-value starting pairs come up about 25 times in 169,
        // and each one doubles the wager of its round
        let tally = run(&table(), Strategy::Split, 10_000, Some(3));
        let bets = tally.wagered / crate::BASE_BET;
        assert!((11_300.0..11_700.0).contains(&bets), "{} base bets", bets);
    }

    #[test]
    fn rtp_moves_linearly_with_masked_cells() {
        // cash-out decisions never depend on prices, so a shared seed
        // deals the same cards and only masked prices change the return
        let ref base = table();
        let ref mask = Mask::shaped(|cell| cell.upcard == 10);
        let wide = Bounds::from((0.0, 1_000.0));
        let shifted = base.apply_mask_delta(mask, 12.0, wide);
        let before = Simulation::new(base, Strategy::Immediate, 50_000)
            .seed(Some(11))
            .mask(mask)
            .run();
        let after = run(&shifted, Strategy::Immediate, 50_000, Some(11));
        assert!(before.p_filled() > 0.0);
        let expected = before.rtp() + 12.0 * before.p_filled();
        assert!((after.rtp() - expected).abs() < 1e-6);
    }

    #[test]
    fn richer_table_pays_more() {
        let ref base = table();
        let richer = base.apply_uniform_scale(1.5, Bounds::from((0.0, 1_000.0)));
        let a = run(base, Strategy::Immediate, 50_000, Some(5));
        let b = run(&richer, Strategy::Immediate, 50_000, Some(5));
        assert!(b.rtp() > a.rtp());
    }
}
