use super::bounds::Bounds;
use super::grid::Grid;
use super::key::Category;
use super::key::Cell;
use super::key::RowKey;
use crate::cards::hand::Hand;
use crate::Arbitrary;
use crate::Chips;

/// the three blocks of a cash-out table, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet<T> {
    pub hard: Grid<T>,
    pub soft: Grid<T>,
    pub split: Grid<T>,
}

/// cash-out amounts per 100 wagered. NaN marks an unknown cell.
pub type PayoutTable = Sheet<f64>;

/// true where the observed table had no value
pub type Mask = Sheet<bool>;

impl<T> Sheet<T> {
    pub fn grid(&self, category: Category) -> &Grid<T> {
        match category {
            Category::Hard => &self.hard,
            Category::Soft => &self.soft,
            Category::Split => &self.split,
        }
    }
    pub fn grids(&self) -> [&Grid<T>; 3] {
        [&self.hard, &self.soft, &self.split]
    }
    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.grid(cell.row.category()).get(cell)
    }
    pub fn cells(&self) -> impl Iterator<Item = (Cell, &T)> + '_ {
        self.hard
            .cells()
            .chain(self.soft.cells())
            .chain(self.split.cells())
    }
    pub fn map<U, F>(&self, mut f: F) -> Sheet<U>
    where
        F: FnMut(Option<Cell>, &T) -> U,
    {
        Sheet {
            hard: self.hard.map(&mut f),
            soft: self.soft.map(&mut f),
            split: self.split.map(&mut f),
        }
    }
    /// the usual layout: hard 4 to 18, soft 12 to 20, every pair,
    /// against dealer upcards 2 to Ace
    pub fn shaped<F>(mut f: F) -> Self
    where
        F: FnMut(Cell) -> T,
        T: Clone,
    {
        let upcards = (2..=11).collect::<Vec<u8>>();
        let mut block = |category: Category, title: &str, keys: Vec<RowKey>| {
            let mut grid = Grid::new(category, title, "Player", upcards.clone());
            for key in keys {
                let cells = upcards
                    .iter()
                    .map(|u| f(Cell::from((key, *u))))
                    .collect::<Vec<T>>();
                if let Some(pad) = cells.first().cloned() {
                    grid.push(&key.label(), cells, pad);
                }
            }
            grid
        };
        Self {
            hard: block(Category::Hard, "Hard", (4..=18).map(RowKey::Hard).collect()),
            soft: block(Category::Soft, "Soft", (12..=20).map(RowKey::Soft).collect()),
            split: block(Category::Split, "Split", (2..=11).map(RowKey::Pair).collect()),
        }
    }
}

impl PayoutTable {
    /// cash-out amount for a hand against the dealer upcard, scaled to
    /// `base`. anything the table cannot answer (no row, no column, an
    /// unknown cell) pays the conservative fallback of 80% of the base.
    pub fn lookup(&self, total: u8, upcard: u8, soft: bool, pair: bool, base: Chips) -> Chips {
        let upcard = if upcard == 1 { 11 } else { upcard };
        let row = RowKey::of(total, soft, pair);
        self.amount(Cell::from((row, upcard)), base)
    }
    /// cash-out for a player hand at the base bet, with the cell consulted
    pub fn cashout(&self, hand: &Hand, upcard: u8) -> (Chips, Cell) {
        let cell = Cell::from((RowKey::from(hand), upcard));
        (self.amount(cell, crate::BASE_BET), cell)
    }
    fn amount(&self, cell: Cell, base: Chips) -> Chips {
        let listed = match cell.row {
            RowKey::Soft(total) => (12..=20).contains(&total),
            _ => true,
        };
        match self.get(cell).copied() {
            Some(value) if listed && !value.is_nan() => value * base / 100.0,
            _ => base * crate::FALLBACK_RATIO,
        }
    }
    /// shift masked cells by `delta` and clamp them.
    /// unmasked cells are carried over bit for bit.
    pub fn apply_mask_delta(&self, mask: &Mask, delta: Chips, bounds: Bounds) -> Self {
        self.map(|cell, value| {
            let masked = cell.and_then(|c| mask.get(c)).copied().unwrap_or(false);
            if masked {
                bounds.clamp(value + delta)
            } else {
                *value
            }
        })
    }
    /// scale every cell, round to whole chips, clamp.
    pub fn apply_uniform_scale(&self, scale: f64, bounds: Bounds) -> Self {
        self.map(|_, value| bounds.clamp((value * scale).round_ties_even()))
    }
    /// count of unknown cells
    pub fn unknowns(&self) -> usize {
        self.cells().filter(|(_, v)| v.is_nan()).count()
    }
    /// mean of the known cells
    pub fn mean(&self) -> Chips {
        let (n, sum) = self
            .cells()
            .map(|(_, v)| *v)
            .filter(|v| !v.is_nan())
            .fold((0usize, 0.0), |(n, sum), v| (n + 1, sum + v));
        if n == 0 {
            0.0
        } else {
            sum / n as f64
        }
    }
}

impl Mask {
    pub fn count(&self) -> usize {
        self.cells().filter(|(_, masked)| **masked).count()
    }
}

impl From<&PayoutTable> for Mask {
    /// unknown cells of an observed table
    fn from(observed: &PayoutTable) -> Self {
        observed.map(|_, value| value.is_nan())
    }
}

impl Arbitrary for PayoutTable {
    /// whole chips in the usual range, with about one unknown cell in ten
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::thread_rng();
        Self::shaped(|_| {
            if rng.gen_bool(0.1) {
                f64::NAN
            } else {
                rng.gen_range(40..=177) as f64
            }
        })
    }
}

impl Arbitrary for Mask {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::thread_rng();
        Self::shaped(|_| rng.gen_bool(0.25))
    }
}
