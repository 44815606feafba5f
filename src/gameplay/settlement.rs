use crate::table::key::Cell;
use crate::Chips;
use smallvec::SmallVec;

/// what one round paid back against what it put at risk,
/// and which table cells its cash-outs were priced from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settlement {
    pub returned: Chips,
    pub wagered: Chips,
    pub cashouts: SmallVec<[Cell; 2]>,
}

impl Settlement {
    pub fn wager(wagered: Chips) -> Self {
        Self {
            wagered,
            ..Self::default()
        }
    }
    pub fn win(&mut self, amount: Chips) {
        self.returned += amount;
    }
    pub fn cash(&mut self, amount: Chips, cell: Cell) {
        self.returned += amount;
        self.cashouts.push(cell);
    }
}

impl From<(Chips, Chips)> for Settlement {
    fn from((returned, wagered): (Chips, Chips)) -> Self {
        Self {
            returned,
            wagered,
            cashouts: SmallVec::new(),
        }
    }
}
