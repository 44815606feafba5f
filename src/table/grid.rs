use super::key::Category;
use super::key::Cell;
use super::key::RowKey;

/// one labelled row of a block. rows whose label names no
/// hand are kept so the block writes back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    pub label: String,
    pub key: Option<RowKey>,
    pub cells: Vec<T>,
}

/// one block of a cash-out table: a title, a header of dealer
/// upcards, and a row per player hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    category: Category,
    title: String,
    corner: String,
    upcards: Vec<u8>,
    rows: Vec<Row<T>>,
}

impl<T> Grid<T> {
    pub fn new(category: Category, title: &str, corner: &str, upcards: Vec<u8>) -> Self {
        Self {
            category,
            title: title.to_string(),
            corner: corner.to_string(),
            upcards,
            rows: Vec::new(),
        }
    }
    pub fn category(&self) -> Category {
        self.category
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn corner(&self) -> &str {
        &self.corner
    }
    pub fn upcards(&self) -> &[u8] {
        &self.upcards
    }
    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }
    /// append a row, padding or truncating to the header width
    pub fn push(&mut self, label: &str, mut cells: Vec<T>, pad: T)
    where
        T: Clone,
    {
        cells.resize(self.upcards.len(), pad);
        self.rows.push(Row {
            label: label.to_string(),
            key: RowKey::parse(self.category, label),
            cells,
        });
    }
    pub fn get(&self, cell: Cell) -> Option<&T> {
        let col = self.upcards.iter().position(|u| *u == cell.upcard)?;
        self.rows
            .iter()
            .find(|row| row.key == Some(cell.row))
            .and_then(|row| row.cells.get(col))
    }
    /// every addressable cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Cell, &T)> + '_ {
        self.rows.iter().flat_map(move |row| {
            row.key.into_iter().flat_map(move |key| {
                self.upcards
                    .iter()
                    .zip(row.cells.iter())
                    .map(move |(upcard, value)| (Cell::from((key, *upcard)), value))
            })
        })
    }
    /// same shape, each cell transformed with its address.
    /// cells of unkeyed rows go through with no address.
    pub fn map<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(Option<Cell>, &T) -> U,
    {
        Grid {
            category: self.category,
            title: self.title.clone(),
            corner: self.corner.clone(),
            upcards: self.upcards.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| Row {
                    label: row.label.clone(),
                    key: row.key,
                    cells: self
                        .upcards
                        .iter()
                        .zip(row.cells.iter())
                        .map(|(upcard, value)| f(row.key.map(|k| Cell::from((k, *upcard))), value))
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid<f64> {
        let mut grid = Grid::new(Category::Hard, "Hard", "Player", vec![2, 3, 11]);
        grid.push("12", vec![40.0, 41.0, 30.0], f64::NAN);
        grid.push("13", vec![38.0, 39.0], f64::NAN);
        grid.push("notes", vec![1.0, 2.0, 3.0], f64::NAN);
        grid
    }

    #[test]
    fn short_rows_are_padded() {
        let grid = grid();
        assert_eq!(grid.rows()[1].cells.len(), 3);
        assert_eq!(grid.get(Cell::from((RowKey::Hard(13), 3))), Some(&39.0));
        assert!(grid.get(Cell::from((RowKey::Hard(13), 11))).is_some_and(|v| v.is_nan()));
    }

    #[test]
    fn get_by_key_and_upcard() {
        let grid = grid();
        assert_eq!(grid.get(Cell::from((RowKey::Hard(12), 11))), Some(&30.0));
        assert_eq!(grid.get(Cell::from((RowKey::Hard(12), 7))), None);
        assert_eq!(grid.get(Cell::from((RowKey::Hard(14), 2))), None);
    }

    #[test]
    fn unkeyed_rows_are_not_addressable() {
        let grid = grid();
        assert_eq!(grid.cells().count(), 6);
        assert_eq!(grid.rows()[2].key, None);
    }

    #[test]
    fn map_keeps_shape() {
        let grid = grid();
        let doubled = grid.map(|_, v| v * 2.0);
        assert_eq!(doubled.rows().len(), 3);
        assert_eq!(doubled.get(Cell::from((RowKey::Hard(12), 3))), Some(&82.0));
        assert_eq!(doubled.rows()[2].cells, vec![2.0, 4.0, 6.0]);
    }
}
