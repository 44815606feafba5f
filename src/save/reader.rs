use crate::table::key::column;
use crate::table::Category;
use crate::table::Grid;
use crate::table::PayoutTable;
use crate::Error;
use crate::Result;
use std::io::Read;

enum State {
    Title,
    Header,
    Rows,
}

/// parse the three blocks of a cash-out table: a title row, a header
/// of dealer upcards, then labelled data rows. blocks are separated by
/// rows with no content or by blank lines. cells that are not numbers
/// ("-", empty) read as unknown.
pub fn read<R: Read>(mut reader: R) -> Result<PayoutTable> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut blocks = Blocks::default();
    for segment in segments(&text) {
        blocks.close();
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(segment.as_bytes());
        for record in csv.records() {
            blocks.feed(&record?)?;
        }
    }
    blocks.finish()
}

/// runs of non-empty lines. the csv reader skips empty lines
/// silently, so they are split on before any record is parsed.
fn segments(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// grids collected so far and the one being filled
struct Blocks {
    grids: Vec<Grid<f64>>,
    grid: Option<Grid<f64>>,
    state: State,
    title: String,
}

impl Default for Blocks {
    fn default() -> Self {
        Self {
            grids: Vec::new(),
            grid: None,
            state: State::Title,
            title: String::new(),
        }
    }
}

impl Blocks {
    /// end the open block, if any
    fn close(&mut self) {
        if let Some(done) = self.grid.take() {
            self.grids.push(done);
            self.state = State::Title;
        }
    }
    fn feed(&mut self, record: &csv::StringRecord) -> Result<()> {
        if record.iter().all(|f| f.trim().is_empty()) {
            self.close();
            return Ok(());
        }
        let category = Category::all()
            .get(self.grids.len())
            .copied()
            .unwrap_or(Category::Split);
        match self.state {
            State::Title if is_header(record) => {
                self.title.clear();
                self.grid = Some(header(record, category, &self.title)?);
                self.state = State::Rows;
            }
            State::Title => {
                self.title = record
                    .get(0)
                    .unwrap_or_default()
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_string();
                self.state = State::Header;
            }
            State::Header => {
                self.grid = Some(header(record, category, &self.title)?);
                self.state = State::Rows;
            }
            State::Rows => {
                if let Some(grid) = self.grid.as_mut() {
                    let label = record.get(0).unwrap_or_default().trim();
                    let cells = record.iter().skip(1).map(cell).collect();
                    grid.push(label, cells, f64::NAN);
                }
            }
        }
        Ok(())
    }
    fn finish(mut self) -> Result<PayoutTable> {
        let untitled = matches!(self.state, State::Header);
        match self.grid.take() {
            Some(done) => self.grids.push(done),
            None if untitled => return Err(Error::Header(self.title)),
            None => {}
        }
        let mut grids = self.grids;
        if grids.len() > 3 {
            log::warn!("ignoring {} extra blocks after split", grids.len() - 3);
            grids.truncate(3);
        }
        match <[Grid<f64>; 3]>::try_from(grids) {
            Ok([hard, soft, split]) => Ok(PayoutTable { hard, soft, split }),
            Err(grids) => Err(Error::Blocks(grids.len())),
        }
    }
}

/// a row whose every non-empty field after the first names an upcard
fn is_header(record: &csv::StringRecord) -> bool {
    let mut fields = record.iter().skip(1).filter(|f| !f.trim().is_empty()).peekable();
    fields.peek().is_some() && fields.all(|f| column(f).is_some())
}

/// upcards run until the first empty header field
fn header(record: &csv::StringRecord, category: Category, title: &str) -> Result<Grid<f64>> {
    let upcards = record
        .iter()
        .skip(1)
        .take_while(|f| !f.trim().is_empty())
        .map(|f| column(f).ok_or_else(|| Error::Column(f.trim().to_string())))
        .collect::<Result<Vec<u8>>>()?;
    if upcards.is_empty() {
        return Err(Error::Header(title.to_string()));
    }
    let corner = record.get(0).unwrap_or_default().trim();
    Ok(Grid::new(category, title, corner, upcards))
}

fn cell(field: &str) -> f64 {
    field.trim().parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use crate::table::RowKey;

    const SAMPLE: &str = "\u{feff}Hard,,,
Player,2,3,A (11)
12,40,41,30
13,38,-,
,,,
Soft,,,
Player,2,3,A
\"17 (A,6)\",70,71,60
,,,

Split,,,
Player,2,3,A
\"A,A\",150,140,82
\"8,8\",60,62,
";

    fn get(table: &PayoutTable, row: RowKey, upcard: u8) -> Option<f64> {
        table.get(Cell::from((row, upcard))).copied()
    }

    #[test]
    fn reads_three_blocks() {
        let table = read(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.hard.title(), "Hard");
        assert_eq!(table.soft.title(), "Soft");
        assert_eq!(table.split.title(), "Split");
        assert_eq!(table.hard.upcards(), &[2, 3, 11]);
        assert_eq!(get(&table, RowKey::Hard(12), 11), Some(30.0));
        assert_eq!(get(&table, RowKey::Soft(17), 11), Some(60.0));
        assert_eq!(get(&table, RowKey::Pair(11), 2), Some(150.0));
        assert_eq!(get(&table, RowKey::Pair(8), 3), Some(62.0));
    }

    #[test]
    fn dashes_and_empties_are_unknown() {
        let table = read(SAMPLE.as_bytes()).unwrap();
        assert!(get(&table, RowKey::Hard(13), 3).is_some_and(f64::is_nan));
        assert!(get(&table, RowKey::Hard(13), 11).is_some_and(f64::is_nan));
        assert!(get(&table, RowKey::Pair(8), 11).is_some_and(f64::is_nan));
        assert_eq!(table.unknowns(), 3);
    }

    #[test]
    fn blank_lines_separate_blocks() {
        let text = "Hard\nP,2,3\n12,40,41\n\nSoft\nP,2,3\n17,70,71\n\n\nSplit\nP,2,3\n8,60,62\n";
        let table = read(text.as_bytes()).unwrap();
        assert_eq!(table.soft.title(), "Soft");
        assert_eq!(table.split.title(), "Split");
        assert_eq!(table.soft.rows().len(), 1);
        assert_eq!(get(&table, RowKey::Soft(17), 3), Some(71.0));
        assert_eq!(get(&table, RowKey::Pair(8), 2), Some(60.0));
    }

    #[test]
    fn titles_stay_out_of_rows_after_a_blank_line() {
        let text = "Hard\nP,2,3\n12,40,41\n\nSoft\nP,2,3\n\"17 (A,6)\",70,71\n\nSplit\nP,2,3\n8,60,62\n";
        let table = read(text.as_bytes()).unwrap();
        let labels = table.soft.rows().iter().map(|r| r.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["17 (A,6)"]);
        assert_eq!(table.split.title(), "Split");
        assert_eq!(table.split.corner(), "P");
        assert_eq!(get(&table, RowKey::Pair(8), 3), Some(62.0));
    }

    #[test]
    fn crlf_and_whitespace_lines_separate_blocks() {
        let text = "Hard\r\nP,2\r\n12,40\r\n  \r\nSoft\r\nP,2\r\n17,70\r\n\r\nSplit\r\nP,2\r\n8,60\r\n";
        let table = read(text.as_bytes()).unwrap();
        assert_eq!(table.soft.title(), "Soft");
        assert_eq!(table.split.title(), "Split");
        assert_eq!(get(&table, RowKey::Pair(8), 2), Some(60.0));
    }

    #[test]
    fn header_without_title() {
        let text = "P,2,3\n12,40,41\n,,\nP,2,3\n17,70,71\n,,\nP,2,3\n8,60,62\n";
        let table = read(text.as_bytes()).unwrap();
        assert_eq!(table.hard.title(), "");
        assert_eq!(get(&table, RowKey::Hard(12), 3), Some(41.0));
    }

    #[test]
    fn too_few_blocks() {
        let text = "Hard\nP,2,3\n12,40,41\n\nSoft\nP,2,3\n17,70,71\n";
        assert!(matches!(read(text.as_bytes()), Err(Error::Blocks(2))));
    }

    #[test]
    fn unknown_upcard() {
        let text = "Hard\nP,2,Q\n12,40,41\n";
        assert!(matches!(read(text.as_bytes()), Err(Error::Column(c)) if c == "Q"));
    }

    #[test]
    fn title_without_header() {
        let text = "Hard\n";
        assert!(matches!(read(text.as_bytes()), Err(Error::Header(t)) if t == "Hard"));
    }
}
