use crate::table::key::heading;
use crate::table::PayoutTable;
use crate::Result;
use std::io::Write;

/// write a table in the layout it is read in. one separator row
/// between blocks, cells as whole chips, unknown cells left empty.
pub fn write<W: Write>(table: &PayoutTable, writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);
    for (i, grid) in table.grids().into_iter().enumerate() {
        let width = grid.upcards().len() + 1;
        if i > 0 {
            csv.write_record(vec![""; width])?;
        }
        csv.write_record(std::iter::once(grid.title()).chain(vec![""; width - 1]))?;
        csv.write_record(
            std::iter::once(grid.corner().to_string())
                .chain(grid.upcards().iter().map(|u| heading(*u))),
        )?;
        for row in grid.rows() {
            csv.write_record(
                std::iter::once(row.label.clone()).chain(row.cells.iter().map(|v| render(*v))),
            )?;
        }
    }
    csv.flush()?;
    Ok(())
}

/// the table as csv text
pub fn to_string(table: &PayoutTable) -> Result<String> {
    let mut buffer = Vec::new();
    write(table, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn render(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{}", value.round_ties_even() as i64)
    }
}
