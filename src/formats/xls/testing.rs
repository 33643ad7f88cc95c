use calamine::Range;

use crate::formats::xls::Cell;

pub fn sheet(rows: &[&[Cell]]) -> Range<Cell> {
    let width = rows.iter().map(|row| row.len()).max().unwrap_or(0).max(1);
    let height = rows.len().max(1);
    let mut range = Range::new((0, 0), (height as u32 - 1, width as u32 - 1));

    for (row_id, row) in rows.iter().enumerate() {
        for (column_id, cell) in row.iter().enumerate() {
            if *cell != Cell::Empty {
                range.set_value((row_id as u32, column_id as u32), cell.clone());
            }
        }
    }

    range
}

pub fn text(value: &str) -> Cell {
    if value.is_empty() {
        Cell::Empty
    } else {
        Cell::String(value.to_owned())
    }
}

pub fn text_row(values: &[&str]) -> Vec<Cell> {
    values.iter().map(|value| text(value)).collect()
}
