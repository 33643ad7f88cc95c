use super::Cell;

static EMPTY_CELL: Cell = Cell::Empty;

pub fn is_empty_row(row: &[Cell]) -> bool {
    row.iter().all(|cell| match cell {
        Cell::Empty => true,
        Cell::String(value) => value.trim().is_empty(),
        _ => false,
    })
}

/// Returns the cell at the specified column treating missing cells as empty ones.
pub fn get_cell(row: &[Cell], column_id: usize) -> &Cell {
    row.get(column_id).unwrap_or(&EMPTY_CELL)
}
