use calamine::Range;
use log::debug;

use crate::formats::xls::{Cell, first_row_number, get_cell_text};

use super::SheetLayout;

const DUE_DATE_MARKER: &str = "Fec.Exp.";
const BANK_MARKER: &str = "Banco";

/// Picks the extractor for a sheet by looking for the hierarchical report signature: a row within
/// the first `scan_rows` rows that carries both the due date and the bank column labels.
pub fn detect_layout(sheet: &Range<Cell>, scan_rows: usize) -> SheetLayout {
    for (row_id, row) in sheet.rows().take(scan_rows).enumerate() {
        let text = row.iter().map(get_cell_text).collect::<Vec<_>>().join(" ");

        if text.contains(DUE_DATE_MARKER) && text.contains(BANK_MARKER) {
            debug!("Found hierarchical report signature at row #{}.", first_row_number(sheet) + row_id);
            return SheetLayout::Report;
        }
    }

    debug!("No hierarchical report signature in the first {} rows. Assuming a flat table.", scan_rows);
    SheetLayout::Flat
}
