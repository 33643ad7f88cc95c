use std::io::Cursor;
use std::ops::Index;

use calamine::{Range, Reader, open_workbook_auto_from_rs};

use crate::core::GenericResult;

use super::Cell;

pub struct SheetReader {
    sheet: Range<Cell>,
    first_row_number: usize,
    next_row_id: usize,
}

impl SheetReader {
    pub fn new(sheet: Range<Cell>) -> SheetReader {
        let first_row_number = first_row_number(&sheet);
        SheetReader {sheet, first_row_number, next_row_id: 0}
    }

    pub fn sheet(&self) -> &Range<Cell> {
        &self.sheet
    }

    pub fn next_row(&mut self) -> Option<&[Cell]> {
        if self.next_row_id >= self.sheet.height() {
            return None;
        }

        let row = self.sheet.index(self.next_row_id);
        self.next_row_id += 1;

        Some(row)
    }

    /// Returns the next row along with its number as shown by spreadsheet applications.
    pub fn next_numbered_row(&mut self) -> Option<(usize, &[Cell])> {
        let row_id = self.first_row_number + self.next_row_id;
        self.next_row().map(|row| (row_id, row))
    }

    pub fn skip_rows(&mut self, count: usize) {
        self.next_row_id = std::cmp::min(self.next_row_id + count, self.sheet.height());
    }
}

/// Returns the number (1-based, as shown by spreadsheet applications) of the first row of the
/// sheet's used range. Leading empty rows are not part of the range.
pub fn first_row_number(sheet: &Range<Cell>) -> usize {
    sheet.start().map(|(row, _)| row as usize).unwrap_or(0) + 1
}

/// Opens the first worksheet of a workbook supplied as raw bytes. The workbook type (xlsx, xls,
/// xlsb, ods) is detected from the data itself.
pub fn open_first_sheet(data: &[u8]) -> GenericResult<Range<Cell>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))?;

    Ok(workbook.worksheet_range_at(0).ok_or(
        "The workbook doesn't contain any worksheet")??)
}
