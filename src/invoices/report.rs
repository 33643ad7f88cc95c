//! Hierarchical payment report reader.
//!
//! The report groups invoices into batches: a batch header row carries the batch number and the
//! payment date, and it's followed by data rows (often indented by one column) describing the
//! invoices to pay on that date. Everything else (titles, column labels, subtotals) is
//! decoration.

use calamine::Range;
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

use crate::formats::xls::{
    Cell, first_row_number, get_cell, get_cell_text, get_numeric_cell, get_optional_text, is_empty_row,
    is_integer_cell};
use crate::types::{Date, Decimal};
use crate::util;

use super::RawInvoiceRow;

const BATCH_NUMBER_COLUMN: usize = 0;
const BATCH_DATE_COLUMN: usize = 2;
const BATCH_DATE_FORMAT: &str = "%d/%m/%Y";

/// Placement of the invoice columns within a data row.
struct ColumnSet {
    tax_id: usize,
    name: usize,
    bank_account: usize,
    concept: usize,
}

impl ColumnSet {
    /// A column set applies only when all columns preceding the tax id are empty.
    fn applies_to(&self, row: &[Cell]) -> bool {
        (0..self.tax_id).all(|column_id| get_cell_text(get_cell(row, column_id)).is_empty())
            && is_tax_id_like(&get_cell_text(get_cell(row, self.tax_id)))
    }
}

// Checked in order, the first applicable one wins
const COLUMN_SETS: &[ColumnSet] = &[
    ColumnSet {tax_id: 0, name: 1, bank_account: 2, concept: 3},
    ColumnSet {tax_id: 1, name: 2, bank_account: 3, concept: 4},
];

/// Payment date established by the last batch header.
enum BatchDate {
    Unset,
    Valid(Date),
    Invalid(String),
}

pub fn read_report(sheet: &Range<Cell>) -> Vec<RawInvoiceRow> {
    let first_row_number = first_row_number(sheet);
    let mut batch_date = BatchDate::Unset;
    let mut invoices = Vec::new();

    for (index, row) in sheet.rows().enumerate() {
        let row_id = first_row_number + index;

        if is_empty_row(row) {
            continue;
        }

        if let Some(date) = parse_batch_header(row) {
            batch_date = match util::parse_date(&date, BATCH_DATE_FORMAT) {
                Ok(date) => {
                    debug!("Row #{}: batch header with {} payment date.", row_id, date);
                    BatchDate::Valid(date)
                },
                Err(e) => {
                    debug!("Row #{}: batch header with unparsable payment date: {}.", row_id, e);
                    BatchDate::Invalid(date)
                },
            };
            continue;
        }

        let Some(columns) = COLUMN_SETS.iter().find(|columns| columns.applies_to(row)) else {
            trace!("Row #{}: skipping as decorative.", row_id);
            continue;
        };

        let mut invoice = RawInvoiceRow::new(row_id);
        invoice.tax_id = get_optional_text(get_cell(row, columns.tax_id));
        invoice.payee_name = get_optional_text(get_cell(row, columns.name));
        invoice.bank_account = get_optional_text(get_cell(row, columns.bank_account));

        let concept = get_cell_text(get_cell(row, columns.concept));
        invoice.invoice_number = parse_invoice_number(&concept);

        invoice.amount = parse_amount(row_id, row);

        match &batch_date {
            BatchDate::Unset => {},
            BatchDate::Valid(date) => invoice.due_date = Some(*date),
            BatchDate::Invalid(date) => invoice.parse_warnings.push(format!("invalid due date: {}", date)),
        }

        trace!("Row #{}: {:?}.", row_id, invoice);
        invoices.push(invoice);
    }

    invoices
}

fn parse_batch_header(row: &[Cell]) -> Option<String> {
    if !is_integer_cell(get_cell(row, BATCH_NUMBER_COLUMN)) {
        return None;
    }

    let date = get_cell_text(get_cell(row, BATCH_DATE_COLUMN));
    if date.chars().count() != 10 || !date.contains('/') {
        return None;
    }

    Some(date)
}

fn is_tax_id_like(value: &str) -> bool {
    lazy_static! {
        static ref TAX_ID_REGEX: Regex = Regex::new(
            r"(?i)^(?:[A-Z]\d{7,8}[A-Z0-9]|\d{8}[A-Z])$").unwrap();
    }
    TAX_ID_REGEX.is_match(value)
}

fn parse_invoice_number(concept: &str) -> Option<String> {
    lazy_static! {
        static ref INVOICE_NUMBER_REGEX: Regex = Regex::new(
            r"(?i)(?:N[º°]|\bNo[.:])\s*:?\s*([A-Za-z0-9/-]+)").unwrap();
    }

    if let Some(captures) = INVOICE_NUMBER_REGEX.captures(concept) {
        return Some(captures[1].to_owned());
    }

    if concept.is_empty() {
        None
    } else {
        Some(concept.to_owned())
    }
}

/// The amount column isn't fixed, so the amount is the rightmost number-like cell of the row.
fn parse_amount(row_id: usize, row: &[Cell]) -> Decimal {
    lazy_static! {
        static ref AMOUNT_REGEX: Regex = Regex::new(r"^-?[\d.,]+$").unwrap();
    }

    let Some(cell) = row.iter().rev().find(|cell| {
        let text = get_cell_text(cell);
        AMOUNT_REGEX.is_match(&text) && text.chars().any(|c| c.is_ascii_digit())
    }) else {
        trace!("Row #{}: no amount.", row_id);
        return Decimal::ZERO;
    };

    if let Some(amount) = get_numeric_cell(cell) {
        return amount;
    }

    let text = get_cell_text(cell);
    util::parse_localized_decimal(&text).unwrap_or_else(|e| {
        trace!("Row #{}: {}.", row_id, e);
        Decimal::ZERO
    })
}
