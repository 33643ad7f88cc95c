use calamine::Range;
use log::{debug, trace, warn};

use crate::formats::xls::{
    Cell, ColumnsMapping, SheetReader, first_row_number, get_cell_text, get_date_cell, get_numeric_cell,
    get_optional_text, is_empty_row};
use crate::types::{Date, Decimal};
use crate::util;

use super::{ImportOptions, RawInvoiceRow};
use super::columns::{INVOICE_COLUMNS, InvoiceField};

const UNKNOWN_INVOICE_NUMBER: &str = "Unknown";
const SPAIN_NAMES: &[&str] = &["ESPAÑA", "ESPANA", "SPAIN", "ESP"];

/// Reads a conventional table with a header row and one invoice per row.
pub fn read_flat_table(sheet: Range<Cell>, options: &ImportOptions) -> Vec<RawInvoiceRow> {
    let Some(header_index) = find_header(&sheet, options.scan_rows) else {
        warn!("The sheet is empty.");
        return Vec::new();
    };

    let mut reader = SheetReader::new(sheet);

    let mapping = match reader.sheet().rows().nth(header_index) {
        Some(header) => INVOICE_COLUMNS.map_columns(header),
        None => return Vec::new(),
    };
    if !mapping.contains(InvoiceField::TaxId) {
        warn!("Unable to find tax id column in the invoice table.");
    }

    reader.skip_rows(header_index + 1);

    let mut invoices = Vec::new();

    while let Some((row_id, row)) = reader.next_numbered_row() {
        if is_empty_row(row) {
            trace!("Row #{}: skipping empty row.", row_id);
            continue;
        }

        let invoice = read_row(row_id, row, &mapping, options);
        trace!("Row #{}: {:?}.", row_id, invoice);
        invoices.push(invoice);
    }

    invoices
}

/// The header is the first row with a tax id column title. If there is no such row within the
/// scan window, the first non-empty row is taken.
fn find_header(sheet: &Range<Cell>, scan_rows: usize) -> Option<usize> {
    let mut first_non_empty = None;

    for (index, row) in sheet.rows().take(scan_rows).enumerate() {
        if is_empty_row(row) {
            continue;
        }

        if row.iter().any(|cell| INVOICE_COLUMNS.resolve(&get_cell_text(cell)) == Some(InvoiceField::TaxId)) {
            debug!("Found invoice table header at row #{}.", first_row_number(sheet) + index);
            return Some(index);
        }

        first_non_empty.get_or_insert(index);
    }

    if first_non_empty.is_none() {
        first_non_empty = sheet.rows().position(|row| !is_empty_row(row));
    }

    if let Some(index) = first_non_empty {
        debug!("No tax id column found. Using row #{} as the header.", first_row_number(sheet) + index);
    }

    first_non_empty
}

fn read_row(row_id: usize, row: &[Cell], mapping: &ColumnsMapping<InvoiceField>, options: &ImportOptions) -> RawInvoiceRow {
    let text = |field| mapping.get(row, field).and_then(get_optional_text);

    let mut invoice = RawInvoiceRow::new(row_id);

    invoice.invoice_number = if mapping.contains(InvoiceField::InvoiceNumber) {
        text(InvoiceField::InvoiceNumber)
    } else {
        Some(UNKNOWN_INVOICE_NUMBER.to_owned())
    };

    invoice.amount = mapping.get(row, InvoiceField::Amount)
        .map(|cell| parse_amount(row_id, cell))
        .unwrap_or_default();

    invoice.due_date = parse_date(&mut invoice, mapping.get(row, InvoiceField::DueDate), "due date");
    invoice.deferral_date = parse_date(&mut invoice, mapping.get(row, InvoiceField::DeferralDate), "deferral date");

    invoice.tax_id = text(InvoiceField::TaxId);
    invoice.payee_name = text(InvoiceField::Name);
    invoice.bank_account = text(InvoiceField::BankAccount);
    invoice.email = text(InvoiceField::Email).filter(|email| !is_placeholder_email(email, options));
    invoice.address = text(InvoiceField::Address);
    invoice.city = text(InvoiceField::City);
    invoice.postal_code = text(InvoiceField::PostalCode);
    invoice.country = text(InvoiceField::Country).map(|country| normalize_country(&country));
    invoice.phone = text(InvoiceField::Phone);

    invoice
}

fn parse_amount(row_id: usize, cell: &Cell) -> Decimal {
    if let Some(amount) = get_numeric_cell(cell) {
        return amount;
    }

    let Some(text) = get_optional_text(cell) else {
        return Decimal::ZERO;
    };

    util::parse_localized_decimal(&text).unwrap_or_else(|e| {
        trace!("Row #{}: {}.", row_id, e);
        Decimal::ZERO
    })
}

/// Unparsable dates degrade to none, but the row is flagged so it doesn't pass silently.
fn parse_date(invoice: &mut RawInvoiceRow, cell: Option<&Cell>, name: &str) -> Option<Date> {
    let cell = cell?;

    let date = get_date_cell(cell);
    if date.is_none() {
        let text = get_cell_text(cell);
        if !text.is_empty() {
            trace!("Row #{}: invalid {}: {:?}.", invoice.source_row, name, text);
            invoice.parse_warnings.push(format!("invalid {}: {}", name, text));
        }
    }

    date
}

fn is_placeholder_email(email: &str, options: &ImportOptions) -> bool {
    let email = email.trim().to_lowercase();
    options.placeholder_emails.iter().any(|placeholder| placeholder.trim().to_lowercase() == email)
}

fn normalize_country(country: &str) -> String {
    if SPAIN_NAMES.contains(&country.to_uppercase().as_str()) {
        super::DEFAULT_COUNTRY.to_owned()
    } else {
        country.to_owned()
    }
}
