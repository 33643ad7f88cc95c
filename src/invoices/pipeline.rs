use calamine::Range;
use log::{info, warn};
use serde::Serialize;

use crate::core::ImportError;
use crate::formats::xls::{Cell, open_first_sheet};
use crate::providers::ProviderRegistry;
use crate::types::Decimal;

use super::{DEFAULT_COUNTRY, InvoiceStatus, SheetLayout, ValidatedInvoiceRow};
use super::detector::detect_layout;
use super::enrichment::enrich_rows;
use super::flat::read_flat_table;
use super::report::read_report;
use super::validation::validate_row;

pub const DEFAULT_SCAN_ROWS: usize = 15;
pub const PLACEHOLDER_EMAILS: &[&str] = &["test@test.com", "email@email.com", "example@example.com"];

#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Number of leading rows inspected for the report signature and the table header.
    pub scan_rows: usize,
    pub default_country: String,
    pub placeholder_emails: Vec<String>,
}

impl Default for ImportOptions {
    fn default() -> ImportOptions {
        ImportOptions {
            scan_rows: DEFAULT_SCAN_ROWS,
            default_country: DEFAULT_COUNTRY.to_owned(),
            placeholder_emails: PLACEHOLDER_EMAILS.iter().map(|&email| email.to_owned()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    pub layout: SheetLayout,
    pub total: usize,
    pub valid: usize,
    pub warnings: usize,
    pub errors: usize,
    /// Unset if the sum doesn't fit into a decimal.
    pub total_amount: Option<Decimal>,
}

impl ImportSummary {
    fn new(layout: SheetLayout, invoices: &[ValidatedInvoiceRow]) -> ImportSummary {
        let count = |status: InvoiceStatus| invoices.iter().filter(|invoice| invoice.status == status).count();

        let total_amount = invoices.iter().try_fold(Decimal::ZERO, |total, invoice| {
            total.checked_add(invoice.row.amount)
        });
        if total_amount.is_none() {
            warn!("The total amount of the invoices is out of the supported range.");
        }

        ImportSummary {
            layout,
            total: invoices.len(),
            valid: count(InvoiceStatus::Valid),
            warnings: count(InvoiceStatus::Warning),
            errors: count(InvoiceStatus::Error),
            total_amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvoiceImport {
    pub layout: SheetLayout,
    pub invoices: Vec<ValidatedInvoiceRow>,
    pub summary: ImportSummary,
}

/// Imports invoices from the first worksheet of a workbook supplied as raw bytes.
///
/// Fails only if the data can't be read as a spreadsheet. Any problem with individual rows is
/// reported through their status and validation messages.
pub fn import_invoices(
    data: &[u8], registry: Option<&dyn ProviderRegistry>, options: &ImportOptions,
) -> Result<InvoiceImport, ImportError> {
    let sheet = open_first_sheet(data).map_err(|e| ImportError::UnrecognizedFormat(e.to_string()))?;
    Ok(process_sheet(sheet, registry, options))
}

pub fn extract_and_validate(
    data: &[u8], registry: Option<&dyn ProviderRegistry>,
) -> Result<Vec<ValidatedInvoiceRow>, ImportError> {
    Ok(import_invoices(data, registry, &ImportOptions::default())?.invoices)
}

pub fn process_sheet(
    sheet: Range<Cell>, registry: Option<&dyn ProviderRegistry>, options: &ImportOptions,
) -> InvoiceImport {
    let layout = detect_layout(&sheet, options.scan_rows);

    let mut rows = match layout {
        SheetLayout::Report => read_report(&sheet),
        SheetLayout::Flat => read_flat_table(sheet, options),
    };

    if let Some(registry) = registry {
        enrich_rows(&mut rows, registry, layout);
    }

    let invoices: Vec<ValidatedInvoiceRow> = rows.into_iter().map(|mut row| {
        row.finalize(&options.default_country);
        validate_row(row)
    }).collect();

    let summary = ImportSummary::new(layout, &invoices);
    info!(
        "Imported {} invoices from {}: {} valid, {} with warnings, {} with errors.",
        summary.total, layout, summary.valid, summary.warnings, summary.errors);

    InvoiceImport {layout, invoices, summary}
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::formats::xls::testing::{sheet, text, text_row};
    use crate::providers::{ProviderDirectory, ProviderRecord};

    use super::*;

    const ACCOUNT: &str = "ES6000491500051234567892";

    fn registry() -> ProviderDirectory {
        [ProviderRecord {
            name: Some(s!("Proveedor Registrado SL")),
            country: Some(s!("PT")),
            bank_account: Some(s!(ACCOUNT)),
            ..ProviderRecord::new("B12345678")
        }].into_iter().collect()
    }

    fn flat_sheet() -> Range<Cell> {
        sheet(&[
            &text_row(&["CIF", "Nombre", "Importe", "Cuenta"]),
            &text_row(&["B12345678", "", "1.500,50", ""]),
            &[text("A00000000"), text("Proveedor Dos SL"), Cell::Int(-100), text(ACCOUNT)],
            &text_row(&["", "Sin CIF SL", "0", "ES00 1234"]),
        ])
    }

    #[test]
    fn flat_table_with_registry() {
        let registry = registry();
        let import = process_sheet(flat_sheet(), Some(&registry), &ImportOptions::default());

        assert_eq!(import.layout, SheetLayout::Flat);
        assert_eq!(import.invoices.len(), 3);

        let first = &import.invoices[0];
        assert_eq!(first.row.amount, dec!(1500.50));
        assert_eq!(first.row.bank_account.as_deref(), Some(ACCOUNT));
        assert_eq!(first.row.payee_name.as_deref(), Some("Proveedor Registrado SL"));
        assert_eq!(first.row.country.as_deref(), Some("PT"));
        assert_eq!(first.row.enrichment_notes, vec![s!("name"), s!("bank_account")]);
        assert_eq!(first.status, InvoiceStatus::Warning);
        assert_eq!(first.validation_messages, vec![
            s!("auto-filled: name, bank_account"), s!("suspicious tax id: B12345678")]);

        let second = &import.invoices[1];
        assert_eq!(second.row.amount, dec!(-100));
        assert_eq!(second.row.country.as_deref(), Some("ES"));
        assert_eq!(second.status, InvoiceStatus::Valid);

        let third = &import.invoices[2];
        assert_eq!(third.status, InvoiceStatus::Error);
        assert_eq!(third.validation_message(), "missing tax id, zero amount, invalid bank account");

        assert_eq!(import.summary, ImportSummary {
            layout: SheetLayout::Flat,
            total: 3,
            valid: 1,
            warnings: 1,
            errors: 1,
            total_amount: Some(dec!(1400.50)),
        });
    }

    #[test]
    fn registry_is_optional() {
        let import = process_sheet(flat_sheet(), None, &ImportOptions::default());

        let first = &import.invoices[0];
        assert_eq!(first.row.bank_account, None);
        assert_eq!(first.row.payee_name, None);
        assert_eq!(first.row.country.as_deref(), Some("ES"));
        assert!(first.row.enrichment_notes.is_empty());
        assert_eq!(first.validation_messages, vec![
            s!("suspicious tax id: B12345678"), s!("missing bank account")]);
    }

    #[test]
    fn default_country() {
        let options = ImportOptions {
            default_country: s!("FR"),
            ..Default::default()
        };
        let import = process_sheet(flat_sheet(), None, &options);
        assert!(import.invoices.iter().all(|invoice| invoice.row.country.as_deref() == Some("FR")));
    }

    #[test]
    fn total_amount_overflow() {
        let amount = "79.228.162.514.264.337.593.543.950.335";
        let import = process_sheet(sheet(&[
            &text_row(&["NIF", "Importe"]),
            &text_row(&["B12345674", amount]),
            &text_row(&["B12345674", amount]),
        ]), None, &ImportOptions::default());

        assert_eq!(import.invoices.len(), 2);
        assert!(import.invoices.iter().all(|invoice| invoice.row.amount == Decimal::MAX));
        assert_eq!(import.summary.total, 2);
        assert_eq!(import.summary.total_amount, None);
    }

    #[test]
    fn unrecognized_format() {
        for data in [&b""[..], b"garbage", b"PK\x03\x04 truncated zip"] {
            let error = extract_and_validate(data, None).unwrap_err();
            assert!(matches!(error, ImportError::UnrecognizedFormat(_)));
            assert!(error.to_string().starts_with("Invalid file: "));
        }
    }
}
