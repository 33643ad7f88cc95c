//! Payable invoice ingestion: layout detection, row extraction, enrichment from the provider
//! registry and validation.

mod columns;
mod detector;
mod enrichment;
mod flat;
mod pipeline;
mod report;
mod validation;

use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::types::{Date, Decimal};

pub use self::columns::{InvoiceField, INVOICE_COLUMNS};
pub use self::detector::detect_layout;
pub use self::enrichment::{enrich_row, enrich_rows};
pub use self::flat::read_flat_table;
pub use self::pipeline::{
    DEFAULT_SCAN_ROWS, ImportOptions, ImportSummary, InvoiceImport, PLACEHOLDER_EMAILS,
    extract_and_validate, import_invoices, process_sheet};
pub use self::report::read_report;
pub use self::validation::validate_row;

pub const DEFAULT_COUNTRY: &str = "ES";

/// A candidate invoice extracted from a sheet before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawInvoiceRow {
    /// Number of the source row as shown by spreadsheet applications.
    pub source_row: usize,

    pub tax_id: Option<String>,
    pub payee_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub bank_account: Option<String>,

    pub amount: Decimal,
    pub invoice_number: Option<String>,
    pub due_date: Option<Date>,
    pub deferral_date: Option<Date>,

    pub account_mismatch: bool,
    /// Bank account of the matching registry record, for operator review.
    pub reference_account: Option<String>,
    pub enrichment_notes: Vec<String>,

    /// Values which were present in the source but couldn't be parsed.
    pub parse_warnings: Vec<String>,
}

impl RawInvoiceRow {
    pub fn new(source_row: usize) -> RawInvoiceRow {
        RawInvoiceRow {
            source_row,
            ..Default::default()
        }
    }

    /// Applies defaults that must not be in place while the row is being enriched.
    pub fn finalize(&mut self, default_country: &str) {
        if self.country.is_none() {
            self.country = Some(default_country.to_owned());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvoiceStatus {
    Valid,
    Warning,
    Error,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvoiceStatus::Valid => "VALID",
            InvoiceStatus::Warning => "WARNING",
            InvoiceStatus::Error => "ERROR",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedInvoiceRow {
    #[serde(flatten)]
    pub row: RawInvoiceRow,
    pub status: InvoiceStatus,
    pub validation_messages: Vec<String>,
}

impl ValidatedInvoiceRow {
    pub fn validation_message(&self) -> String {
        self.validation_messages.iter().join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetLayout {
    Flat,
    Report,
}

impl fmt::Display for SheetLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SheetLayout::Flat => "flat table",
            SheetLayout::Report => "hierarchical report",
        })
    }
}
