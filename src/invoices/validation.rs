use crate::checksum::{validate_bank_account, validate_tax_id};

use super::{InvoiceStatus, RawInvoiceRow, ValidatedInvoiceRow};

/// Classifies an extracted (and possibly enriched) invoice row. Problems accumulate as messages
/// and the most severe one determines the status.
pub fn validate_row(row: RawInvoiceRow) -> ValidatedInvoiceRow {
    let mut status = InvoiceStatus::Valid;
    let mut messages = Vec::new();

    let mut report = |severity: InvoiceStatus, message: String| {
        status = status.max(severity);
        messages.push(message);
    };

    if !row.enrichment_notes.is_empty() {
        report(InvoiceStatus::Valid, format!("auto-filled: {}", row.enrichment_notes.join(", ")));
    }

    match non_empty(&row.tax_id) {
        None => report(InvoiceStatus::Error, "missing tax id".to_owned()),
        Some(tax_id) if !validate_tax_id(tax_id) => report(
            InvoiceStatus::Warning, format!("suspicious tax id: {}", tax_id)),
        Some(_) => {},
    }

    if row.amount.is_zero() {
        report(InvoiceStatus::Warning, "zero amount".to_owned());
    }

    match non_empty(&row.bank_account) {
        None => report(InvoiceStatus::Warning, "missing bank account".to_owned()),
        Some(account) if !validate_bank_account(account) => report(
            InvoiceStatus::Error, "invalid bank account".to_owned()),
        Some(_) => {},
    }

    for warning in &row.parse_warnings {
        report(InvoiceStatus::Warning, warning.clone());
    }

    if row.account_mismatch {
        report(InvoiceStatus::Valid, "bank account differs from registry".to_owned());
    }

    ValidatedInvoiceRow {
        row,
        status,
        validation_messages: messages,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}
