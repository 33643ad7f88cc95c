use log::{debug, trace};

use crate::providers::ProviderRegistry;
use crate::util;

use super::{RawInvoiceRow, SheetLayout};

// Report rows often carry a truncated payee name
const MIN_REPORT_NAME_LENGTH: usize = 3;

pub fn enrich_rows(rows: &mut [RawInvoiceRow], registry: &dyn ProviderRegistry, layout: SheetLayout) {
    for row in rows {
        enrich_row(row, registry, layout);
    }
}

/// Fills the gaps of an invoice row from the registry record with the same tax id. Data from the
/// source file is never overwritten, with the exception of a missing (or too short for reports)
/// payee name. The registry account is always kept as the reference one.
pub fn enrich_row(row: &mut RawInvoiceRow, registry: &dyn ProviderRegistry, layout: SheetLayout) {
    let Some(tax_id) = row.tax_id.as_deref().filter(|tax_id| !tax_id.is_empty()) else {
        return;
    };

    let Some(provider) = registry.find_provider(tax_id) else {
        trace!("Row #{}: {} is not in the provider registry.", row.source_row, tax_id);
        return;
    };

    if let Some(name) = provider.name.as_ref() {
        let replace = match (layout, row.payee_name.as_deref()) {
            (_, None) => true,
            (SheetLayout::Report, Some(payee_name)) => payee_name.chars().count() < MIN_REPORT_NAME_LENGTH,
            (SheetLayout::Flat, Some(_)) => false,
        };

        if replace {
            row.payee_name = Some(name.clone());
            row.enrichment_notes.push("name".to_owned());
        }
    }

    fill(&mut row.email, &provider.email);
    fill(&mut row.address, &provider.address);
    fill(&mut row.city, &provider.city);
    fill(&mut row.postal_code, &provider.postal_code);
    fill(&mut row.country, &provider.country);
    fill(&mut row.phone, &provider.phone);

    row.reference_account.clone_from(&provider.bank_account);

    match (row.bank_account.as_deref(), provider.bank_account.as_deref()) {
        (Some(account), Some(reference_account)) => {
            if util::normalize_account(account) != util::normalize_account(reference_account) {
                debug!("Row #{}: bank account {} differs from the registry one ({}).",
                       row.source_row, account, reference_account);
                row.account_mismatch = true;
            }
        },
        (None, Some(reference_account)) => {
            row.bank_account = Some(reference_account.to_owned());
            row.enrichment_notes.push("bank_account".to_owned());
        },
        (_, None) => {},
    }
}

fn fill(value: &mut Option<String>, reference: &Option<String>) {
    if value.is_none() {
        value.clone_from(reference);
    }
}
