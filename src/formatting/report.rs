use crate::invoices::InvoiceImport;
use crate::providers::ProviderDirectory;

use super::table::{Cell, Row, Table, print_table};

pub fn print_import(import: &InvoiceImport) {
    let mut table = Table::new();

    for invoice in &import.invoices {
        let row = &invoice.row;

        let mut account = row.bank_account.clone().unwrap_or_default();
        if let Some(reference_account) = row.reference_account.as_ref().filter(|_| row.account_mismatch) {
            account = format!("{account}\n(registry: {reference_account})");
        }

        table.add_row(Row::new(&[
            Cell::new_count(row.source_row),
            Cell::new(&invoice.status.to_string()),
            Cell::new_optional(row.tax_id.as_deref()),
            Cell::new_optional(row.payee_name.as_deref()),
            Cell::new_optional(row.invoice_number.as_deref()),
            Cell::new_amount(row.amount),
            Cell::new_date(row.due_date),
            Cell::new_date(row.deferral_date),
            if account.is_empty() { Cell::new_empty() } else { Cell::new(&account) },
            Cell::new(&invoice.validation_messages.join("\n")),
        ]));
    }

    print_table(&format!("Invoices ({})", import.layout), &[
        "Row", "Status", "Tax ID", "Payee", "Invoice", "Amount", "Due date", "Deferral date",
        "Bank account", "Messages",
    ], table);

    let summary = &import.summary;
    let mut table = Table::new();
    table.add_row(Row::new(&[
        Cell::new_count(summary.total),
        Cell::new_count(summary.valid),
        Cell::new_count(summary.warnings),
        Cell::new_count(summary.errors),
        summary.total_amount.map(Cell::new_amount).unwrap_or_else(|| Cell::new_optional(None)),
    ]));

    print_table("Summary", &["Invoices", "Valid", "Warnings", "Errors", "Total amount"], table);
}

pub fn print_providers(directory: &ProviderDirectory) {
    let mut table = Table::new();

    for provider in directory.providers() {
        table.add_row(Row::new(&[
            Cell::new(&provider.tax_id),
            Cell::new_optional(provider.name.as_deref()),
            Cell::new_optional(provider.city.as_deref()),
            Cell::new_optional(provider.country.as_deref()),
            Cell::new_optional(provider.email.as_deref()),
            Cell::new_optional(provider.phone.as_deref()),
            Cell::new_optional(provider.bank_account.as_deref()),
            Cell::new_optional(provider.swift.as_deref()),
        ]));
    }

    print_table(&format!("Providers ({})", directory.len()), &[
        "Tax ID", "Name", "City", "Country", "Email", "Phone", "Bank account", "SWIFT",
    ], table);
}
