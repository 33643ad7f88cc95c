use std::fs;

use calamine::{Data as Cell, Range};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use payables::core::ImportError;
use payables::invoices::{self, ImportOptions, InvoiceStatus, SheetLayout};
use payables::providers::{ProviderDirectory, ProviderRecord};
use payables::types::Date;

const ACCOUNT: &str = "ES6000491500051234567892";
const OTHER_ACCOUNT: &str = "ES9121000418450200051332";

fn sheet(rows: &[Vec<Cell>]) -> Range<Cell> {
    let width = rows.iter().map(Vec::len).max().unwrap();
    let mut range = Range::new((0, 0), (rows.len() as u32 - 1, width as u32 - 1));

    for (row_id, row) in rows.iter().enumerate() {
        for (column_id, cell) in row.iter().enumerate() {
            if *cell != Cell::Empty {
                range.set_value((row_id as u32, column_id as u32), cell.clone());
            }
        }
    }

    range
}

fn row(values: &[&str]) -> Vec<Cell> {
    values.iter().map(|&value| {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::String(value.to_owned())
        }
    }).collect()
}

fn registry() -> ProviderDirectory {
    [
        ProviderRecord {
            name: Some("Suministros Levante SL".to_owned()),
            email: Some("pagos@levante.example".to_owned()),
            bank_account: Some(ACCOUNT.to_owned()),
            ..ProviderRecord::new("B12345678")
        },
        ProviderRecord {
            name: Some("Transportes Norte SA".to_owned()),
            bank_account: Some(ACCOUNT.to_owned()),
            ..ProviderRecord::new("A00000000")
        },
    ].into_iter().collect()
}

fn flat_sheet() -> Range<Cell> {
    sheet(&[
        row(&["Relación de facturas pendientes", "", "", "", ""]),
        row(&["", "", "", "", ""]),
        row(&["NIF", "Nombre", "Nº Factura", "Importe", "IBAN"]),
        row(&["B12345678", "", "F-2024/001", "1.500,50", ""]),
        row(&["A00000000", "Transportes Norte SA", "F-2024/002", "-100", OTHER_ACCOUNT]),
        row(&["12345678Z", "Juan Pérez", "F-2024/003", "250", "ES00 0000"]),
    ])
}

fn report_sheet() -> Range<Cell> {
    sheet(&[
        row(&["Listado de remesas", "", "", "", "", "", ""]),
        row(&["Remesa", "", "Fec.Exp.", "Banco", "", "", ""]),
        vec![Cell::Int(1), Cell::Empty, Cell::String("15/03/2024".to_owned()), Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty],
        row(&["", "B12345678", "Suministros Levante SL", ACCOUNT, "Fra. Nº 2024-17", "", "1.210,00"]),
        row(&["", "A00000000", "TN", "", "Fra. Nº 88", "", "300"]),
        row(&["", "", "", "", "Total remesa", "", "1.510,00"]),
        vec![Cell::Int(2), Cell::Empty, Cell::String("32/13/2024".to_owned()), Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty],
        row(&["", "12345678Z", "Juan Pérez", ACCOUNT, "Honorarios", "", "-100"]),
    ])
}

#[test]
fn flat_table() {
    let registry = registry();
    let import = invoices::process_sheet(flat_sheet(), Some(&registry), &ImportOptions::default());

    assert_eq!(import.layout, SheetLayout::Flat);
    assert_eq!(import.invoices.len(), 3);

    let first = &import.invoices[0];
    assert_eq!(first.row.source_row, 4);
    assert_eq!(first.row.amount, dec!(1500.50));
    assert_eq!(first.row.bank_account.as_deref(), Some(ACCOUNT));
    assert_eq!(first.row.email.as_deref(), Some("pagos@levante.example"));
    assert!(first.row.enrichment_notes.contains(&"bank_account".to_owned()));
    assert_eq!(first.status, InvoiceStatus::Warning);

    let second = &import.invoices[1];
    assert_eq!(second.row.amount, dec!(-100));
    assert_eq!(second.row.bank_account.as_deref(), Some(OTHER_ACCOUNT));
    assert!(second.row.account_mismatch);
    assert_eq!(second.row.reference_account.as_deref(), Some(ACCOUNT));
    assert_eq!(second.status, InvoiceStatus::Valid);
    assert_eq!(second.validation_messages, vec!["bank account differs from registry".to_owned()]);

    let third = &import.invoices[2];
    assert_eq!(third.status, InvoiceStatus::Error);
    assert_eq!(third.validation_messages, vec!["invalid bank account".to_owned()]);

    assert_eq!(import.summary.valid, 1);
    assert_eq!(import.summary.warnings, 1);
    assert_eq!(import.summary.errors, 1);
    assert_eq!(import.summary.total_amount, Some(dec!(1650.50)));
}

#[test]
fn hierarchical_report() {
    let registry = registry();
    let import = invoices::process_sheet(report_sheet(), Some(&registry), &ImportOptions::default());

    assert_eq!(import.layout, SheetLayout::Report);
    assert_eq!(import.invoices.len(), 3);

    let first = &import.invoices[0];
    assert_eq!(first.row.source_row, 4);
    assert_eq!(first.row.invoice_number.as_deref(), Some("2024-17"));
    assert_eq!(first.row.amount, dec!(1210));
    assert_eq!(first.row.due_date, Date::from_ymd_opt(2024, 3, 15));
    assert_eq!(first.status, InvoiceStatus::Warning);
    assert!(first.validation_message().contains("suspicious tax id"));

    // Too short names are replaced by the registry ones in reports
    let second = &import.invoices[1];
    assert_eq!(second.row.payee_name.as_deref(), Some("Transportes Norte SA"));
    assert_eq!(second.row.bank_account.as_deref(), Some(ACCOUNT));
    assert_eq!(second.row.enrichment_notes, vec!["name".to_owned(), "bank_account".to_owned()]);
    assert_eq!(second.status, InvoiceStatus::Valid);

    let third = &import.invoices[2];
    assert_eq!(third.row.invoice_number.as_deref(), Some("Honorarios"));
    assert_eq!(third.row.amount, dec!(-100));
    assert_eq!(third.row.due_date, None);
    assert_eq!(third.status, InvoiceStatus::Warning);
    assert_eq!(third.validation_messages, vec!["invalid due date: 32/13/2024".to_owned()]);
}

#[test]
fn idempotence() {
    let registry = registry();

    for build in [flat_sheet, report_sheet] {
        let first = invoices::process_sheet(build(), Some(&registry), &ImportOptions::default());
        let second = invoices::process_sheet(build(), Some(&registry), &ImportOptions::default());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap());
    }
}

#[test]
fn workbook() {
    let data = fs::read("testdata/invoices.xlsx").unwrap();
    let invoices = invoices::extract_and_validate(&data, None).unwrap();

    let rows: Vec<_> = invoices.iter().map(|invoice| (
        invoice.row.source_row,
        invoice.row.tax_id.clone().unwrap(),
        invoice.row.amount,
        invoice.row.due_date,
        invoice.status,
    )).collect();

    // The table starts at the third row and has a blank row inside
    assert_eq!(rows, vec![
        (4, "B12345674".to_owned(), dec!(1500.50), Date::from_ymd_opt(2024, 3, 15), InvoiceStatus::Valid),
        (5, "12345678Z".to_owned(), dec!(250.5), None, InvoiceStatus::Warning),
        (7, "A00000000".to_owned(), dec!(-100), None, InvoiceStatus::Warning),
    ]);

    assert_eq!(invoices[0].row.invoice_number.as_deref(), Some("F-001"));
    assert_eq!(invoices[1].row.payee_name.as_deref(), Some("Juan Pérez"));
    assert_eq!(invoices[1].validation_messages, vec!["invalid due date: 31/02/2024".to_owned()]);
    assert_eq!(invoices[2].validation_messages, vec!["missing bank account".to_owned()]);
}

#[test]
fn unreadable_data() {
    let error = invoices::import_invoices(b"definitely not a workbook", None, &ImportOptions::default()).unwrap_err();
    assert!(matches!(error, ImportError::UnrecognizedFormat(_)));
}
