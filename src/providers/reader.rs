use calamine::Range;
use log::{debug, info, trace, warn};

use crate::core::GenericResult;
use crate::formats::xls::{Cell, ColumnAliases, SheetReader, first_row_number, get_cell_text, get_optional_text, is_empty_row, open_first_sheet};

use super::{ProviderDirectory, ProviderRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProviderField {
    TaxId,
    Name,
    Address,
    City,
    PostalCode,
    Email,
    BankAccount,
    Phone,
    Country,
    Swift,
}

static PROVIDER_COLUMNS: ColumnAliases<ProviderField> = ColumnAliases::new(&[
    (ProviderField::TaxId, &["N.I.F.", "NIF", "CIF", "DNI", "CODIGO FISCAL"]),
    (ProviderField::Name, &["NOMBRE FISCAL", "NOMBRE", "RAZON SOCIAL", "TITULAR", "EMPRESA", "NAME", "PROVEEDOR"]),
    (ProviderField::Address, &["DOMICILIO", "DIRECCION", "ADDRESS"]),
    (ProviderField::City, &["POBLACION", "CIUDAD", "CITY", "LOCALIDAD"]),
    (ProviderField::PostalCode, &["COD. POSTAL", "COD POSTAL", "CP", "CODIGO POSTAL", "ZIP"]),
    (ProviderField::Email, &["E-MAIL", "EMAIL", "CORREO", "MAIL"]),
    (ProviderField::BankAccount, &["IBAN DEL BANCO", "IBAN", "CUENTA", "CCC", "NUMERO CUENTA"]),
    (ProviderField::Phone, &["TELEFONO", "PHONE", "MOVIL"]),
    (ProviderField::Country, &["PAIS", "COUNTRY"]),
    (ProviderField::Swift, &["SWIFT DEL BANCO", "SWIFT", "BIC"]),
], false);

/// Reads provider master data from the first worksheet of a workbook.
pub fn read_providers(data: &[u8]) -> GenericResult<ProviderDirectory> {
    let sheet = open_first_sheet(data)?;
    read_providers_sheet(sheet)
}

pub fn read_providers_sheet(sheet: Range<Cell>) -> GenericResult<ProviderDirectory> {
    let header_index = match find_header(&sheet) {
        Some(index) => index,
        None => {
            warn!("Unable to find provider table header (no tax id column title). Using the first row.");
            0
        },
    };

    let mut reader = SheetReader::new(sheet);

    let mapping = match reader.sheet().rows().nth(header_index) {
        Some(header) => PROVIDER_COLUMNS.map_columns(header),
        None => return Err!("The provider sheet is empty"),
    };

    if !mapping.contains(ProviderField::TaxId) {
        return Err!("Unable to find tax id column in the provider sheet");
    }

    reader.skip_rows(header_index + 1);

    let mut directory = ProviderDirectory::new();
    let mut count = 0;

    while let Some((row_id, row)) = reader.next_numbered_row() {
        if is_empty_row(row) {
            continue;
        }

        let text = |field| mapping.get(row, field).and_then(get_optional_text);

        let Some(tax_id) = text(ProviderField::TaxId) else {
            trace!("Row #{}: skipping provider without tax id.", row_id);
            continue;
        };

        let provider = ProviderRecord {
            tax_id,
            name: text(ProviderField::Name),
            email: text(ProviderField::Email),
            address: text(ProviderField::Address),
            city: text(ProviderField::City),
            postal_code: text(ProviderField::PostalCode),
            country: text(ProviderField::Country),
            bank_account: text(ProviderField::BankAccount),
            phone: text(ProviderField::Phone),
            swift: text(ProviderField::Swift),
        };

        trace!("Row #{}: {:?}.", row_id, provider);
        directory.insert(provider);
        count += 1;
    }

    info!("Read {} provider records ({} unique providers).", count, directory.len());
    Ok(directory)
}

fn find_header(sheet: &Range<Cell>) -> Option<usize> {
    let index = sheet.rows().position(|row| row.iter().any(|cell| {
        PROVIDER_COLUMNS.resolve(&get_cell_text(cell)) == Some(ProviderField::TaxId)
    }))?;

    debug!("Found provider table header at row #{}.", first_row_number(sheet) + index);
    Some(index)
}
