use crate::formats::xls::ColumnAliases;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceField {
    InvoiceNumber,
    Amount,
    DueDate,
    DeferralDate,
    TaxId,
    Name,
    BankAccount,
    Email,
    Address,
    City,
    PostalCode,
    Country,
    Phone,
}

pub static INVOICE_COLUMNS: ColumnAliases<InvoiceField> = ColumnAliases::new(&[
    (InvoiceField::InvoiceNumber, &["FACTURA", "NUMERO", "NUM FACTURA", "REF", "INVOICE"]),
    (InvoiceField::Amount, &["IMPORTE", "TOTAL", "AMOUNT", "PRECIO"]),
    (InvoiceField::DueDate, &["FECHA PAGO", "VENCIMIENTO", "FECHA", "DATE", "FECHA DE VENCIMIENTO"]),
    (InvoiceField::DeferralDate, &["APLAZAMIENTO", "FECHA APLAZAMIENTO", "DEFERRAL"]),
    (InvoiceField::TaxId, &["CIF", "NIF"]),
    (InvoiceField::Name, &["NOMBRE", "PROVEEDOR", "NAME"]),
    (InvoiceField::BankAccount, &["IBAN", "CUENTA", "ACCOUNT"]),
    (InvoiceField::Email, &["EMAIL", "CORREO", "MAIL", "E-MAIL"]),
    (InvoiceField::Address, &["DIRECCION", "ADDRESS", "DOMICILIO"]),
    (InvoiceField::City, &["POBLACION", "CIUDAD", "CITY", "MUNICIPIO"]),
    (InvoiceField::PostalCode, &["CP", "ZIP", "CODIGO POSTAL", "POSTAL"]),
    (InvoiceField::Country, &["PAIS", "COUNTRY", "NACION"]),
    (InvoiceField::Phone, &["TELEFONO", "PHONE", "MOVIL"]),
], true);

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use crate::formats::xls::Cell;
    use super::*;

    #[rstest]
    #[case("NIF")]
    #[case("CIF")]
    #[case("N.I.F.")]
    #[case("c.i.f.")]
    #[case("NIF Proveedor")]
    fn tax_id_aliases(#[case] title: &str) {
        assert_eq!(INVOICE_COLUMNS.resolve(title), Some(InvoiceField::TaxId));
    }

    #[rstest]
    #[case("Nº Factura", InvoiceField::InvoiceNumber)]
    #[case("Importe total", InvoiceField::Amount)]
    #[case("Fecha_Pago", InvoiceField::DueDate)]
    #[case("Fecha de vencimiento", InvoiceField::DueDate)]
    #[case("Fecha aplazamiento", InvoiceField::DeferralDate)]
    #[case("Razón social / Nombre", InvoiceField::Name)]
    #[case("IBAN", InvoiceField::BankAccount)]
    #[case("E-mail", InvoiceField::Email)]
    #[case("Dirección", InvoiceField::Address)]
    #[case("Población", InvoiceField::City)]
    #[case("Código postal", InvoiceField::PostalCode)]
    #[case("País", InvoiceField::Country)]
    #[case("Teléfono", InvoiceField::Phone)]
    fn aliases(#[case] title: &str, #[case] expected: InvoiceField) {
        assert_eq!(INVOICE_COLUMNS.resolve(title), Some(expected));
    }

    #[test]
    fn deferral_date_is_not_taken_for_due_date() {
        let header: Vec<Cell> = ["FECHA APLAZAMIENTO", "VENCIMIENTO"].iter()
            .map(|title| Cell::String(s!(*title)))
            .collect();

        let mapping = INVOICE_COLUMNS.map_columns(&header);
        assert_eq!(mapping.column_id(InvoiceField::DeferralDate), Some(0));
        assert_eq!(mapping.column_id(InvoiceField::DueDate), Some(1));
    }
}
