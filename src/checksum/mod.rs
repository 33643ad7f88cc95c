//! Checksum validation of payment identifiers.
//!
//! Both validators are total: any input, including empty, non-ASCII or absurdly long strings,
//! yields `true` or `false`.

mod iban;
mod tax_id;

pub use self::iban::validate_bank_account;
pub use self::tax_id::validate_tax_id;
