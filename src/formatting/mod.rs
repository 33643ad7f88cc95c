use crate::types::{Date, Decimal};
use crate::util;

pub mod table;

mod report;

pub use self::report::{print_import, print_providers};

pub fn format_date(date: Date) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", util::round_to(amount, 2))
}
