use chrono::Duration;
use num_traits::cast::FromPrimitive;

use crate::types::{Date, Decimal};
use crate::util;

pub use calamine::Data as Cell;

/// Renders a cell the way it's shown to a user: trimmed text, integral numbers without a
/// fractional part and dates in dd/mm/yyyy format.
pub fn get_cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Empty | Cell::Error(_) => String::new(),
        Cell::String(value) => value.trim().to_owned(),
        Cell::Int(value) => value.to_string(),
        Cell::Float(value) => {
            if value.fract() == 0.0 && value.abs() < 1e15 {
                format!("{}", *value as i64)
            } else {
                value.to_string()
            }
        },
        Cell::Bool(value) => value.to_string(),
        Cell::DateTime(value) => match excel_serial_to_date(value.as_f64()) {
            Some(date) => date.format("%d/%m/%Y").to_string(),
            None => value.as_f64().to_string(),
        },
        Cell::DateTimeIso(value) | Cell::DurationIso(value) => value.trim().to_owned(),
    }
}

pub fn get_optional_text(cell: &Cell) -> Option<String> {
    let text = get_cell_text(cell);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Returns the value of a cell that holds a number natively (not as text).
pub fn get_numeric_cell(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Int(value) => Decimal::from_i64(*value),
        Cell::Float(value) => Decimal::from_f64(*value),
        _ => None,
    }
}

pub fn is_integer_cell(cell: &Cell) -> bool {
    match cell {
        Cell::Int(_) => true,
        Cell::Float(value) => value.fract() == 0.0,
        Cell::String(value) => {
            let value = value.trim();
            !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
        },
        _ => false,
    }
}

pub fn get_date_cell(cell: &Cell) -> Option<Date> {
    match cell {
        Cell::DateTime(value) => excel_serial_to_date(value.as_f64()),
        Cell::DateTimeIso(value) | Cell::String(value) => util::parse_user_date(value).ok(),
        _ => None,
    }
}

fn excel_serial_to_date(serial: f64) -> Option<Date> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }

    let epoch = Date::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}
