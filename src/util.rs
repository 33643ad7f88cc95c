use std::str::FromStr;

use rust_decimal::RoundingStrategy;

use crate::core::GenericResult;
use crate::types::{Date, Decimal};

/// Parses a decimal written with the Spanish convention: dot as thousands separator, comma as
/// decimal separator ("1.500,50" -> 1500.50).
pub fn parse_localized_decimal(string: &str) -> GenericResult<Decimal> {
    let normalized = string.trim().replace('.', "").replace(',', ".");
    Ok(Decimal::from_str(&normalized).map_err(|_| format!(
        "Invalid decimal value: {:?}", string))?)
}

pub fn round_to(value: Decimal, points: u32) -> Decimal {
    value.round_dp_with_strategy(points, RoundingStrategy::MidpointAwayFromZero)
}

pub fn parse_date(date: &str, format: &str) -> GenericResult<Date> {
    Ok(Date::parse_from_str(date, format).map_err(|_| format!(
        "Invalid date: {:?}", date))?)
}

pub fn parse_user_date(date: &str) -> GenericResult<Date> {
    let date = date.trim();

    // Datetime strings carry the date in the first 10 characters
    let date = match date.char_indices().nth(10) {
        Some((index, ' ' | 'T')) => &date[..index],
        _ => date,
    };

    for format in ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(parsed) = Date::parse_from_str(date, format) {
            return Ok(parsed);
        }
    }

    Err!("Invalid date: {:?}", date)
}

/// Strips everything that isn't significant for account number comparison.
pub fn normalize_account(account: &str) -> String {
    account.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use super::*;

    #[rstest]
    #[case("1.500,50", dec!(1500.50))]
    #[case("1500,5", dec!(1500.5))]
    #[case("-100", dec!(-100))]
    #[case("1.234.567", dec!(1234567))]
    #[case(" 42 ", dec!(42))]
    #[case("0,01", dec!(0.01))]
    fn localized_decimal(#[case] string: &str, #[case] expected: Decimal) {
        assert_eq!(parse_localized_decimal(string).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1,2,3")]
    #[case("-")]
    fn invalid_localized_decimal(#[case] string: &str) {
        assert!(parse_localized_decimal(string).is_err());
    }

    #[rstest]
    #[case("10/05/2024")]
    #[case("2024-05-10")]
    #[case("2024-05-10 00:00:00")]
    #[case("2024-05-10T00:00:00")]
    #[case("10-05-2024")]
    #[case("10.05.2024")]
    fn user_date(#[case] string: &str) {
        assert_eq!(parse_user_date(string).unwrap(), Date::from_ymd_opt(2024, 5, 10).unwrap());
    }

    #[test]
    fn invalid_user_date() {
        assert!(parse_user_date("31/02/2024").is_err());
        assert!(parse_user_date("soon").is_err());
        assert!(parse_user_date("").is_err());
    }

    #[test]
    fn account_normalization() {
        assert_eq!(normalize_account(" es60 0049 1500\t0512 3456 7892 "), "ES6000491500051234567892");
    }
}
