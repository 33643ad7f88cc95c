pub use chrono::NaiveDate as Date;
pub use rust_decimal::Decimal as Decimal;
