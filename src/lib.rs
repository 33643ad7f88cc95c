#[macro_use] pub mod core;

pub mod checksum;
pub mod cli;
pub mod config;
pub mod formats;
pub mod formatting;
pub mod invoices;
pub mod providers;
pub mod types;
pub mod util;
