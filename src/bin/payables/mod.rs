mod action;
mod parser;

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use log::{error, info, warn};

use payables::Err;
use payables::checksum::{validate_bank_account, validate_tax_id};
use payables::config::Config;
use payables::core::{EmptyResult, GenericResult};
use payables::formatting;
use payables::invoices;
use payables::providers::{self, ProviderDirectory, ProviderRegistry};

use self::action::Action;
use self::parser::{GlobalOptions, Parser};

fn main() -> ExitCode {
    let mut parser = Parser::new();

    let global = match parser.parse_global() {
        Ok(global) => global,
        Err(err) => {
            let _ = writeln!(io::stderr(), "{err}.");
            return ExitCode::FAILURE;
        },
    };

    if let Err(err) = easy_logging::init(module_path!(), global.log_level) {
        let _ = writeln!(io::stderr(), "Failed to initialize the logging: {err}.");
        return ExitCode::FAILURE;
    }

    if let Err(err) = run(global, parser) {
        let message = err.to_string();

        if message.contains('\n') {
            error!("{err}");
        } else {
            error!("{err}.");
        }

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(global: GlobalOptions, parser: Parser) -> EmptyResult {
    let config = Config::new(&global.config_dir)?;
    let action = parser.parse()?;

    match action {
        Action::Import {path, providers, json} => {
            let providers_path = providers.or_else(|| config.providers.as_ref().map(Into::into));

            let directory = match providers_path {
                Some(path) => Some(load_providers(&path)?),
                None => {
                    warn!("No provider master sheet is specified. Invoices won't be enriched.");
                    None
                },
            };

            let data = read_file(&path)?;
            let registry = directory.as_ref().map(|directory| directory as &dyn ProviderRegistry);
            let import = invoices::import_invoices(&data, registry, &config.import_options())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&import)?);
            } else {
                formatting::print_import(&import);
            }
        },

        Action::Providers(path) => {
            let directory = load_providers(&path)?;
            formatting::print_providers(&directory);
        },

        Action::CheckBankAccount(value) => check("bank account", &value, validate_bank_account(&value))?,
        Action::CheckTaxId(value) => check("tax id", &value, validate_tax_id(&value))?,
    };

    Ok(())
}

fn load_providers(path: &Path) -> GenericResult<ProviderDirectory> {
    let data = read_file(path)?;
    let directory = providers::read_providers(&data).map_err(|e| format!(
        "Failed to read provider master sheet from {:?}: {}", path, e))?;

    info!("Loaded {} providers from {:?}.", directory.len(), path);
    Ok(directory)
}

fn read_file(path: &Path) -> GenericResult<Vec<u8>> {
    Ok(fs::read(path).map_err(|e| format!("Unable to read {:?}: {}", path, e))?)
}

fn check(name: &str, value: &str, valid: bool) -> EmptyResult {
    if !valid {
        return Err!("{:?} is not a valid {}", value, name);
    }

    println!("{:?} is a valid {}.", value, name);
    Ok(())
}
