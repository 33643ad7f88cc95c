use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, ArgMatches};

use payables::{Err, cli};
use payables::core::GenericResult;

use super::action::Action;

const DEFAULT_CONFIG_DIR_PATH: &str = "~/.payables";

pub struct Parser {
    matches: Option<ArgMatches>,
}

pub struct GlobalOptions {
    pub log_level: log::Level,
    pub config_dir: String,
}

impl Parser {
    pub fn new() -> Parser {
        Parser {matches: None}
    }

    pub fn parse_global(&mut self) -> GenericResult<GlobalOptions> {
        let app = cli::new_app("payables", "Imports and validates payable invoice spreadsheets")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg_required_else_help(true)
            .args([
                cli::new_arg("config", "Configuration directory path [default: ~/.payables]")
                    .short('c').long("config")
                    .value_name("PATH")
                    .global(true),

                cli::new_arg("verbose", "Set verbosity level")
                    .short('v').long("verbose")
                    .action(ArgAction::Count)
                    .global(true),
            ])

            .subcommand(cli::new_subcommand(
                "import", "Import invoices from a spreadsheet")
                .long_about("\
                    Reads invoices from an Excel workbook (either a flat table or a hierarchical \
                    payment report), enriches them with provider master data and validates tax ids \
                    and bank accounts.")
                .args([
                    cli::new_arg("providers", "Provider master sheet to enrich the invoices with")
                        .short('p').long("providers")
                        .value_name("PATH"),

                    cli::new_arg("json", "Output the result as JSON")
                        .long("json")
                        .action(ArgAction::SetTrue),

                    spreadsheet_arg(),
                ]))

            .subcommand(cli::new_subcommand(
                "providers", "Show provider master data read from a spreadsheet")
                .arg(spreadsheet_arg()))

            .subcommand(cli::new_subcommand(
                "check-iban", "Validate a bank account number")
                .arg(cli::new_arg("VALUE", "Bank account number (IBAN)").required(true)))

            .subcommand(cli::new_subcommand(
                "check-tax-id", "Validate a Spanish tax id (NIF, NIE or CIF)")
                .arg(cli::new_arg("VALUE", "Tax id").required(true)));

        let matches = app.get_matches();

        let log_level = match matches.get_count("verbose") {
            0 => log::Level::Info,
            1 => log::Level::Debug,
            2 => log::Level::Trace,
            _ => return Err!("Invalid verbosity level"),
        };

        let config_dir = matches.get_one::<String>("config").cloned().unwrap_or_else(||
            shellexpand::tilde(DEFAULT_CONFIG_DIR_PATH).to_string());

        self.matches = Some(matches);

        Ok(GlobalOptions {log_level, config_dir})
    }

    pub fn parse(mut self) -> GenericResult<Action> {
        let matches = self.matches.take().ok_or("Command line arguments aren't parsed yet")?;
        let (command, matches) = matches.subcommand().ok_or("No command is specified")?;

        Ok(match command {
            "import" => {
                let path = get_path(matches, "PATH")?;
                check_spreadsheet_extension(&path)?;

                Action::Import {
                    path,
                    providers: matches.get_one::<String>("providers").map(PathBuf::from),
                    json: matches.get_flag("json"),
                }
            },
            "providers" => Action::Providers(get_path(matches, "PATH")?),

            "check-iban" => Action::CheckBankAccount(get_value(matches)?),
            "check-tax-id" => Action::CheckTaxId(get_value(matches)?),

            _ => return Err!("Unknown command: {}", command),
        })
    }
}

fn spreadsheet_arg() -> Arg {
    cli::new_arg("PATH", "Path to the spreadsheet (*.xlsx or *.xls)").required(true)
}

fn get_path(matches: &ArgMatches, name: &str) -> GenericResult<PathBuf> {
    Ok(matches.get_one::<String>(name).map(PathBuf::from).ok_or_else(|| format!(
        "{name} argument is missing"))?)
}

fn get_value(matches: &ArgMatches) -> GenericResult<String> {
    Ok(matches.get_one::<String>("VALUE").cloned().ok_or("Value is missing")?)
}

fn check_spreadsheet_extension(path: &Path) -> GenericResult<()> {
    let extension = path.extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("xlsx" | "xls") => Ok(()),
        _ => Err!("Invalid file: {:?}. Only Excel spreadsheets (*.xlsx or *.xls) are supported", path),
    }
}
