use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::core::GenericResult;
use crate::invoices::{DEFAULT_COUNTRY, DEFAULT_SCAN_ROWS, ImportOptions, PLACEHOLDER_EMAILS};

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Provider master sheet used for enrichment when no other one is specified.
    pub providers: Option<String>,

    #[serde(default = "default_scan_rows")]
    pub scan_rows: usize,

    #[serde(default = "default_country")]
    pub default_country: String,

    /// Extends the built-in list of placeholder emails.
    #[serde(default)]
    pub placeholder_emails: Vec<String>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            providers: None,
            scan_rows: default_scan_rows(),
            default_country: default_country(),
            placeholder_emails: Vec::new(),
        }
    }
}

impl Config {
    /// Loads config.yaml from the configuration directory. A missing file means the default
    /// configuration.
    pub fn new(config_dir: &str) -> GenericResult<Config> {
        let path = Path::new(config_dir).join("config.yaml");

        match load_config(&path) {
            Ok(config) => Ok(config),
            Err(err) => {
                if let Some(io_err) = err.downcast_ref::<io::Error>() {
                    if io_err.kind() == io::ErrorKind::NotFound {
                        debug!("{} doesn't exist. Using the default configuration.", path.display());
                        return Ok(Config::default());
                    }
                }
                Err!("Error while reading {:?} configuration file: {}", path, err)
            },
        }
    }

    pub fn import_options(&self) -> ImportOptions {
        let mut placeholder_emails: Vec<String> = PLACEHOLDER_EMAILS.iter().map(|&email| email.to_owned()).collect();
        placeholder_emails.extend(self.placeholder_emails.iter().cloned());

        ImportOptions {
            scan_rows: self.scan_rows,
            default_country: self.default_country.clone(),
            placeholder_emails,
        }
    }
}

pub fn load_config(path: &Path) -> GenericResult<Config> {
    let mut data = Vec::new();
    File::open(path)?.read_to_end(&mut data)?;

    let mut config: Config = if data.iter().all(u8::is_ascii_whitespace) {
        Config::default()
    } else {
        serde_yaml::from_slice(&data)?
    };

    if config.scan_rows == 0 {
        return Err!("Invalid scan_rows value: it must be positive");
    }

    config.default_country = config.default_country.trim().to_uppercase();
    if config.default_country.len() != 2 || !config.default_country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err!("Invalid default country: {:?}", config.default_country);
    }

    if let Some(path) = config.providers.as_mut() {
        *path = shellexpand::tilde(path).to_string();
    }

    Ok(config)
}

fn default_scan_rows() -> usize {
    DEFAULT_SCAN_ROWS
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_owned()
}
