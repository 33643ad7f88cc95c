use std::path::PathBuf;

pub enum Action {
    Import {
        path: PathBuf,
        providers: Option<PathBuf>,
        json: bool,
    },
    Providers(PathBuf),

    CheckBankAccount(String),
    CheckTaxId(String),
}
