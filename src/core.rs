use std::fmt;

pub type EmptyResult = GenericResult<()>;
pub type GenericResult<T> = Result<T, GenericError>;
pub type GenericError = Box<dyn ::std::error::Error + Send + Sync>;

#[cfg(test)]
macro_rules! s {
    ($e:expr) => ($e.to_owned())
}

#[macro_export]
macro_rules! Err {
    ($($arg:tt)*) => (::std::result::Result::Err(format!($($arg)*).into()))
}

/// The only error an import surfaces to its caller: the data can't be read as a spreadsheet at
/// all. Everything that goes wrong inside a readable sheet is reported through row statuses.
#[derive(Debug)]
pub enum ImportError {
    UnrecognizedFormat(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnrecognizedFormat(reason) => write!(
                f, "Invalid file: unable to read it as a spreadsheet: {}", reason),
        }
    }
}

impl std::error::Error for ImportError {}
