use std::error::Error;
use std::fmt;
use std::fmt::Formatter;

use calamine::Error as SpreadsheetError;

#[derive(Debug)]
pub enum LoadError {
    Unreadable(SpreadsheetError),
    EmptyWorkbook,
    MissingColumns {
        missing: Vec<&'static str>,
        found: Vec<String>,
    },
}

impl From<SpreadsheetError> for LoadError {
    fn from(error: SpreadsheetError) -> Self {
        LoadError::Unreadable(error)
    }
}

impl Error for LoadError {}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Unreadable(err) => write!(f, "failed to read schedule: {}", err),
            LoadError::EmptyWorkbook => write!(f, "schedule file has no worksheets"),
            LoadError::MissingColumns { missing, found } => write!(
                f,
                "schedule is missing columns: {}. Found columns: {}",
                missing.join(", "),
                found.join(", ")
            ),
        }
    }
}
