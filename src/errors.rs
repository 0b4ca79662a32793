use crate::calendar::Month;
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use thiserror::Error;

/// Reasons an irradiation table could not be turned into monthly averages.
#[derive(Debug, Error)]
pub enum IrradiationLoadError {
    #[error("The file {} was not found.", .0.display())]
    FileNotFound(PathBuf),
    #[error("Could not read irradiation file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse irradiation CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not read irradiation workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Unsupported irradiation file format: {0}")]
    UnsupportedFormat(String),
    #[error("The irradiation workbook contains no sheets")]
    NoSheets,
    #[error("The irradiation table has no column for {}", .0.abbreviation().to_uppercase())]
    MissingMonthColumn(Month),
    #[error("The irradiation table has no data rows")]
    NoDataRows,
    #[error("Invalid irradiation value '{value}' for {month} in data row {row}")]
    InvalidValue {
        month: Month,
        row: usize,
        value: String,
    },
}

/// Failures when acquiring monthly consumption readings.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Input ended before a consumption value for {0} was entered")]
    InputClosed(Month),
    #[error("Could not read consumption input: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse consumption CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Consumption file needs a 'month' column and a 'kwh' column")]
    MissingColumns,
    #[error("Consumption file contains invalid entries:\n{}", list_readings(.0))]
    InvalidReadings(Vec<InvalidReading>),
}

fn list_readings(readings: &[InvalidReading]) -> String {
    readings
        .iter()
        .map(|reading| format!("  - {reading}"))
        .join("\n")
}

/// Why a single answer to a consumption prompt was rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ReadingError {
    #[error("Error: value cannot be negative.")]
    Negative,
    #[error("Error: enter a valid number (use '.' for decimals).")]
    NotANumber,
}

/// One invalid entry found while validating a batch consumption file.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidReading {
    UnknownMonth { line: u64, value: String },
    DuplicateMonth { line: u64, month: Month },
    Rejected { line: u64, month: Month, value: String, reason: ReadingError },
    Malformed { line: u64 },
    MissingMonth(Month),
}

impl Display for InvalidReading {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidReading::UnknownMonth { line, value } => {
                write!(f, "line {line}: '{value}' is not a month")
            }
            InvalidReading::DuplicateMonth { line, month } => {
                write!(f, "line {line}: {month} appears more than once")
            }
            InvalidReading::Rejected {
                line,
                month,
                value,
                reason,
            } => match reason {
                ReadingError::Negative => {
                    write!(f, "line {line}: {month} value {value} is negative")
                }
                ReadingError::NotANumber => {
                    write!(f, "line {line}: {month} value '{value}' is not a number")
                }
            },
            InvalidReading::Malformed { line } => {
                write!(f, "line {line}: expected a month and a consumption value")
            }
            InvalidReading::MissingMonth(month) => write!(f, "no value given for {month}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Could not read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse configuration file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration is invalid: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
#[error("Could not render chart to {}: {}", .path.display(), .message)]
pub struct ChartError {
    path: PathBuf,
    message: String,
}

impl ChartError {
    pub(crate) fn new(path: PathBuf, error: impl Display) -> Self {
        Self {
            path,
            message: error.to_string(),
        }
    }
}
