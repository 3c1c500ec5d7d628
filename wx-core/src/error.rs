/// Error types for the weather core library
use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for weather data operations
#[derive(Error, Debug)]
pub enum WeatherError {
    /// A row's date text could not be interpreted as a calendar date
    #[error("Invalid date format: {0:?}")]
    InvalidDateFormat(String),

    /// A temperature field was not an integer (strict ingest only)
    #[error("Invalid temperature in column {column}: {value:?}")]
    InvalidTemperature { column: String, value: String },

    /// The interval selected no records
    #[error("No records between {start} and {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },

    /// City code is not in the configured city table
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),
}

/// Type alias for Results using WeatherError
pub type Result<T> = std::result::Result<T, WeatherError>;
