// crates/orderboard-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file could not be parsed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("order {order_id}: {field} '{value}' is not a DD.MM.YYYY date")]
    InvalidDate {
        order_id: i64,
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("day number {0} is outside the supported calendar range")]
    DateOutOfRange(i32),

    #[error("column {column} has no value in row {row}")]
    MissingValue { column: &'static str, row: usize },

    #[error("cannot summarize an empty order table")]
    EmptyDataset,

    #[error("unknown locale '{0}' (expected 'en' or 'de')")]
    UnknownLocale(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
