//! Error type for the fallible edges of the crate (reference data loading,
//! schedule validation). Projection arithmetic itself never fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid contribution schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid tax brackets for {status}: {reason}")]
    InvalidBrackets { status: String, reason: String },

    #[error("Unknown filing status: {0}")]
    UnknownFilingStatus(String),

    #[error("Unknown policy constant: {0}")]
    UnknownConstant(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
