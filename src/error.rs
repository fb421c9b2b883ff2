use thiserror::Error;

#[derive(Error, Debug)]
pub enum BiasError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Mode Mismatch: {operation} requires {expected} mode")]
    ModeMismatch {
        operation: &'static str,
        expected: &'static str,
    },

    #[error("Entry index {index} out of range (history has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Division by zero: {0}")]
    DivisionByZero(&'static str),
}

pub type BiasResult<T> = Result<T, BiasError>;
