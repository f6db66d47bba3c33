use thiserror::Error;

/// invsum error types
#[derive(Error, Debug)]
pub enum InvsumError {
    /// HTTP failure surviving the retry budget, or a non-retryable 4xx
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Required schema columns missing entirely from the payload header
    #[error("missing required columns: {0}")]
    MissingColumn(String),

    /// Every row of a non-empty payload was individually rejected
    #[error("all {0} rows were rejected during normalization")]
    AllRowsRejected(usize),

    /// Payload-level CSV failure (unreadable header)
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for invsum
pub type Result<T> = std::result::Result<T, InvsumError>;
