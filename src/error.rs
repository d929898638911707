//! Error types for the rental preprocessing pipeline

use thiserror::Error;

/// Result type alias for preprocessing operations
pub type Result<T> = std::result::Result<T, PreprocessError>;

/// Main error type for the preprocessing pipeline
#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Pipeline not fitted")]
    NotFitted,

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<polars::error::PolarsError> for PreprocessError {
    fn from(err: polars::error::PolarsError) -> Self {
        PreprocessError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for PreprocessError {
    fn from(err: serde_json::Error) -> Self {
        PreprocessError::SerializationError(err.to_string())
    }
}
