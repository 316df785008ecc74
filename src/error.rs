//! Error types for the hand gesture library.
//!
//! The per-frame classifier never fails; these errors only surface at the
//! edges of the crate (frame construction, configuration, recorded streams).

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Position filter initialization error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// A recorded landmark stream line could not be used
    #[error("Replay error at line {line}: {message}")]
    ReplayError {
        /// 1-based line number in the recording
        line: usize,
        /// What was wrong with the line
        message: String,
    },
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
