//! Error handling for the CLI application

use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// File not found or inaccessible
    #[error("File not found: {0}")]
    FileNotFound(String),
    /// Invalid file pattern
    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Segmentation error from the engine
    #[error("Processing error: {0}")]
    ProcessingError(String),
}

impl From<folio_engine::EngineError> for CliError {
    fn from(err: folio_engine::EngineError) -> Self {
        match err {
            folio_engine::EngineError::ConfigError(msg) => CliError::ConfigError(msg),
            folio_engine::EngineError::InvalidPageMap { reason } => {
                CliError::ConfigError(format!("page map: {reason}"))
            }
            other => CliError::ProcessingError(other.to_string()),
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
