//! Layered error types
//!
//! Segmentation itself cannot fail; errors only arise while loading input
//! or validating configuration.

use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),

    /// Encoding error (UTF-8, etc.)
    #[error("encoding error: {0}")]
    EncodingError(String),

    /// Layout JSON could not be decoded
    #[error("invalid layout document: {0}")]
    InvalidDocument(String),

    /// Page map could not be parsed or contains invalid pages
    #[error("invalid page map: {reason}")]
    InvalidPageMap {
        /// Why the page map was rejected
        reason: String,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for EngineError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        EngineError::EncodingError(err.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::InvalidDocument(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidPageMap {
            reason: "page 0".to_string(),
        };
        assert_eq!(err.to_string(), "invalid page map: page 0");

        let err = EngineError::ConfigError("empty variant".to_string());
        assert_eq!(err.to_string(), "invalid configuration: empty variant");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: EngineError = json_err.into();
        assert!(matches!(err, EngineError::InvalidDocument(_)));
    }
}
