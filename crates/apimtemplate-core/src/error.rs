//! Error handling for the apimtemplate library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! # Examples
//!
//! ```
//! use apimtemplate_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     // Operations that might fail...
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type for template generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for template generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// OpenAPI loading error
    #[error("OpenAPI error: {0}")]
    OpenApi(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation in the source document lacks data the conversion requires
    #[error("Malformed input at {method} {path}: {reason}")]
    MalformedInput {
        /// URL path key of the offending operation
        path: String,
        /// HTTP method of the offending operation
        method: String,
        /// What is missing or has the wrong shape
        reason: String,
    },
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OpenAPI error
    pub fn openapi<S: Into<String>>(msg: S) -> Self {
        Self::OpenApi(msg.into())
    }

    /// Create a new malformed input error for the operation at `method path`
    pub fn malformed<P, M, R>(path: P, method: M, reason: R) -> Self
    where
        P: Into<String>,
        M: Into<String>,
        R: Into<String>,
    {
        Self::MalformedInput {
            path: path.into(),
            method: method.into(),
            reason: reason.into(),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Config(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Config(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_input_message_locates_operation() {
        let err = Error::malformed("/pets/{id}", "Get", "parameter 'id' has no schema");
        assert_eq!(
            err.to_string(),
            "Malformed input at Get /pets/{id}: parameter 'id' has no schema"
        );
    }

    #[test]
    fn test_string_conversion_is_config_error() {
        let err: Error = "bad value".into();
        assert!(matches!(err, Error::Config(ref s) if s == "bad value"));
    }
}
