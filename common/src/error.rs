//! Configuration error types.
//!
//! Every binary in the workspace reads its settings from the environment;
//! this is the error they all report when a value is missing or malformed.

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A URL value could not be parsed
    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl {
        /// Variable name
        field: String,
        /// Parser message
        reason: String,
    },

    /// A required value is absent or blank
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    /// A value is present but cannot be parsed
    #[error("Failed to parse environment variable {name}: {reason}")]
    ParseError {
        /// Variable name
        name: String,
        /// Parser message
        reason: String,
    },

    /// Tracing subscriber could not be installed
    #[error("Failed to initialize tracing: {0}")]
    Tracing(String),
}

impl ConfigError {
    /// Create a missing required error for the given variable.
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingRequired(name.into())
    }

    /// Create a parse error for the given variable.
    #[must_use]
    pub fn parse(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseError {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if the error was caused by the operator leaving something unset.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::MissingRequired(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::missing("BOOKSTORE_CLIENT_NAME");
        assert_eq!(
            err.to_string(),
            "Missing required configuration: BOOKSTORE_CLIENT_NAME"
        );

        let err = ConfigError::parse("BOOKSTORE_HTTP_TIMEOUT_SECS", "invalid digit");
        assert_eq!(
            err.to_string(),
            "Failed to parse environment variable BOOKSTORE_HTTP_TIMEOUT_SECS: invalid digit"
        );
    }

    #[test]
    fn test_is_missing() {
        assert!(ConfigError::missing("X").is_missing());
        assert!(!ConfigError::parse("X", "bad").is_missing());
        assert!(!ConfigError::Tracing("already set".to_string()).is_missing());
    }
}
