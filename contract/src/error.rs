//! Contract runner error types.
//!
//! These are the errors that stop a run or reject a suite. Assertion
//! failures inside a step are not errors; they are recorded as
//! [`Failure`](crate::Failure) values on the step outcome.

use crate::context::ContextKey;
use thiserror::Error;

/// Errors produced while preparing or setting up a contract run.
#[derive(Error, Debug)]
pub enum ContractError {
    /// Client registration answered with a non-2xx status
    #[error("Client registration failed with status {status}: {body}")]
    Registration {
        /// HTTP status returned by the registration endpoint
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Client registration succeeded but returned no usable token
    #[error("Client registration response has no accessToken")]
    MissingToken,

    /// The request could not be delivered or the response not read
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Session context misuse
    #[error(transparent)]
    Context(#[from] ContextError),

    /// A schema definition did not compile
    #[error("Invalid schema {name}: {reason}")]
    InvalidSchema {
        /// Schema name
        name: String,
        /// Compiler message
        reason: String,
    },

    /// A suite is not runnable as declared
    #[error("Invalid suite: {0}")]
    InvalidSuite(String),

    /// A URL could not be built from the base URL and a path
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for contract runner operations.
pub type ContractResult<T> = Result<T, ContractError>;

impl ContractError {
    /// Check if the error means client setup failed.
    ///
    /// Setup failures cause every step that needs the access token to be skipped.
    #[must_use]
    pub const fn is_setup_failure(&self) -> bool {
        matches!(
            self,
            Self::Registration { .. } | Self::MissingToken | Self::Transport(_) | Self::Serialization(_)
        )
    }

    /// Create an invalid suite error.
    #[must_use]
    pub fn invalid_suite(msg: impl Into<String>) -> Self {
        Self::InvalidSuite(msg.into())
    }

    /// Create an invalid schema error.
    #[must_use]
    pub fn invalid_schema(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by [`SessionContext`](crate::SessionContext).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// A template references a key that has not been written yet
    #[error("Session context has no value for {0}")]
    Missing(ContextKey),

    /// A key was written twice
    #[error("Session context value {0} is already set")]
    AlreadySet(ContextKey),

    /// A template placeholder names no known key
    #[error("Unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),

    /// A value would escape its path segment (empty, `.` or `..`)
    #[error("Session context value {0} cannot be used as a path segment")]
    UnsafePathSegment(ContextKey),
}
