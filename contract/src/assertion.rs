//! Literal and status assertions on a captured response.

use crate::report::Failure;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// What the response status must look like.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "code")]
pub enum StatusExpectation {
    /// Exactly this code
    Exact(u16),
    /// Any 2xx code
    #[default]
    Success,
    /// Any code outside 2xx
    Failure,
}

impl StatusExpectation {
    /// Check a status code against the expectation.
    #[must_use]
    pub const fn matches(self, status: u16) -> bool {
        let success = status >= 200 && status < 300;
        match self {
            Self::Exact(code) => code == status,
            Self::Success => success,
            Self::Failure => !success,
        }
    }

    /// Evaluate against a status code.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::Status`] on mismatch.
    pub fn check(self, status: u16) -> Result<(), Failure> {
        if self.matches(status) {
            Ok(())
        } else {
            Err(Failure::Status {
                expected: self.to_string(),
                actual: status,
            })
        }
    }
}

impl fmt::Display for StatusExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(code) => write!(f, "{code}"),
            Self::Success => f.write_str("2xx"),
            Self::Failure => f.write_str("non-2xx"),
        }
    }
}

/// How a field value is compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Matcher {
    /// JSON equality with a literal
    Equals(Value),
    /// A string with at least one non-whitespace character
    NonEmptyString,
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals(v) => write!(f, "{v}"),
            Self::NonEmptyString => f.write_str("a non-empty string"),
        }
    }
}

/// One assertion on a field of the response body, addressed by JSON pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAssertion {
    /// JSON pointer into the body, e.g. `/orderId`
    pub pointer: String,
    /// Expected value
    pub matcher: Matcher,
}

impl FieldAssertion {
    /// Field must equal `expected`.
    #[must_use]
    pub fn equals(pointer: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self {
            pointer: pointer.into(),
            matcher: Matcher::Equals(expected.into()),
        }
    }

    /// Field must be a non-empty string.
    #[must_use]
    pub fn non_empty_string(pointer: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            matcher: Matcher::NonEmptyString,
        }
    }

    /// Evaluate against a response body.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::Field`] carrying the actual value (if any) on mismatch.
    pub fn check(&self, body: Option<&Value>) -> Result<(), Failure> {
        let actual = body.and_then(|b| b.pointer(&self.pointer));
        let ok = match (&self.matcher, actual) {
            (Matcher::Equals(expected), Some(actual)) => expected == actual,
            (Matcher::NonEmptyString, Some(Value::String(s))) => !s.trim().is_empty(),
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(Failure::Field {
                pointer: self.pointer.clone(),
                expected: self.matcher.to_string(),
                actual: actual.cloned(),
            })
        }
    }
}
