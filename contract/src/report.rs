//! Step outcomes and the suite report.

use crate::context::ContextKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Why a step failed.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Failure {
    /// Status code mismatch
    #[error("expected status {expected}, got {actual}")]
    Status {
        /// Expected status, e.g. `201` or `2xx`
        expected: String,
        /// Received status
        actual: u16,
    },

    /// Literal field mismatch
    #[error("field {pointer}: expected {expected}, got {}", display_actual(.actual.as_ref()))]
    Field {
        /// JSON pointer of the field
        pointer: String,
        /// Expected value, rendered
        expected: String,
        /// Received value, if the field exists
        actual: Option<Value>,
    },

    /// Schema conformance failure
    #[error("schema {schema}: {}", .violations.join("; "))]
    Schema {
        /// Schema name
        schema: String,
        /// Validator messages
        violations: Vec<String>,
    },

    /// Body was expected to be empty
    #[error("expected an empty body, got {actual:?}")]
    UnexpectedBody {
        /// Received body text
        actual: String,
    },

    /// Body is not JSON but the step asserts on it
    #[error("response body is not JSON: {reason}")]
    NotJson {
        /// Parser message
        reason: String,
    },

    /// Extraction found nothing usable
    #[error("cannot extract {key} from {pointer}")]
    Extraction {
        /// JSON pointer of the field
        pointer: String,
        /// Destination key
        key: ContextKey,
    },

    /// A value the step needs was never produced
    #[error("missing dependency {key}; request not sent")]
    MissingDependency {
        /// Key with no value
        key: ContextKey,
    },

    /// The request could not be sent or the response not read
    #[error("transport error: {message}")]
    Transport {
        /// Client error message
        message: String,
    },

    /// The request could not be built
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Build error message
        message: String,
    },
}

fn display_actual(actual: Option<&Value>) -> String {
    actual.map_or_else(|| "nothing".to_string(), ToString::to_string)
}

/// Final state of one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum StepStatus {
    /// Every assertion held
    Passed,
    /// At least one assertion failed
    Failed {
        /// All failures, in evaluation order
        failures: Vec<Failure>,
    },
    /// Never sent
    Skipped {
        /// Reason the step was skipped
        reason: String,
    },
}

/// Status and body of a response, as seen by the runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedResponse {
    /// HTTP status
    pub status: u16,
    /// Parsed JSON body, `None` when empty or not JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// Result of running one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Step name
    pub name: String,
    /// Final state
    #[serde(flatten)]
    pub status: StepStatus,
    /// Response, when one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<CapturedResponse>,
    /// Wall-clock time spent on the step
    pub elapsed_ms: u64,
}

impl StepOutcome {
    /// Build a skipped outcome.
    #[must_use]
    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: StepStatus::Skipped {
                reason: reason.into(),
            },
            response: None,
            elapsed_ms: 0,
        }
    }

    /// Check if the step passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.status, StepStatus::Passed)
    }

    /// Check if the step was skipped.
    #[must_use]
    pub const fn was_skipped(&self) -> bool {
        matches!(self.status, StepStatus::Skipped { .. })
    }

    /// Failures recorded for the step (empty unless it failed).
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        match &self.status {
            StepStatus::Failed { failures } => failures,
            _ => &[],
        }
    }
}

/// Result of a whole suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite name
    pub suite: String,
    /// Whether the run passed
    pub ok: bool,
    /// Human-readable summary
    pub reason: String,
    /// Setup failure, if registration did not succeed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_error: Option<String>,
    /// Per-step outcomes, in execution order
    pub steps: Vec<StepOutcome>,
    /// When the run started
    pub started_at: DateTime<Utc>,
}

impl SuiteReport {
    /// Build a report from step outcomes.
    ///
    /// A run passes only when setup succeeded and every step passed.
    #[must_use]
    pub fn from_outcomes(
        suite: impl Into<String>,
        setup_error: Option<String>,
        steps: Vec<StepOutcome>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let ok = setup_error.is_none() && steps.iter().all(StepOutcome::passed);
        let reason = if ok {
            format!("All {} steps passed", steps.len())
        } else {
            let mut parts = Vec::new();
            if let Some(err) = &setup_error {
                parts.push(format!("setup failed ({err})"));
            }
            let failed: Vec<_> = steps
                .iter()
                .filter(|s| !s.failures().is_empty())
                .map(|s| s.name.as_str())
                .collect();
            if !failed.is_empty() {
                parts.push(format!("failed: {}", failed.join(", ")));
            }
            let skipped = steps.iter().filter(|s| s.was_skipped()).count();
            if skipped > 0 {
                parts.push(format!("{skipped} skipped"));
            }
            format!("Suite failed: {}", parts.join("; "))
        };

        Self {
            suite: suite.into(),
            ok,
            reason,
            setup_error,
            steps,
            started_at,
        }
    }

    /// Outcome of the step with the given name.
    #[must_use]
    pub fn step(&self, name: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Names of the steps that failed.
    #[must_use]
    pub fn failed_steps(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| !s.failures().is_empty())
            .map(|s| s.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn passed(name: &str) -> StepOutcome {
        StepOutcome {
            name: name.to_string(),
            status: StepStatus::Passed,
            response: Some(CapturedResponse {
                status: 200,
                body: None,
            }),
            elapsed_ms: 3,
        }
    }

    fn failed(name: &str) -> StepOutcome {
        StepOutcome {
            name: name.to_string(),
            status: StepStatus::Failed {
                failures: vec![Failure::Status {
                    expected: "201".to_string(),
                    actual: 500,
                }],
            },
            response: None,
            elapsed_ms: 3,
        }
    }

    #[test]
    fn test_all_passed() {
        let report = SuiteReport::from_outcomes(
            "books",
            None,
            vec![passed("list"), passed("single")],
            Utc::now(),
        );
        assert!(report.ok);
        assert_eq!(report.reason, "All 2 steps passed");
        assert!(report.failed_steps().is_empty());
    }

    #[test]
    fn test_with_failure() {
        let report = SuiteReport::from_outcomes(
            "books",
            None,
            vec![passed("list"), failed("submit")],
            Utc::now(),
        );
        assert!(!report.ok);
        assert!(report.reason.contains("failed: submit"));
        assert_eq!(report.failed_steps(), vec!["submit"]);
    }

    #[test]
    fn test_setup_failure_with_skips() {
        let report = SuiteReport::from_outcomes(
            "orders",
            Some("Client registration response has no accessToken".to_string()),
            vec![passed("list"), StepOutcome::skipped("submit", "no token")],
            Utc::now(),
        );
        assert!(!report.ok);
        assert!(report.reason.contains("setup failed"));
        assert!(report.reason.contains("1 skipped"));
        assert!(report.step("submit").is_some_and(StepOutcome::was_skipped));
    }

    #[test]
    fn test_empty_suite_passes() {
        let report = SuiteReport::from_outcomes("empty", None, vec![], Utc::now());
        assert!(report.ok);
    }

    #[test]
    fn test_failure_display() {
        let failure = Failure::Field {
            pointer: "/customerName".to_string(),
            expected: "\"ali\"".to_string(),
            actual: None,
        };
        assert_eq!(
            failure.to_string(),
            "field /customerName: expected \"ali\", got nothing"
        );

        let failure = Failure::MissingDependency {
            key: ContextKey::OrderId,
        };
        assert_eq!(failure.to_string(), "missing dependency orderId; request not sent");
    }

    #[test]
    fn test_outcome_serializes_flat_state() {
        let value = serde_json::to_value(failed("submit")).unwrap();
        assert_eq!(value["state"], json!("failed"));
        assert_eq!(value["failures"][0]["kind"], json!("status"));
        assert_eq!(value["failures"][0]["actual"], json!(500));
    }
}
