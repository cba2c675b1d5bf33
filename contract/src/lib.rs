//! HTTP API contract testing.
//!
//! Runs an ordered list of dependent HTTP steps against one base URL:
//! - registers a client and keeps its bearer token in a [`SessionContext`]
//! - substitutes earlier results (e.g. an order id) into later requests
//! - checks status codes, literal fields and named JSON schemas
//!
//! Assertion failures are collected per step and never abort the run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assertion;
pub mod context;
pub mod contract;
pub mod error;
pub mod report;
pub mod runner;
pub mod schema;

pub use assertion::{FieldAssertion, Matcher, StatusExpectation};
pub use context::{ContextKey, SessionContext, generate_client_email};
pub use contract::{Auth, Expectation, Extraction, HttpMethod, Registration, RequestTemplate, Step, Suite};
pub use error::{ContextError, ContractError, ContractResult};
pub use report::{CapturedResponse, Failure, StepOutcome, StepStatus, SuiteReport};
pub use runner::{ContractRunner, REGISTRATION_PATH};
pub use schema::{SchemaCheckError, SchemaRegistry, SchemaValidator};
