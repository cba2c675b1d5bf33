//! Shared plumbing for the bookstore contract harness.
//!
//! This crate provides centralized implementations for:
//! - Configuration errors and typed environment parsing
//! - HTTP client configuration and building
//! - Tracing subscriber initialization

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod http;
pub mod tracing_config;

pub use env::{load_dotenv, parse_env, parse_flag_env, parse_url_env, require_env};
pub use error::ConfigError;
pub use http::{DEFAULT_USER_AGENT, HttpConfig, build_http_client};
pub use tracing_config::{TracingConfig, init_tracing};
