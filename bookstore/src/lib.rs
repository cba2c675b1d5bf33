//! Contract suite for the book ordering API.
//!
//! Registers a throwaway API client, then walks the book listing and the
//! full order lifecycle (create, read, update, delete) with one bearer token.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod schemas;
pub mod suite;

pub use config::SuiteConfig;
pub use suite::bookstore_suite;

use api_contract::{ContractResult, ContractRunner, SchemaRegistry, SuiteReport};

/// Run the bookstore suite once against the configured API.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the suite is not runnable.
/// Step failures are reported in the [`SuiteReport`].
pub async fn run(config: &SuiteConfig) -> ContractResult<SuiteReport> {
    let runner = build_runner(config)?;
    runner.run_suite(&bookstore_suite(&config.client_name)).await
}

/// Runner wired with the bookstore schemas.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or a schema does not compile.
pub fn build_runner(config: &SuiteConfig) -> ContractResult<ContractRunner<SchemaRegistry>> {
    ContractRunner::from_config(
        config.base_url.clone(),
        &config.http_config(),
        schemas::registry()?,
    )
}
