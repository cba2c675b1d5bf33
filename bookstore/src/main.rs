//! Bookstore contract runner - main entry point.
//!
//! Runs the book ordering suite once, prints the JSON report to stdout and
//! exits non-zero if anything failed.

use anyhow::{Context, bail};
use bookstore_contract::SuiteConfig;
use contract_common::init_tracing;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = SuiteConfig::from_env().context("loading configuration")?;
    init_tracing(&config.tracing_config())?;

    info!(base_url = %config.base_url, "running bookstore contract suite");
    let report = bookstore_contract::run(&config).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.ok {
        bail!("{}", report.reason);
    }
    Ok(())
}
