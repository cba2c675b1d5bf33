//! Shared test utilities for the bookstore contract harness.
//!
//! This crate provides:
//! - Proptest generators for harness inputs
//! - A wiremock-backed mock of the book ordering API
//! - JSON fixtures shaped like the API's responses

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
pub use mocks::{MockBookstore, MockBookstoreConfig};
