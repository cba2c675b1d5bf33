//! End-to-end tests for the bookstore contract suite live under `tests/`.

#![forbid(unsafe_code)]
