//! Common Test Utilities
//!
//! Shared fixtures for the property and integration tests.

pub mod fixtures;

pub use fixtures::*;
