//! Crate-level tests.
//!
//! Unit tests live next to the code they cover. This tree holds shared
//! fixtures, property tests and tests that drive several layers at once.

mod common;
mod integration;
mod property;
