//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The mocks are plain in-memory structs rather than generated ones: they
//! record every call so tests can assert that a request was (or was not)
//! sent, and they hold enough state to answer follow-up fetches.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
