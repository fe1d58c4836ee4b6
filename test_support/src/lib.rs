//! Test utilities shared by the `steparg` integration tests.
//!
//! Provides a fixture nasty string catalogue, a compact table builder and
//! helpers for writing JSON inputs to temporary directories for CLI tests.

pub mod error;
pub mod files;
pub mod fixtures;

pub use error::display_error_chain;
pub use files::{TempInputs, write_catalogue};
pub use fixtures::{fixture_catalogue, table};
