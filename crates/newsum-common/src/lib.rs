//! newsum-common — Shared error types used across all newsum crates.

pub mod error;

pub use error::{NewsumError, Result};
