//! Shared types and error definitions used across all reelay crates.

pub mod error;
pub mod types;

pub use error::{Context, Error, FromMessage, Result};
