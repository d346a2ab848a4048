//! Tagsentry shared types, errors, and configuration.
//!
//! This crate holds everything the verifier and the CLI have in common:
//! the [`Tag`] and [`CheckResult`] domain types, the error enums, and
//! the `tagsentry.toml` configuration model.

pub mod config;
pub mod error;
pub mod types;

// --- core type re-exports ---

pub use config::TagsentryConfig;
pub use error::{CheckError, ConfigError, LoadError, RenderError, TagsentryError};
pub use types::{CheckResult, Tag};
