//! Command handlers -- one module per subcommand.

pub mod config;
pub mod report;
pub mod tags;
pub mod verify;

use std::path::Path;

use tagsentry_core::config::TagsentryConfig;

use crate::error::CliError;

/// Load the effective configuration for a command.
///
/// A missing config file is not an error; defaults apply, then env
/// overrides, then validation. CLI argument overrides are applied by
/// each command afterwards.
pub(crate) fn load_config(path: &Path) -> Result<TagsentryConfig, CliError> {
    let mut config = if path.exists() {
        TagsentryConfig::from_file(path).map_err(|e| CliError::Config(e.to_string()))?
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        TagsentryConfig::default()
    };
    config.apply_env_overrides();
    config
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(config)
}
