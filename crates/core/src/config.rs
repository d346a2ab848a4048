//! Configuration -- `tagsentry.toml` parsing and runtime settings.
//!
//! [`TagsentryConfig`] is the top-level structure holding every section.
//!
//! # Loading precedence
//! 1. CLI arguments (highest)
//! 2. Environment variables (`TAGSENTRY_VERIFY_INPUT_FILE=...` form)
//! 3. Configuration file (`tagsentry.toml`)
//! 4. Defaults (`Default` impls)
//!
//! # Example
//! ```no_run
//! # fn example() -> Result<(), tagsentry_core::error::TagsentryError> {
//! use tagsentry_core::config::TagsentryConfig;
//!
//! // Load from file and apply environment overrides
//! let config = TagsentryConfig::load("tagsentry.toml")?;
//!
//! // Parse a TOML string directly
//! let config = TagsentryConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TagsentryError};

/// Top-level tagsentry configuration.
///
/// Represents the full `tagsentry.toml` structure; each component reads
/// only its own section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagsentryConfig {
    /// General settings (logging).
    #[serde(default)]
    pub general: GeneralConfig,
    /// Verification run settings.
    #[serde(default)]
    pub verify: VerifyConfig,
    /// Report generation settings.
    #[serde(default)]
    pub report: ReportConfig,
}

impl TagsentryConfig {
    /// Load configuration from a TOML file and apply env overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TagsentryError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file (no env overrides).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TagsentryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TagsentryError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                TagsentryError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, TagsentryError> {
        toml::from_str(toml_str).map_err(|e| {
            TagsentryError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// Override settings from environment variables.
    ///
    /// Naming scheme: `TAGSENTRY_{SECTION}_{FIELD}`,
    /// e.g. `TAGSENTRY_VERIFY_INPUT_FILE=export.json`.
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "TAGSENTRY_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "TAGSENTRY_GENERAL_LOG_FORMAT");

        // Verify
        override_string(&mut self.verify.input_file, "TAGSENTRY_VERIFY_INPUT_FILE");
        override_csv(
            &mut self.verify.template_paths,
            "TAGSENTRY_VERIFY_TEMPLATE_PATHS",
        );
        override_string(
            &mut self.verify.artifact_path,
            "TAGSENTRY_VERIFY_ARTIFACT_PATH",
        );
        override_u64(
            &mut self.verify.artifact_min_bytes,
            "TAGSENTRY_VERIFY_ARTIFACT_MIN_BYTES",
        );

        // Report
        override_string(&mut self.report.format, "TAGSENTRY_REPORT_FORMAT");
        override_string(&mut self.report.output_path, "TAGSENTRY_REPORT_OUTPUT_PATH");
        override_string(&mut self.report.account_id, "TAGSENTRY_REPORT_ACCOUNT_ID");
        override_string(
            &mut self.report.account_name,
            "TAGSENTRY_REPORT_ACCOUNT_NAME",
        );
        override_bool(&mut self.report.minimize, "TAGSENTRY_REPORT_MINIMIZE");
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), TagsentryError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.verify.input_file.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "verify.input_file".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        if self.verify.artifact_min_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "verify.artifact_min_bytes".to_owned(),
                reason: "must be at least 1".to_owned(),
            }
            .into());
        }

        let valid_report_formats = ["json", "html"];
        if !valid_report_formats.contains(&self.report.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "report.format".to_owned(),
                reason: format!("must be one of: {}", valid_report_formats.join(", ")),
            }
            .into());
        }

        if self.report.output_path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.output_path".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// Verification run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Path to the authorization details export.
    pub input_file: String,
    /// UI template sources checked for tag rendering.
    pub template_paths: Vec<String>,
    /// Compiled UI bundle path.
    pub artifact_path: String,
    /// Minimum plausible bundle size in bytes.
    pub artifact_min_bytes: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            input_file: "authz-details.json".to_owned(),
            template_paths: vec![
                "output/src/components/principals/PrincipalMetadata.vue".to_owned(),
            ],
            artifact_path: "output/dist/js/index.js".to_owned(),
            artifact_min_bytes: 512 * 1024,
        }
    }
}

/// Report generation settings.
///
/// `format` is an explicit choice; `html` requires a bound render
/// delegate and otherwise degrades to the JSON fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: "json" or "html".
    pub format: String,
    /// Report output path.
    pub output_path: String,
    /// Account id stamped into the report.
    pub account_id: String,
    /// Account name stamped into the report.
    pub account_name: String,
    /// Whether the delegate should minimize its output.
    pub minimize: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "json".to_owned(),
            output_path: "tagsentry-results.json".to_owned(),
            account_id: "000000000000".to_owned(),
            account_name: "unknown".to_owned(),
            minimize: false,
        }
    }
}

// --- env override helpers ---

fn override_string(target: &mut String, var: &str) {
    if let Ok(value) = std::env::var(var) {
        *target = value;
    }
}

fn override_bool(target: &mut bool, var: &str) {
    if let Ok(value) = std::env::var(var) {
        match value.parse::<bool>() {
            Ok(v) => *target = v,
            Err(_) => tracing::warn!(var, value, "ignoring non-boolean env override"),
        }
    }
}

fn override_u64(target: &mut u64, var: &str) {
    if let Ok(value) = std::env::var(var) {
        match value.parse::<u64>() {
            Ok(v) => *target = v,
            Err(_) => tracing::warn!(var, value, "ignoring non-numeric env override"),
        }
    }
}

fn override_csv(target: &mut Vec<String>, var: &str) {
    if let Ok(value) = std::env::var(var) {
        *target = value
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}
