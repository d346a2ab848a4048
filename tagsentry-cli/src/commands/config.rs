//! `tagsentry config` command handler.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use tagsentry_core::config::TagsentryConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub fn execute(args: ConfigArgs, config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer),
        ConfigAction::Show { section } => execute_show(config_path, section, writer),
    }
}

/// Validate the configuration file and report any errors.
fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = match TagsentryConfig::load(config_path) {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Show the effective configuration (file + env overrides + defaults).
fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = super::load_config(config_path)?;

    let value = match section.as_deref() {
        None => serde_json::to_value(&config)?,
        Some("general") => serde_json::to_value(&config.general)?,
        Some("verify") => serde_json::to_value(&config.verify)?,
        Some("report") => serde_json::to_value(&config.report)?,
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown config section '{other}' (expected: general, verify, report)"
            )));
        }
    };

    writer.render(&ConfigShowReport {
        source: config_path.display().to_string(),
        section,
        config: value,
    })?;

    Ok(())
}

/// Validation output payload.
#[derive(Debug, Serialize)]
struct ConfigValidationReport {
    source: String,
    valid: bool,
    errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Config: {}", self.source)?;
        if self.valid {
            writeln!(w, "Status: valid")?;
        } else {
            writeln!(w, "Status: INVALID")?;
            for error in &self.errors {
                writeln!(w, "  - {error}")?;
            }
        }
        Ok(())
    }
}

/// Effective-configuration output payload.
#[derive(Debug, Serialize)]
struct ConfigShowReport {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<String>,
    config: serde_json::Value,
}

impl Render for ConfigShowReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        match &self.section {
            Some(section) => writeln!(w, "# {} [{}]", self.source, section)?,
            None => writeln!(w, "# {}", self.source)?,
        }
        let toml_text = toml::to_string_pretty(&self.config)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        write!(w, "{toml_text}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_report_lists_errors_in_text() {
        let report = ConfigValidationReport {
            source: "tagsentry.toml".to_owned(),
            valid: false,
            errors: vec!["invalid config value for 'report.format': bad".to_owned()],
        };
        let mut buf = Vec::new();
        report.render_text(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("INVALID"));
        assert!(text.contains("report.format"));
    }

    #[test]
    fn show_report_renders_toml() {
        let report = ConfigShowReport {
            source: "tagsentry.toml".to_owned(),
            section: Some("general".to_owned()),
            config: serde_json::json!({"log_level": "info", "log_format": "pretty"}),
        };
        let mut buf = Vec::new();
        report.render_text(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("log_level = \"info\""));
    }
}
