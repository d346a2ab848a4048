//! tagsentry binary entry point -- argument parsing, logging setup,
//! command dispatch, and exit code mapping.

mod cli;
mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tagsentry_core::config::{GeneralConfig, TagsentryConfig};

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The [general] section is read best-effort here so logging comes up
    // before dispatch; command handlers reload the config with proper
    // error mapping.
    let general = TagsentryConfig::load(&cli.config)
        .map(|c| c.general)
        .unwrap_or_default();
    let (level, format) = logging_settings(cli.log_level.as_deref(), &general);
    init_logging(&level, &format);

    let writer = OutputWriter::new(cli.output);

    let result = match cli.command {
        Commands::Verify(args) => commands::verify::execute(args, &cli.config, &writer),
        Commands::Report(args) => commands::report::execute(args, &cli.config, &writer),
        Commands::Tags(args) => commands::tags::execute(args, &cli.config, &writer),
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Effective log level and format: the `--log-level` flag wins over the
/// `[general]` section.
fn logging_settings(flag_level: Option<&str>, general: &GeneralConfig) -> (String, String) {
    let level = flag_level
        .map(str::to_owned)
        .unwrap_or_else(|| general.log_level.clone());
    (level, general.log_format.clone())
}

// Logs go to stderr so JSON payloads on stdout stay machine-readable.
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_flag_overrides_general_section() {
        let general = GeneralConfig {
            log_level: "warn".to_owned(),
            log_format: "json".to_owned(),
        };
        let (level, format) = logging_settings(Some("debug"), &general);
        assert_eq!(level, "debug");
        assert_eq!(format, "json");
    }

    #[test]
    fn general_section_drives_logging_defaults() {
        let general = GeneralConfig::default();
        let (level, format) = logging_settings(None, &general);
        assert_eq!(level, "info");
        assert_eq!(format, "pretty");
    }
}
