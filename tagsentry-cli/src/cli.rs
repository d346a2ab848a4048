//! CLI argument parsing using clap derive API.
//!
//! Purely declarative, no side effects or I/O. CLI arguments take
//! precedence over environment variables and the configuration file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Tagsentry -- verifies tag propagation through an IAM reporting pipeline.
///
/// Use `tagsentry <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "tagsentry", version, about, long_about = None)]
pub struct Cli {
    /// Path to the tagsentry.toml configuration file.
    #[arg(short, long, default_value = "tagsentry.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the tag propagation check suite.
    Verify(VerifyArgs),

    /// Synthesize results and write a report (HTML delegate or JSON fallback).
    Report(ReportArgs),

    /// List principals carrying tags in an export.
    Tags(TagsArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- verify ----

/// Run every check against an authorization export.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Authorization export path (overrides `verify.input_file`).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// UI template source to check (repeatable, overrides config).
    #[arg(long = "template")]
    pub templates: Vec<PathBuf>,

    /// Compiled UI bundle path (overrides `verify.artifact_path`).
    #[arg(long)]
    pub artifact: Option<PathBuf>,

    /// Minimum plausible bundle size in bytes.
    #[arg(long)]
    pub artifact_min_bytes: Option<u64>,

    /// Also write the results report after the checks.
    #[arg(long)]
    pub report: bool,
}

// ---- report ----

/// Synthesize the results document and write it out.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Authorization export path (overrides `verify.input_file`).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Report format: json or html (overrides `report.format`).
    #[arg(long)]
    pub format: Option<String>,

    /// Report output path (overrides `report.output_path`).
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// Account id stamped into the report.
    #[arg(long)]
    pub account_id: Option<String>,

    /// Account name stamped into the report.
    #[arg(long)]
    pub account_name: Option<String>,

    /// Ask the HTML delegate to minimize its output.
    #[arg(long)]
    pub minimize: bool,
}

// ---- tags ----

/// List users and roles that carry tags.
#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Authorization export path (overrides `verify.input_file`).
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

// ---- config ----

/// Manage the tagsentry configuration file.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file.
    Validate,

    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Section to display (general, verify, report).
        #[arg(long)]
        section: Option<String>,
    },
}
