//! `tagsentry report` command handler.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use tagsentry_verifier::{ReportOutcome, load_export, synthesize, write_report};

use crate::cli::ReportArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `report` command.
///
/// Synthesizes the minimal results document from the export and writes
/// it out. No HTML delegate ships with the CLI, so `format = "html"`
/// always degrades to the JSON fallback here; the delegate seam exists
/// for the external rendering engine.
pub fn execute(args: ReportArgs, config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    let mut config = super::load_config(config_path)?;

    if let Some(input) = &args.input {
        config.verify.input_file = input.display().to_string();
    }
    if let Some(format) = &args.format {
        config.report.format = format.clone();
        config
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
    }
    if let Some(output_path) = &args.output_path {
        config.report.output_path = output_path.display().to_string();
    }
    if let Some(account_id) = &args.account_id {
        config.report.account_id = account_id.clone();
    }
    if let Some(account_name) = &args.account_name {
        config.report.account_name = account_name.clone();
    }
    if args.minimize {
        config.report.minimize = true;
    }

    info!(input = %config.verify.input_file, "generating report");

    let export = load_export(&config.verify.input_file)?;
    let results = synthesize(&export);
    let outcome = write_report(&results, &config.report, None)?;

    let payload = ReportSummary {
        users: results.users.len(),
        roles: results.roles.len(),
        groups: results.groups.len(),
        outcome,
    };
    writer.render(&payload)?;

    Ok(())
}

/// Report generation output payload.
#[derive(Debug, Serialize)]
struct ReportSummary {
    users: usize,
    roles: usize,
    groups: usize,
    #[serde(flatten)]
    outcome: ReportOutcome,
}

impl Render for ReportSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            w,
            "Report written to {} ({})",
            self.outcome.path.display(),
            self.outcome.format
        )?;
        if self.outcome.degraded {
            writeln!(w, "  degraded mode: no HTML delegate bound, wrote raw JSON results")?;
        }
        writeln!(
            w,
            "  principals: {} users, {} roles, {} groups",
            self.users, self.roles, self.groups
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn degraded_outcome_is_called_out_in_text() {
        let payload = ReportSummary {
            users: 2,
            roles: 2,
            groups: 1,
            outcome: ReportOutcome {
                path: PathBuf::from("report.html"),
                format: "json".to_owned(),
                degraded: true,
            },
        };
        let mut buf = Vec::new();
        payload.render_text(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("degraded mode"));
        assert!(text.contains("2 users, 2 roles, 1 groups"));
    }
}
