//! `tagsentry verify` command handler.

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use tagsentry_core::CheckResult;
use tagsentry_verifier::{ReportOutcome, VerifyRunnerBuilder, load_export, synthesize, write_report};

use crate::cli::VerifyArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `verify` command.
///
/// Loads the export, runs the full check suite, optionally writes the
/// results report, and renders the per-check lines plus the summary.
///
/// # Errors
///
/// Fatal load errors propagate immediately; check failures surface as
/// `CliError::ChecksFailed` after every check has run and the summary
/// has been rendered.
pub fn execute(args: VerifyArgs, config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    let mut config = super::load_config(config_path)?;

    // CLI argument overrides (highest precedence)
    if let Some(input) = &args.input {
        config.verify.input_file = input.display().to_string();
    }
    if !args.templates.is_empty() {
        config.verify.template_paths = args
            .templates
            .iter()
            .map(|p| p.display().to_string())
            .collect();
    }
    if let Some(artifact) = &args.artifact {
        config.verify.artifact_path = artifact.display().to_string();
    }
    if let Some(min_bytes) = args.artifact_min_bytes {
        config.verify.artifact_min_bytes = min_bytes;
    }

    info!(input = %config.verify.input_file, "starting verification run");

    let export = load_export(&config.verify.input_file)?;
    let results = synthesize(&export);

    let runner = VerifyRunnerBuilder::new()
        .config(config.verify.clone())
        .build();
    let summary = runner.run_with_results(&export, &results);

    let report = if args.report {
        Some(write_report(&results, &config.report, None)?)
    } else {
        None
    };

    let payload = VerifyReport {
        input: config.verify.input_file.clone(),
        checks: summary.results.clone(),
        passed: summary.passed,
        total: summary.total,
        report,
    };
    writer.render(&payload)?;

    if !summary.all_passed() {
        return Err(CliError::ChecksFailed(summary.summary_line()));
    }

    Ok(())
}

/// Verification run output payload.
#[derive(Debug, Serialize)]
struct VerifyReport {
    input: String,
    checks: Vec<CheckResult>,
    passed: usize,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<ReportOutcome>,
}

impl Render for VerifyReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Tag propagation checks for {}", self.input)?;
        writeln!(w)?;
        for check in &self.checks {
            let status = if check.passed {
                "PASS".green()
            } else if check.soft {
                "WARN".yellow()
            } else {
                "FAIL".red()
            };
            match &check.error {
                Some(e) => writeln!(w, "  {status}  {} ({e})", check.name)?,
                None => writeln!(w, "  {status}  {}", check.name)?,
            }
        }
        writeln!(w)?;
        writeln!(w, "Results: {}/{} passed", self.passed, self.total)?;
        if let Some(report) = &self.report {
            if report.degraded {
                writeln!(
                    w,
                    "Report: {} (degraded: no HTML delegate, wrote raw JSON)",
                    report.path.display()
                )?;
            } else {
                writeln!(w, "Report: {} ({})", report.path.display(), report.format)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> VerifyReport {
        VerifyReport {
            input: "export.json".to_owned(),
            checks: vec![
                CheckResult::pass("input-tag-schema"),
                CheckResult::fail("build-artifact", "not found").soft(),
            ],
            passed: 1,
            total: 2,
            report: None,
        }
    }

    #[test]
    fn text_render_has_per_check_lines_and_summary() {
        let mut buf = Vec::new();
        sample_report().render_text(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("input-tag-schema"));
        assert!(text.contains("build-artifact"));
        assert!(text.contains("Results: 1/2 passed"));
    }

    #[test]
    fn json_payload_carries_counts() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["passed"], 1);
        assert_eq!(json["total"], 2);
        assert_eq!(json["checks"][1]["soft"], true);
        assert!(json.get("report").is_none());
    }
}
