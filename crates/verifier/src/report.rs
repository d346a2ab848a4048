//! Report output -- the render delegate seam and the JSON fallback.
//!
//! HTML rendering belongs to an external collaborator behind the
//! [`ReportRenderer`] trait. Whether to attempt HTML at all is an
//! explicit configuration choice (`report.format`), never a runtime
//! capability probe; requesting HTML without a bound delegate degrades
//! to writing the raw JSON results with an explicit message.

use std::path::{Path, PathBuf};

use serde::Serialize;

use tagsentry_core::config::ReportConfig;
use tagsentry_core::error::{RenderError, TagsentryError};

use crate::model::ResultsDocument;

/// External HTML report producer, substitutable with a test double.
pub trait ReportRenderer {
    /// Render the results document to HTML text.
    fn render(
        &self,
        results: &ResultsDocument,
        account_id: &str,
        account_name: &str,
        minimize: bool,
    ) -> Result<String, TagsentryError>;
}

/// What a report write produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    /// Path the report was written to.
    pub path: PathBuf,
    /// Format actually written ("html" or "json").
    pub format: String,
    /// True when HTML was requested but the JSON fallback was written.
    pub degraded: bool,
}

/// Write the results document according to the report configuration.
///
/// `renderer` is the optional HTML delegate. Write failures are fatal
/// for the report path; delegate unavailability is not.
pub fn write_report(
    results: &ResultsDocument,
    config: &ReportConfig,
    renderer: Option<&dyn ReportRenderer>,
) -> Result<ReportOutcome, TagsentryError> {
    let output_path = PathBuf::from(&config.output_path);

    if config.format == "html" {
        match renderer {
            Some(delegate) => {
                let html = delegate.render(
                    results,
                    &config.account_id,
                    &config.account_name,
                    config.minimize,
                )?;
                write_text(&output_path, &html)?;
                tracing::info!(path = %output_path.display(), "HTML report written");
                return Ok(ReportOutcome {
                    path: output_path,
                    format: "html".to_owned(),
                    degraded: false,
                });
            }
            None => {
                // Degraded mode: fall back to raw JSON results.
                tracing::warn!(
                    "{}",
                    RenderError::DelegateUnavailable(
                        "no HTML delegate bound, writing raw JSON results instead".to_owned()
                    )
                );
            }
        }
    }

    let degraded = config.format == "html";
    let json = serde_json::to_string_pretty(results)
        .map_err(|e| RenderError::Serialize(e.to_string()))?;
    write_text(&output_path, &json)?;
    tracing::info!(path = %output_path.display(), degraded, "JSON results written");

    Ok(ReportOutcome {
        path: output_path,
        format: "json".to_owned(),
        degraded,
    })
}

// Report-path write failures are render failures, not plain IO: the run
// exits with the check-failure code, not the IO code.
fn write_text(path: &Path, content: &str) -> Result<(), TagsentryError> {
    std::fs::write(path, content).map_err(|e| {
        RenderError::Write {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubRenderer {
        fail: bool,
    }

    impl ReportRenderer for StubRenderer {
        fn render(
            &self,
            results: &ResultsDocument,
            account_id: &str,
            account_name: &str,
            _minimize: bool,
        ) -> Result<String, TagsentryError> {
            if self.fail {
                return Err(RenderError::Failed("stub failure".to_owned()).into());
            }
            Ok(format!(
                "<html><!-- {account_id} {account_name} users={} --></html>",
                results.users.len()
            ))
        }
    }

    fn report_config(dir: &tempfile::TempDir, format: &str, file: &str) -> ReportConfig {
        ReportConfig {
            format: format.to_owned(),
            output_path: dir.path().join(file).display().to_string(),
            account_id: "012345678901".to_owned(),
            account_name: "sample-with-tags".to_owned(),
            minimize: false,
        }
    }

    #[test]
    fn json_format_writes_results_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = report_config(&dir, "json", "results.json");

        let outcome = write_report(&ResultsDocument::default(), &config, None).unwrap();
        assert_eq!(outcome.format, "json");
        assert!(!outcome.degraded);

        let written = std::fs::read_to_string(&outcome.path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert!(value.get("users").is_some());
        assert!(value.get("links").is_some());
    }

    #[test]
    fn html_format_uses_bound_delegate() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = report_config(&dir, "html", "report.html");
        let renderer = StubRenderer { fail: false };

        let outcome =
            write_report(&ResultsDocument::default(), &config, Some(&renderer)).unwrap();
        assert_eq!(outcome.format, "html");
        assert!(!outcome.degraded);

        let written = std::fs::read_to_string(&outcome.path).unwrap();
        assert!(written.contains("012345678901"));
    }

    #[test]
    fn html_without_delegate_degrades_to_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = report_config(&dir, "html", "report.html");

        let outcome = write_report(&ResultsDocument::default(), &config, None).unwrap();
        assert_eq!(outcome.format, "json");
        assert!(outcome.degraded);

        let written = std::fs::read_to_string(&outcome.path).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&written).is_ok());
    }

    #[test]
    fn delegate_failure_propagates() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = report_config(&dir, "html", "report.html");
        let renderer = StubRenderer { fail: true };

        let err =
            write_report(&ResultsDocument::default(), &config, Some(&renderer)).unwrap_err();
        assert!(matches!(err, TagsentryError::Render(_)));
    }

    #[test]
    fn unwritable_output_path_is_a_render_error() {
        let config = ReportConfig {
            format: "json".to_owned(),
            output_path: "/nonexistent/dir/results.json".to_owned(),
            ..ReportConfig::default()
        };
        let err = write_report(&ResultsDocument::default(), &config, None).unwrap_err();
        assert!(matches!(
            err,
            TagsentryError::Render(RenderError::Write { .. })
        ));
    }
}
