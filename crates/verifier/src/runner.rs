//! Check runner -- fixed check ordering, failure isolation, summary.
//!
//! [`VerifyRunner`] drives loader output through the synthesizer and a
//! fixed ordered list of checks. Every check error is caught and
//! converted into a failing [`CheckResult`]; one failure never prevents
//! subsequent checks from running. The run is strictly sequential and
//! single-threaded.

use serde::Serialize;
use tracing::{info, warn};

use tagsentry_core::CheckResult;
use tagsentry_core::config::VerifyConfig;

use crate::authz::AuthorizationExport;
use crate::checks::{
    BackwardCompatibilityCheck, BuildArtifactCheck, Check, CheckContext,
    RecordSerializationCheck, TagSchemaCheck, TemplateRenderingCheck,
};
use crate::model::{ResultsDocument, synthesize};

/// Aggregated outcome of one verification run.
#[derive(Debug, Clone, Serialize)]
pub struct VerifySummary {
    /// Per-check results, in execution order.
    pub results: Vec<CheckResult>,
    /// Number of passing checks.
    pub passed: usize,
    /// Total number of checks run.
    pub total: usize,
}

impl VerifySummary {
    /// True iff every check passed.
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// The final summary line, e.g. `4/5 passed`.
    pub fn summary_line(&self) -> String {
        format!("{}/{} passed", self.passed, self.total)
    }
}

/// Sequential check runner over a loaded export.
pub struct VerifyRunner {
    checks: Vec<Box<dyn Check>>,
}

impl VerifyRunner {
    /// Names of the registered checks, in execution order.
    pub fn check_names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Synthesize the domain model and run every check in order.
    pub fn run(&self, export: &AuthorizationExport) -> VerifySummary {
        let results_doc = synthesize(export);
        self.run_with_results(export, &results_doc)
    }

    /// Run every check against an already-synthesized document.
    pub fn run_with_results(
        &self,
        export: &AuthorizationExport,
        results_doc: &ResultsDocument,
    ) -> VerifySummary {
        let ctx = CheckContext {
            export,
            results: results_doc,
        };

        let mut results = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            let result = match check.run(&ctx) {
                Ok(()) => {
                    info!(check = check.name(), "check passed");
                    CheckResult::pass(check.name())
                }
                Err(e) => {
                    let result = CheckResult::fail(check.name(), e.to_string());
                    if check.is_soft() {
                        warn!(check = check.name(), error = %e, "check failed (soft)");
                        result.soft()
                    } else {
                        warn!(check = check.name(), error = %e, "check failed");
                        result
                    }
                }
            };
            results.push(result);
        }

        let passed = results.iter().filter(|r| r.passed).count();
        let total = results.len();
        info!(passed, total, "verification run complete");

        VerifySummary {
            results,
            passed,
            total,
        }
    }
}

/// Builds a [`VerifyRunner`] with the default check list.
///
/// Default order:
/// 1. `input-tag-schema`
/// 2. `record-serialization`
/// 3. `backward-compatibility`
/// 4. `template-rendering[...]` (one per configured template)
/// 5. `build-artifact` (soft)
pub struct VerifyRunnerBuilder {
    config: VerifyConfig,
    extra_checks: Vec<Box<dyn Check>>,
}

impl VerifyRunnerBuilder {
    /// Start from the default verification settings.
    pub fn new() -> Self {
        Self {
            config: VerifyConfig::default(),
            extra_checks: Vec::new(),
        }
    }

    /// Use the given verification settings.
    pub fn config(mut self, config: VerifyConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a custom check after the default list.
    pub fn push_check(mut self, check: Box<dyn Check>) -> Self {
        self.extra_checks.push(check);
        self
    }

    /// Build the runner with the default check list plus any extras.
    pub fn build(self) -> VerifyRunner {
        let mut checks: Vec<Box<dyn Check>> = vec![
            Box::new(TagSchemaCheck),
            Box::new(RecordSerializationCheck),
            Box::new(BackwardCompatibilityCheck),
        ];
        for template in &self.config.template_paths {
            checks.push(Box::new(TemplateRenderingCheck::new(template)));
        }
        checks.push(Box::new(BuildArtifactCheck::new(
            &self.config.artifact_path,
            self.config.artifact_min_bytes,
        )));
        checks.extend(self.extra_checks);

        VerifyRunner { checks }
    }
}

impl Default for VerifyRunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
