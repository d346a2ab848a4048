//! Verification checks -- the extension point and the built-in checkers.
//!
//! Each check asserts one slice of the tag propagation contract. Checks
//! are isolated: they share the read-only [`CheckContext`] and nothing
//! else, and an error in one never prevents the rest from running.

pub mod artifact;
pub mod rendering;
pub mod structural;

use tagsentry_core::error::TagsentryError;

use crate::authz::AuthorizationExport;
use crate::model::ResultsDocument;

pub use artifact::BuildArtifactCheck;
pub use rendering::TemplateRenderingCheck;
pub use structural::{BackwardCompatibilityCheck, RecordSerializationCheck, TagSchemaCheck};

/// Shared read-only view handed to every check.
///
/// Path and threshold settings are baked into the checks at build time;
/// the context carries only the per-run data.
pub struct CheckContext<'a> {
    /// Raw export, loaded once per run.
    pub export: &'a AuthorizationExport,
    /// Synthesized results document.
    pub results: &'a ResultsDocument,
}

/// A single verification step.
///
/// Implementations return `Ok(())` on success and the first violation as
/// an error; the runner converts errors into failing `CheckResult`s.
pub trait Check {
    /// Check name as printed in the summary.
    fn name(&self) -> &str;

    /// Soft checks render failures as warnings; the exit code still
    /// reflects them.
    fn is_soft(&self) -> bool {
        false
    }

    /// Run the check against the shared context.
    fn run(&self, ctx: &CheckContext<'_>) -> Result<(), TagsentryError>;
}
