//! Rendering consistency check -- static markers in UI template source.
//!
//! Asserts the principal metadata template labels, reads, and displays
//! the tags field. This is a textual containment check over template
//! source, not a rendered-output check; templates are data to this
//! harness, not executable code, so source inspection is the contract
//! here.

use std::path::PathBuf;

use tagsentry_core::error::{CheckError, TagsentryError};

use super::{Check, CheckContext};

/// Markers a tag-aware template must contain.
const REQUIRED_MARKERS: [(&str, &str); 4] = [
    ("tags label", "Tags</dt>"),
    ("tags field read", "['tags']"),
    ("tag key display", "tag.Key"),
    ("tag value display", "tag.Value"),
];

/// Assert one UI template source contains every tag rendering marker.
///
/// The runner builds one instance per configured template path.
pub struct TemplateRenderingCheck {
    name: String,
    template_path: PathBuf,
}

impl TemplateRenderingCheck {
    /// Build a check for one template path.
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        let template_path = template_path.into();
        let file_name = template_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| template_path.display().to_string());
        Self {
            name: format!("template-rendering[{file_name}]"),
            template_path,
        }
    }
}

impl Check for TemplateRenderingCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, _ctx: &CheckContext<'_>) -> Result<(), TagsentryError> {
        let entity = self.template_path.display().to_string();

        let source = std::fs::read_to_string(&self.template_path).map_err(|e| {
            CheckError::AssertionFailure {
                entity: entity.clone(),
                reason: format!("template not readable: {e}"),
            }
        })?;

        for (what, marker) in REQUIRED_MARKERS {
            if !source.contains(marker) {
                return Err(CheckError::AssertionFailure {
                    entity,
                    reason: format!("missing {what} marker '{marker}'"),
                }
                .into());
            }
        }

        Ok(())
    }
}
