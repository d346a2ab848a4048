//! Build artifact validation -- compiled UI bundle existence and size.
//!
//! Building the bundle is an out-of-band step, so this check is soft:
//! a missing or undersized artifact fails the run's exit status but is
//! reported as a warning and never stops the remaining checks.

use std::path::PathBuf;

use tagsentry_core::error::{CheckError, TagsentryError};

use super::{Check, CheckContext};

/// Assert the compiled UI bundle exists and is plausibly sized.
pub struct BuildArtifactCheck {
    artifact_path: PathBuf,
    min_bytes: u64,
}

impl BuildArtifactCheck {
    /// Build a check for one artifact path and size threshold.
    pub fn new(artifact_path: impl Into<PathBuf>, min_bytes: u64) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            min_bytes,
        }
    }
}

impl Check for BuildArtifactCheck {
    fn name(&self) -> &str {
        "build-artifact"
    }

    fn is_soft(&self) -> bool {
        true
    }

    fn run(&self, _ctx: &CheckContext<'_>) -> Result<(), TagsentryError> {
        let path = self.artifact_path.display().to_string();

        let metadata = std::fs::metadata(&self.artifact_path).map_err(|_| {
            CheckError::MissingOptionalArtifact {
                path: path.clone(),
                reason: "not found (build the UI bundle first)".to_owned(),
            }
        })?;

        let size = metadata.len();
        if size < self.min_bytes {
            return Err(CheckError::MissingOptionalArtifact {
                path,
                reason: format!("{size} bytes is below the {} byte minimum", self.min_bytes),
            }
            .into());
        }

        tracing::debug!(path, size, "build artifact present");
        Ok(())
    }
}
