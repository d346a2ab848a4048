//! CLI-specific error types and exit code mapping.

use tagsentry_core::error::TagsentryError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-facing message; the
/// `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// One or more checks failed; carries the summary line.
    #[error("checks failed: {0}")]
    ChecksFailed(String),

    /// JSON serialization failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from tagsentry-core.
    #[error("{0}")]
    Core(#[from] TagsentryError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                    |
    /// |------|--------------------------------------------|
    /// | 0    | Success                                    |
    /// | 1    | Check failure, render failure, general     |
    /// | 2    | Configuration error                        |
    /// | 3    | Export load failure (missing, malformed)   |
    /// | 10   | IO error                                   |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Core(TagsentryError::Config(_)) => 2,
            Self::Core(TagsentryError::Load(_)) => 3,
            Self::Io(_) | Self::Core(TagsentryError::Io(_)) => 10,
            Self::ChecksFailed(_) | Self::Command(_) | Self::JsonSerialize(_) | Self::Core(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagsentry_core::error::{ConfigError, LoadError, RenderError};

    #[test]
    fn config_error_maps_to_2() {
        let err = CliError::Config("bad value".to_owned());
        assert_eq!(err.exit_code(), 2);

        let core = CliError::Core(
            ConfigError::InvalidValue {
                field: "report.format".to_owned(),
                reason: "unknown".to_owned(),
            }
            .into(),
        );
        assert_eq!(core.exit_code(), 2);
    }

    #[test]
    fn load_error_maps_to_3() {
        let err = CliError::Core(
            LoadError::FileNotFound {
                path: "export.json".to_owned(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn checks_failed_maps_to_1() {
        let err = CliError::ChecksFailed("4/5 passed".to_owned());
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("4/5 passed"));
    }

    #[test]
    fn render_error_maps_to_1() {
        let err = CliError::Core(RenderError::Failed("delegate broke".to_owned()).into());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn report_write_failure_maps_to_1() {
        // Report generation failure counts as a run failure, not an IO error.
        let err = CliError::Core(
            RenderError::Write {
                path: "results.json".to_owned(),
                reason: "permission denied".to_owned(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn io_error_maps_to_10() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(CliError::Io(io).exit_code(), 10);
    }
}
