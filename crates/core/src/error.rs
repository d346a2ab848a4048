//! Error types -- domain errors shared across the workspace.

/// Top-level tagsentry error type.
#[derive(Debug, thiserror::Error)]
pub enum TagsentryError {
    /// Configuration loading or validation failure.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Authorization export loading failure (always fatal).
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Check assertion failure (recovered into a failing `CheckResult`).
    #[error("check error: {0}")]
    Check(#[from] CheckError),

    /// Report rendering or writing failure.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file does not exist.
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// Configuration file could not be parsed.
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// A configuration value is out of range or malformed.
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Authorization export loading errors.
///
/// All three variants abort the run immediately; no partial export is
/// ever returned.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Input path does not exist.
    #[error("input file not found: {path}")]
    FileNotFound { path: String },

    /// Input is not valid JSON, or a detail entry is structurally broken.
    #[error("malformed input {path}: {reason}")]
    MalformedInput { path: String, reason: String },

    /// A required top-level detail list is absent.
    #[error("schema error: missing required list '{list}'")]
    SchemaError { list: String },
}

/// Check assertion errors.
///
/// Raised inside a check and recovered by the runner into a failing
/// `CheckResult`; they never abort the run.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// An invariant does not hold for a specific entity.
    #[error("assertion failed for '{entity}': {reason}")]
    AssertionFailure { entity: String, reason: String },

    /// A serialized record is missing an expected field.
    #[error("record '{record}' is missing expected field '{field}'")]
    MissingField { record: String, field: String },

    /// The compiled UI bundle is absent or implausibly small.
    ///
    /// Soft failure: surfaced as a warning-grade failing result.
    #[error("build artifact {path}: {reason}")]
    MissingOptionalArtifact { path: String, reason: String },
}

/// Report rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// HTML output was requested but no render delegate is bound.
    #[error("render delegate unavailable: {0}")]
    DelegateUnavailable(String),

    /// The bound delegate failed to produce output.
    #[error("render failed: {0}")]
    Failed(String),

    /// Report output could not be written.
    #[error("report write failed for {path}: {reason}")]
    Write { path: String, reason: String },

    /// Results could not be serialized for output.
    #[error("results serialization failed: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_display_names_path() {
        let err = LoadError::FileNotFound {
            path: "/tmp/missing.json".to_owned(),
        };
        assert!(err.to_string().contains("/tmp/missing.json"));
    }

    #[test]
    fn schema_error_display_names_list() {
        let err = LoadError::SchemaError {
            list: "RoleDetailList".to_owned(),
        };
        assert!(err.to_string().contains("RoleDetailList"));
    }

    #[test]
    fn check_error_converts_to_top_level() {
        let err: TagsentryError = CheckError::MissingField {
            record: "user obama".to_owned(),
            field: "tags".to_owned(),
        }
        .into();
        assert!(matches!(err, TagsentryError::Check(_)));
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn io_error_converts_to_top_level() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TagsentryError = io.into();
        assert!(matches!(err, TagsentryError::Io(_)));
    }
}
