//! Domain types -- shared data structures used across the workspace.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated Key/Value metadata pair attached to a principal.
///
/// Raw export tags travel as untyped JSON so the structural checker can
/// observe schema violations; `Tag` is the typed view produced once a raw
/// tag has been confirmed well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag key. Not globally unique, only meaningful per entity.
    #[serde(rename = "Key")]
    pub key: String,
    /// Tag value.
    #[serde(rename = "Value")]
    pub value: String,
}

impl Tag {
    /// Build a typed tag from a raw export value.
    ///
    /// Returns `None` unless the value is an object with string `Key`
    /// and string `Value`.
    pub fn from_raw(raw: &Value) -> Option<Self> {
        let obj = raw.as_object()?;
        let key = obj.get("Key")?.as_str()?;
        let value = obj.get("Value")?.as_str()?;
        Some(Self {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// Outcome of one verification step.
///
/// Produced per check, consumed only by the runner's summary; never
/// persisted across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check name as printed in the summary.
    pub name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Soft failures count against the exit code but render as warnings.
    pub soft: bool,
    /// First failure message, if any.
    pub error: Option<String>,
}

impl CheckResult {
    /// A passing result.
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            soft: false,
            error: None,
        }
    }

    /// A failing result carrying the first failure message.
    pub fn fail(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            soft: false,
            error: Some(error.into()),
        }
    }

    /// Mark this result as a warning-grade (soft) failure.
    pub fn soft(mut self) -> Self {
        self.soft = true;
        self
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed {
            "PASS"
        } else if self.soft {
            "WARN"
        } else {
            "FAIL"
        };
        match &self.error {
            Some(e) => write!(f, "{status}: {} ({e})", self.name),
            None => write!(f, "{status}: {}", self.name),
        }
    }
}
