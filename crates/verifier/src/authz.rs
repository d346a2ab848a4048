//! Authorization export loading -- raw input parsing and schema gating.
//!
//! [`load_export`] reads an `aws iam get-account-authorization-details`
//! style JSON document into [`AuthorizationExport`]. Loading is all or
//! nothing: a missing file, invalid JSON, or an absent required list
//! aborts with the matching [`LoadError`] and no partial result.
//!
//! Tags are deliberately kept as raw [`serde_json::Value`]s here. The
//! structural checker decides whether they are well-formed; if the
//! deserializer enforced the tag schema, a malformed tag would surface
//! as a fatal parse error instead of a failing check.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use tagsentry_core::error::{LoadError, TagsentryError};

/// Top-level lists every export must carry.
const REQUIRED_LISTS: [&str; 3] = ["UserDetailList", "RoleDetailList", "GroupDetailList"];

/// Raw authorization export, read-only for the lifetime of a run.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationExport {
    /// IAM users, in input order.
    #[serde(rename = "UserDetailList")]
    pub users: Vec<UserDetail>,
    /// IAM roles, in input order.
    #[serde(rename = "RoleDetailList")]
    pub roles: Vec<RoleDetail>,
    /// IAM groups, in input order.
    #[serde(rename = "GroupDetailList")]
    pub groups: Vec<GroupDetail>,
}

/// Raw user entry from the export.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDetail {
    #[serde(rename = "Arn")]
    pub arn: String,
    #[serde(rename = "CreateDate")]
    pub create_date: String,
    #[serde(rename = "UserId")]
    pub user_id: String,
    #[serde(rename = "UserName")]
    pub user_name: String,
    #[serde(rename = "Path")]
    pub path: String,
    /// Raw tag values; absent and explicitly empty are equivalent.
    #[serde(rename = "Tags", default)]
    pub tags: Option<Vec<Value>>,
}

/// Raw role entry from the export.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleDetail {
    #[serde(rename = "Arn")]
    pub arn: String,
    #[serde(rename = "CreateDate")]
    pub create_date: String,
    #[serde(rename = "RoleId")]
    pub role_id: String,
    #[serde(rename = "RoleName")]
    pub role_name: String,
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "AssumeRolePolicyDocument", default)]
    pub assume_role_policy_document: Option<Value>,
    #[serde(rename = "RoleLastUsed", default)]
    pub role_last_used: Option<Value>,
    #[serde(rename = "InstanceProfileList", default)]
    pub instance_profiles: Option<Vec<Value>>,
    /// Raw tag values; absent and explicitly empty are equivalent.
    #[serde(rename = "Tags", default)]
    pub tags: Option<Vec<Value>>,
}

/// Raw group entry from the export. Groups carry no tags, by design.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupDetail {
    #[serde(rename = "Arn")]
    pub arn: String,
    #[serde(rename = "CreateDate")]
    pub create_date: String,
    #[serde(rename = "GroupId")]
    pub group_id: String,
    #[serde(rename = "GroupName")]
    pub group_name: String,
    #[serde(rename = "Path")]
    pub path: String,
}

impl UserDetail {
    /// Raw tags, empty when the `Tags` key is absent or null.
    pub fn raw_tags(&self) -> &[Value] {
        self.tags.as_deref().unwrap_or_default()
    }
}

impl RoleDetail {
    /// Raw tags, empty when the `Tags` key is absent or null.
    pub fn raw_tags(&self) -> &[Value] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// Load an authorization export from disk.
///
/// # Errors
///
/// - [`LoadError::FileNotFound`] when the path does not exist
/// - [`LoadError::MalformedInput`] when the content is not valid JSON
///   or an entry is structurally broken
/// - [`LoadError::SchemaError`] when a required top-level list is absent
pub fn load_export(path: impl AsRef<Path>) -> Result<AuthorizationExport, TagsentryError> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TagsentryError::Load(LoadError::FileNotFound {
                path: path.display().to_string(),
            })
        } else {
            TagsentryError::Io(e)
        }
    })?;

    // Parse to a raw value first so a missing list is reported as a
    // schema error rather than a generic deserialization failure.
    let raw: Value =
        serde_json::from_str(&content).map_err(|e| LoadError::MalformedInput {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    for list in REQUIRED_LISTS {
        if raw.get(list).is_none() {
            return Err(LoadError::SchemaError {
                list: list.to_owned(),
            }
            .into());
        }
    }

    let export: AuthorizationExport =
        serde_json::from_value(raw).map_err(|e| LoadError::MalformedInput {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        users = export.users.len(),
        roles = export.roles.len(),
        groups = export.groups.len(),
        "authorization export loaded"
    );

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    const MINIMAL: &str =
        r#"{"UserDetailList": [], "RoleDetailList": [], "GroupDetailList": []}"#;

    #[test]
    fn load_minimal_export() {
        let (_dir, path) = write_temp(MINIMAL);
        let export = load_export(&path).unwrap();
        assert!(export.users.is_empty());
        assert!(export.roles.is_empty());
        assert!(export.groups.is_empty());
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = load_export("/nonexistent/export.json").unwrap_err();
        assert!(matches!(
            err,
            TagsentryError::Load(LoadError::FileNotFound { .. })
        ));
    }

    #[test]
    fn invalid_json_is_malformed_input() {
        let (_dir, path) = write_temp("{not json");
        let err = load_export(&path).unwrap_err();
        assert!(matches!(
            err,
            TagsentryError::Load(LoadError::MalformedInput { .. })
        ));
    }

    #[test]
    fn missing_list_is_schema_error() {
        let (_dir, path) =
            write_temp(r#"{"UserDetailList": [], "GroupDetailList": []}"#);
        let err = load_export(&path).unwrap_err();
        match err {
            TagsentryError::Load(LoadError::SchemaError { list }) => {
                assert_eq!(list, "RoleDetailList");
            }
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn raw_tags_absent_and_empty_are_equivalent() {
        let absent: UserDetail = serde_json::from_value(serde_json::json!({
            "Arn": "arn:aws:iam::0:user/a",
            "CreateDate": "2019-12-18 19:10:08+00:00",
            "UserId": "U1",
            "UserName": "a",
            "Path": "/"
        }))
        .unwrap();
        let empty: UserDetail = serde_json::from_value(serde_json::json!({
            "Arn": "arn:aws:iam::0:user/b",
            "CreateDate": "2019-12-18 19:10:08+00:00",
            "UserId": "U2",
            "UserName": "b",
            "Path": "/",
            "Tags": []
        }))
        .unwrap();
        assert_eq!(absent.raw_tags(), empty.raw_tags());
        assert!(absent.raw_tags().is_empty());
    }

    #[test]
    fn non_string_tag_values_still_parse() {
        // Schema validity is the structural checker's call, not the
        // deserializer's.
        let user: UserDetail = serde_json::from_value(serde_json::json!({
            "Arn": "arn:aws:iam::0:user/c",
            "CreateDate": "2019-12-18 19:10:08+00:00",
            "UserId": "U3",
            "UserName": "c",
            "Path": "/",
            "Tags": [{"Key": "Count", "Value": 42}]
        }))
        .unwrap();
        assert_eq!(user.raw_tags().len(), 1);
    }
}
