//! Domain model synthesis -- minimal per-entity records from a raw export.
//!
//! [`synthesize`] builds the results document shape the external
//! reporting pipeline would produce, standing in for the full domain
//! model when that pipeline is unavailable. Synthesis is pure and
//! deterministic: identical input always yields structurally identical
//! output, and principal maps preserve input order.
//!
//! Scan-time concerns (policy analysis, exclusion evaluation) belong to
//! external collaborators; the corresponding containers are initialized
//! empty and `is_excluded` is always `false` here.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::authz::AuthorizationExport;

/// Synthesized user record, keyed by `UserId` in the results document.
///
/// Field additions must be append-only: every field serialized by a
/// pre-tags record must keep serializing here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub arn: String,
    pub create_date: String,
    pub id: String,
    pub name: String,
    pub inline_policies: Map<String, Value>,
    pub groups: Map<String, Value>,
    pub path: String,
    pub customer_managed_policies: Map<String, Value>,
    pub aws_managed_policies: Map<String, Value>,
    pub is_excluded: bool,
    /// Raw tags copied from the input; empty when absent, never null.
    pub tags: Vec<Value>,
}

/// Synthesized role record, keyed by `RoleId` in the results document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub arn: String,
    /// `{"PolicyDocument": <AssumeRolePolicyDocument or {}>}`.
    pub assume_role_policy: Value,
    pub create_date: String,
    /// `RoleLastUsed.LastUsedDate`, or null when the role was never used.
    pub role_last_used: Value,
    pub id: String,
    pub name: String,
    pub inline_policies: Map<String, Value>,
    pub instance_profiles: Vec<Value>,
    pub instances_count: usize,
    pub path: String,
    pub customer_managed_policies: Map<String, Value>,
    pub aws_managed_policies: Map<String, Value>,
    pub is_excluded: bool,
    /// Raw tags copied from the input; empty when absent, never null.
    pub tags: Vec<Value>,
}

/// Synthesized group record, keyed by `GroupId` in the results document.
///
/// Groups carry no `tags` field. The asymmetry with user and role
/// records is deliberate and permanent; do not add one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub arn: String,
    pub name: String,
    pub create_date: String,
    pub id: String,
    pub inline_policies: Map<String, Value>,
    pub path: String,
    pub customer_managed_policies: Map<String, Value>,
    pub aws_managed_policies: Map<String, Value>,
    pub is_excluded: bool,
}

/// Serialized results document, matching the reporting pipeline's
/// top-level output shape.
///
/// Principal maps are insertion-ordered to preserve the export's entity
/// order across identical runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsDocument {
    pub users: IndexMap<String, UserRecord>,
    pub roles: IndexMap<String, RoleRecord>,
    pub groups: IndexMap<String, GroupRecord>,
    pub aws_managed_policies: Map<String, Value>,
    pub customer_managed_policies: Map<String, Value>,
    pub inline_policies: Map<String, Value>,
    pub exclusions: Map<String, Value>,
    pub links: Map<String, Value>,
}

/// Build the minimal results document from a raw export.
pub fn synthesize(export: &AuthorizationExport) -> ResultsDocument {
    let mut results = ResultsDocument::default();

    for user in &export.users {
        results.users.insert(
            user.user_id.clone(),
            UserRecord {
                arn: user.arn.clone(),
                create_date: user.create_date.clone(),
                id: user.user_id.clone(),
                name: user.user_name.clone(),
                inline_policies: Map::new(),
                groups: Map::new(),
                path: user.path.clone(),
                customer_managed_policies: Map::new(),
                aws_managed_policies: Map::new(),
                is_excluded: false,
                tags: user.raw_tags().to_vec(),
            },
        );
    }

    for role in &export.roles {
        let instance_profiles = role.instance_profiles.clone().unwrap_or_default();
        results.roles.insert(
            role.role_id.clone(),
            RoleRecord {
                arn: role.arn.clone(),
                assume_role_policy: json!({
                    "PolicyDocument": role
                        .assume_role_policy_document
                        .clone()
                        .unwrap_or_else(|| json!({})),
                }),
                create_date: role.create_date.clone(),
                role_last_used: role
                    .role_last_used
                    .as_ref()
                    .and_then(|v| v.get("LastUsedDate"))
                    .cloned()
                    .unwrap_or(Value::Null),
                id: role.role_id.clone(),
                name: role.role_name.clone(),
                inline_policies: Map::new(),
                instances_count: instance_profiles.len(),
                instance_profiles,
                path: role.path.clone(),
                customer_managed_policies: Map::new(),
                aws_managed_policies: Map::new(),
                is_excluded: false,
                tags: role.raw_tags().to_vec(),
            },
        );
    }

    for group in &export.groups {
        results.groups.insert(
            group.group_id.clone(),
            GroupRecord {
                arn: group.arn.clone(),
                name: group.group_name.clone(),
                create_date: group.create_date.clone(),
                id: group.group_id.clone(),
                inline_policies: Map::new(),
                path: group.path.clone(),
                customer_managed_policies: Map::new(),
                aws_managed_policies: Map::new(),
                is_excluded: false,
            },
        );
    }

    tracing::debug!(
        users = results.users.len(),
        roles = results.roles.len(),
        groups = results.groups.len(),
        "results document synthesized"
    );

    results
}
