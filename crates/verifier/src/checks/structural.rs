//! Structural invariant checks -- tag schema, field presence, and the
//! additive-only compatibility contract.
//!
//! Field presence is checked behaviorally: records are serialized with
//! `serde_json` and the actual output object is inspected, rather than
//! string-matching serializer source text.

use serde_json::Value;

use tagsentry_core::Tag;
use tagsentry_core::error::{CheckError, TagsentryError};

use super::{Check, CheckContext};

/// Fields every serialized user record must carry, tags included.
const USER_FIELDS: [&str; 11] = [
    "arn",
    "create_date",
    "id",
    "name",
    "inline_policies",
    "groups",
    "path",
    "customer_managed_policies",
    "aws_managed_policies",
    "is_excluded",
    "tags",
];

/// Fields every serialized role record must carry, tags included.
const ROLE_FIELDS: [&str; 14] = [
    "arn",
    "assume_role_policy",
    "create_date",
    "role_last_used",
    "id",
    "name",
    "inline_policies",
    "instance_profiles",
    "instances_count",
    "path",
    "customer_managed_policies",
    "aws_managed_policies",
    "is_excluded",
    "tags",
];

/// Fields every serialized group record must carry. No tags, by design.
const GROUP_FIELDS: [&str; 9] = [
    "arn",
    "name",
    "create_date",
    "id",
    "inline_policies",
    "path",
    "customer_managed_policies",
    "aws_managed_policies",
    "is_excluded",
];

/// Pre-tags user field set, frozen at the feature boundary.
const LEGACY_USER_FIELDS: [&str; 10] = [
    "arn",
    "create_date",
    "id",
    "name",
    "inline_policies",
    "groups",
    "path",
    "customer_managed_policies",
    "aws_managed_policies",
    "is_excluded",
];

/// Pre-tags role field set, frozen at the feature boundary.
const LEGACY_ROLE_FIELDS: [&str; 13] = [
    "arn",
    "assume_role_policy",
    "create_date",
    "role_last_used",
    "id",
    "name",
    "inline_policies",
    "instance_profiles",
    "instances_count",
    "path",
    "customer_managed_policies",
    "aws_managed_policies",
    "is_excluded",
];

/// Assert every raw tag of every user and role is a `{Key, Value}`
/// object with string members.
pub struct TagSchemaCheck;

impl TagSchemaCheck {
    fn check_entity_tags(entity: &str, tags: &[Value]) -> Result<(), TagsentryError> {
        for (index, raw) in tags.iter().enumerate() {
            if Tag::from_raw(raw).is_none() {
                return Err(CheckError::AssertionFailure {
                    entity: entity.to_owned(),
                    reason: format!(
                        "tag at index {index} is not a {{Key, Value}} string pair: {raw}"
                    ),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl Check for TagSchemaCheck {
    fn name(&self) -> &str {
        "input-tag-schema"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<(), TagsentryError> {
        for user in &ctx.export.users {
            Self::check_entity_tags(&format!("user '{}'", user.user_name), user.raw_tags())?;
        }
        for role in &ctx.export.roles {
            Self::check_entity_tags(&format!("role '{}'", role.role_name), role.raw_tags())?;
        }
        Ok(())
    }
}

/// Assert synthesized records serialize with the full post-tags field
/// set, that tags survive unmodified, and that groups stay tag-free.
pub struct RecordSerializationCheck;

fn require_fields(
    record: &str,
    value: &Value,
    fields: &[&str],
) -> Result<(), TagsentryError> {
    let obj = value.as_object().ok_or_else(|| CheckError::AssertionFailure {
        entity: record.to_owned(),
        reason: "record did not serialize to an object".to_owned(),
    })?;
    for field in fields {
        if !obj.contains_key(*field) {
            return Err(CheckError::MissingField {
                record: record.to_owned(),
                field: (*field).to_owned(),
            }
            .into());
        }
    }
    Ok(())
}

fn to_value(record: &str, value: impl serde::Serialize) -> Result<Value, TagsentryError> {
    serde_json::to_value(value).map_err(|e| {
        CheckError::AssertionFailure {
            entity: record.to_owned(),
            reason: format!("serialization failed: {e}"),
        }
        .into()
    })
}

impl Check for RecordSerializationCheck {
    fn name(&self) -> &str {
        "record-serialization"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<(), TagsentryError> {
        for user in &ctx.export.users {
            let entity = format!("user '{}'", user.user_name);
            let record = ctx.results.users.get(&user.user_id).ok_or_else(|| {
                CheckError::AssertionFailure {
                    entity: entity.clone(),
                    reason: "no synthesized record for this principal".to_owned(),
                }
            })?;
            let value = to_value(&entity, record)?;
            require_fields(&entity, &value, &USER_FIELDS)?;
            if value["tags"] != Value::Array(user.raw_tags().to_vec()) {
                return Err(CheckError::AssertionFailure {
                    entity,
                    reason: "serialized tags differ from input tags".to_owned(),
                }
                .into());
            }
        }

        for role in &ctx.export.roles {
            let entity = format!("role '{}'", role.role_name);
            let record = ctx.results.roles.get(&role.role_id).ok_or_else(|| {
                CheckError::AssertionFailure {
                    entity: entity.clone(),
                    reason: "no synthesized record for this principal".to_owned(),
                }
            })?;
            let value = to_value(&entity, record)?;
            require_fields(&entity, &value, &ROLE_FIELDS)?;
            if value["tags"] != Value::Array(role.raw_tags().to_vec()) {
                return Err(CheckError::AssertionFailure {
                    entity,
                    reason: "serialized tags differ from input tags".to_owned(),
                }
                .into());
            }
        }

        // Asymmetry: no group record may ever serialize a tags key.
        for (id, group) in &ctx.results.groups {
            let entity = format!("group '{}'", group.name);
            let value = to_value(&entity, group)?;
            require_fields(&entity, &value, &GROUP_FIELDS)?;
            if value.as_object().is_some_and(|o| o.contains_key("tags")) {
                return Err(CheckError::AssertionFailure {
                    entity: format!("group '{}' ({id})", group.name),
                    reason: "group records must not carry a tags field".to_owned(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// Assert the pre-tags field sets still serialize: the feature must be
/// strictly additive.
pub struct BackwardCompatibilityCheck;

impl Check for BackwardCompatibilityCheck {
    fn name(&self) -> &str {
        "backward-compatibility"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<(), TagsentryError> {
        for (id, user) in &ctx.results.users {
            let entity = format!("user '{}' ({id})", user.name);
            let value = to_value(&entity, user)?;
            require_fields(&entity, &value, &LEGACY_USER_FIELDS)?;
        }
        for (id, role) in &ctx.results.roles {
            let entity = format!("role '{}' ({id})", role.name);
            let value = to_value(&entity, role)?;
            require_fields(&entity, &value, &LEGACY_ROLE_FIELDS)?;
        }
        for (id, group) in &ctx.results.groups {
            let entity = format!("group '{}' ({id})", group.name);
            let value = to_value(&entity, group)?;
            require_fields(&entity, &value, &GROUP_FIELDS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::authz::AuthorizationExport;
    use crate::model::synthesize;

    fn export_from(value: serde_json::Value) -> AuthorizationExport {
        serde_json::from_value(value).unwrap()
    }

    fn ctx_export() -> AuthorizationExport {
        export_from(json!({
            "UserDetailList": [{
                "Arn": "arn:aws:iam::012345678901:user/obama",
                "CreateDate": "2019-12-18 19:10:08+00:00",
                "UserId": "U1",
                "UserName": "obama",
                "Path": "/",
                "Tags": [
                    {"Key": "Environment", "Value": "prod"},
                    {"Key": "Owner", "Value": "obama"}
                ]
            }],
            "RoleDetailList": [{
                "Arn": "arn:aws:iam::012345678901:role/MyOtherRole",
                "CreateDate": "2019-12-18 19:10:08+00:00",
                "RoleId": "R1",
                "RoleName": "MyOtherRole",
                "Path": "/",
                "Tags": [{"Key": "Application", "Value": "web"}]
            }],
            "GroupDetailList": [{
                "Arn": "arn:aws:iam::012345678901:group/admin",
                "CreateDate": "2019-12-18 19:10:08+00:00",
                "GroupId": "G1",
                "GroupName": "admin",
                "Path": "/"
            }]
        }))
    }

    fn run_check(check: &dyn Check, export: &AuthorizationExport) -> Result<(), TagsentryError> {
        let results = synthesize(export);
        check.run(&CheckContext {
            export,
            results: &results,
        })
    }

    #[test]
    fn tag_schema_accepts_well_formed_tags() {
        assert!(run_check(&TagSchemaCheck, &ctx_export()).is_ok());
    }

    #[test]
    fn tag_schema_rejects_numeric_value_naming_entity() {
        let mut export = ctx_export();
        export.users[0].tags = Some(vec![json!({"Key": "Env", "Value": 7})]);
        let err = run_check(&TagSchemaCheck, &export).unwrap_err();
        assert!(err.to_string().contains("user 'obama'"));
    }

    #[test]
    fn tag_schema_rejects_missing_value_member() {
        let mut export = ctx_export();
        export.roles[0].tags = Some(vec![json!({"Key": "only-key"})]);
        let err = run_check(&TagSchemaCheck, &export).unwrap_err();
        assert!(err.to_string().contains("role 'MyOtherRole'"));
    }

    #[test]
    fn record_serialization_passes_on_faithful_model() {
        assert!(run_check(&RecordSerializationCheck, &ctx_export()).is_ok());
    }

    #[test]
    fn record_serialization_fails_when_tags_are_dropped() {
        let export = ctx_export();
        let mut results = synthesize(&export);
        results.users.get_mut("U1").unwrap().tags.clear();
        let err = RecordSerializationCheck
            .run(&CheckContext {
                export: &export,
                results: &results,
            })
            .unwrap_err();
        assert!(err.to_string().contains("differ from input tags"));
    }

    #[test]
    fn backward_compatibility_passes_on_synthesized_records() {
        assert!(run_check(&BackwardCompatibilityCheck, &ctx_export()).is_ok());
    }

    #[test]
    fn require_fields_reports_first_missing_field() {
        let value = json!({"arn": "a", "create_date": "d"});
        let err = require_fields("user 'x'", &value, &LEGACY_USER_FIELDS).unwrap_err();
        assert!(err.to_string().contains("'id'"), "got: {err}");
    }

    #[test]
    fn post_tags_field_sets_are_supersets_of_legacy() {
        assert!(LEGACY_USER_FIELDS.iter().all(|f| USER_FIELDS.contains(f)));
        assert!(LEGACY_ROLE_FIELDS.iter().all(|f| ROLE_FIELDS.contains(f)));
    }
}
