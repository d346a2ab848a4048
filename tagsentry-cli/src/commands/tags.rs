//! `tagsentry tags` command handler.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use tagsentry_core::Tag;
use tagsentry_verifier::load_export;

use crate::cli::TagsArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `tags` command.
///
/// Lists the users and roles in the export that carry tags, with their
/// Key/Value pairs. Malformed tags are skipped here; `verify` is the
/// command that flags them.
pub fn execute(args: TagsArgs, config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    let mut config = super::load_config(config_path)?;
    if let Some(input) = &args.input {
        config.verify.input_file = input.display().to_string();
    }

    let export = load_export(&config.verify.input_file)?;

    let users = export
        .users
        .iter()
        .filter(|u| !u.raw_tags().is_empty())
        .map(|u| TaggedPrincipal {
            name: u.user_name.clone(),
            tags: u.raw_tags().iter().filter_map(Tag::from_raw).collect(),
        })
        .collect();
    let roles = export
        .roles
        .iter()
        .filter(|r| !r.raw_tags().is_empty())
        .map(|r| TaggedPrincipal {
            name: r.role_name.clone(),
            tags: r.raw_tags().iter().filter_map(Tag::from_raw).collect(),
        })
        .collect();

    writer.render(&TagsReport {
        input: config.verify.input_file.clone(),
        users,
        roles,
    })?;

    Ok(())
}

/// One tagged principal in the listing.
#[derive(Debug, Serialize)]
struct TaggedPrincipal {
    name: String,
    tags: Vec<Tag>,
}

/// Tag listing output payload.
#[derive(Debug, Serialize)]
struct TagsReport {
    input: String,
    users: Vec<TaggedPrincipal>,
    roles: Vec<TaggedPrincipal>,
}

impl Render for TagsReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Tagged principals in {}", self.input)?;

        writeln!(w)?;
        writeln!(w, "Users with tags:")?;
        render_principals(w, &self.users)?;

        writeln!(w)?;
        writeln!(w, "Roles with tags:")?;
        render_principals(w, &self.roles)?;
        Ok(())
    }
}

fn render_principals(w: &mut dyn Write, principals: &[TaggedPrincipal]) -> std::io::Result<()> {
    if principals.is_empty() {
        writeln!(w, "  (none)")?;
        return Ok(());
    }
    for principal in principals {
        writeln!(w, "  - {}: {} tags", principal.name, principal.tags.len())?;
        for tag in &principal.tags {
            writeln!(w, "      {tag}")?;
        }
    }
    Ok(())
}
