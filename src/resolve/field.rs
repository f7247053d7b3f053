//! Field lines: parse into specs, resolve specs into display fields.

use crate::model::{
    ExecutionContext, FieldKeyword, FieldSpec, Markup, ResolvedField, StatusEntry, TriggerEvent,
};

use super::Result;
use super::link::{self, Link};

/// Parse one configured field line.
///
/// A line that is exactly `{REF}` or `{STATUS}` (after trimming) becomes a keyword.
/// Otherwise it is split on the first `:` into a name and value; a value that is
/// a reserved token makes the line that keyword, anything else is a literal.
/// Lines without a colon are dropped.
pub fn parse_field_line(line: &str) -> Option<FieldSpec> {
    let line = line.trim();
    if let Some(keyword) = FieldKeyword::from_token(line) {
        return Some(FieldSpec::Keyword(keyword));
    }

    let (name, value) = line.split_once(':')?;
    let value = value.trim();
    if let Some(keyword) = FieldKeyword::from_token(value) {
        return Some(FieldSpec::Keyword(keyword));
    }

    Some(FieldSpec::Literal {
        name: name.trim().to_string(),
        value: value.to_string(),
    })
}

/// Resolve a field spec against the context and status.
///
/// Literal fields never fail. `{REF}` fails when the repository or commit
/// it links to cannot be determined.
pub fn resolve_field(
    spec: &FieldSpec,
    ctx: &ExecutionContext,
    status: &StatusEntry,
    markup: Markup,
) -> Result<ResolvedField> {
    match spec {
        FieldSpec::Literal { name, value } => Ok(ResolvedField::new(name, value)),
        FieldSpec::Keyword(FieldKeyword::Status) => Ok(ResolvedField::new("Status", status.title)),
        FieldSpec::Keyword(FieldKeyword::Ref) => ref_field(ctx, markup),
    }
}

fn ref_field(ctx: &ExecutionContext, markup: Markup) -> Result<ResolvedField> {
    if let Some(number) = ctx.pull_request_number() {
        let link = Link::new(link::pull_request_url(ctx, number)?, format!("#{number}"));
        return Ok(ResolvedField::new("Pull Request", link.render(markup)));
    }

    let url = link::commit_url(ctx)?;
    let sha = link::short_sha(ctx)?;
    let label = match ctx.trigger() {
        TriggerEvent::Push => format!("{sha} ({})", ctx.branch_name().unwrap_or_default()),
        _ => sha.to_string(),
    };

    Ok(ResolvedField::new("Commit", Link::code(url, label).render(markup)))
}
