//! Message assembly: status, field specs and text template in, Slack payload out.
//!
//! A [`Message`] holds only unresolved configuration. Text and fields are
//! computed against a context snapshot each time they are asked for, so a
//! message built early in a run never carries stale values.

use serde::Serialize;

use crate::model::{ExecutionContext, FieldSpec, Markup, ResolvedField, Status, StatusEntry};
use crate::resolve::{self, parse_field_line, resolve_field, resolve_text};
use crate::slack::Payload;

/// Text used when none is configured.
pub const DEFAULT_TEXT: &str = "GitHub Actions {GITHUB_JOB} job in {GITHUB_REF} by {GITHUB_ACTOR}";

/// Field lines used when none are configured.
pub const DEFAULT_FIELDS: [&str; 2] = ["{STATUS}", "{REF}"];

/// An unresolved notification message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    status: StatusEntry,
    fields: Vec<FieldSpec>,
    text: String,
    markup: Markup,
}

impl Default for Message {
    fn default() -> Self {
        Self::new(None, StatusEntry::default())
    }
}

impl Message {
    /// A message with the given text template (or the default when empty)
    /// and the default field lines.
    pub fn new(text: Option<&str>, status: StatusEntry) -> Self {
        let text = text
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TEXT);

        Self {
            status,
            fields: Vec::new(),
            text: text.to_string(),
            markup: Markup::default(),
        }
        .with_fields(DEFAULT_FIELDS)
    }

    /// Replace the configured field lines.
    ///
    /// Lines are parsed into specs here; malformed ones are dropped.
    /// Keywords are not resolved until [`fields`](Self::fields) is called.
    #[must_use]
    pub fn with_fields<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fields = lines
            .into_iter()
            .filter_map(|line| parse_field_line(line.as_ref()))
            .collect();
        self
    }

    /// Render field values as mrkdwn or plain text.
    #[must_use]
    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }

    pub fn status(&self) -> &StatusEntry {
        &self.status
    }

    pub fn markup(&self) -> Markup {
        self.markup
    }

    /// The text template with its keywords interpolated.
    pub fn text(&self, ctx: &ExecutionContext) -> resolve::Result<String> {
        resolve_text(&self.text, ctx)
    }

    /// The resolved fields, in configured order.
    pub fn fields(&self, ctx: &ExecutionContext) -> resolve::Result<Vec<ResolvedField>> {
        self.fields
            .iter()
            .map(|spec| resolve_field(spec, ctx, &self.status, self.markup))
            .collect()
    }

    /// Resolve everything and build the Slack payload.
    pub fn render(&self, ctx: &ExecutionContext) -> resolve::Result<Rendered> {
        let text = self.text(ctx)?;
        let fields = self.fields(ctx)?;
        let payload = Payload::new(&text, &fields, &self.status.color, self.markup);

        Ok(Rendered {
            status: self.status.status,
            text,
            fields,
            payload,
        })
    }
}

/// A fully resolved message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub status: Status,
    pub text: String,
    pub fields: Vec<ResolvedField>,

    /// What goes over the wire.
    pub payload: Payload,
}
