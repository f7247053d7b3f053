//! Display fields: the unresolved spec and the resolved name/value pair.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reserved tokens a whole field line can consist of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKeyword {
    /// `{REF}`: the pull request or commit that triggered the run.
    Ref,

    /// `{STATUS}`: the job status title.
    Status,
}

impl FieldKeyword {
    /// Match a trimmed field line against the reserved tokens.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "{REF}" => Some(Self::Ref),
            "{STATUS}" => Some(Self::Status),
            _ => None,
        }
    }
}

/// One display field before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    Keyword(FieldKeyword),
    Literal { name: String, value: String },
}

/// A display-ready field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    pub name: String,
    pub value: String,
}

impl ResolvedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The text of the Slack field element: name over value.
    pub fn block_text(&self, markup: Markup) -> String {
        match markup {
            Markup::Mrkdwn => format!("*{}*\n{}", self.name, self.value),
            Markup::PlainText => format!("{}\n{}", self.name, self.value),
        }
    }
}

/// How field values are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Markup {
    /// Slack markdown: links render as `<url|label>`.
    #[default]
    Mrkdwn,

    /// Plain text: links render as their label only.
    #[serde(alias = "plain-text")]
    PlainText,
}

/// Error for an unrecognized field type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type: {0}")]
pub struct UnknownMarkup(pub String);

impl FromStr for Markup {
    type Err = UnknownMarkup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mrkdwn" => Ok(Self::Mrkdwn),
            "plain_text" | "plain-text" => Ok(Self::PlainText),
            other => Err(UnknownMarkup(other.to_string())),
        }
    }
}
