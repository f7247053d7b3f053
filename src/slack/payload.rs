//! Wire shape of a message: text plus one colored attachment of fields.

use serde::Serialize;

use crate::model::{HexColor, Markup, ResolvedField};

/// The body shared by `chat.postMessage` and `chat.update`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub text: String,

    /// Empty when the message has no fields.
    pub attachments: Vec<Attachment>,
}

impl Payload {
    pub fn new(text: &str, fields: &[ResolvedField], color: &HexColor, markup: Markup) -> Self {
        let attachments = if fields.is_empty() {
            Vec::new()
        } else {
            vec![Attachment {
                color: color.as_str().to_string(),
                blocks: vec![Block::Section {
                    fields: fields
                        .iter()
                        .map(|f| TextObject::new(f.block_text(markup), markup))
                        .collect(),
                }],
            }]
        };

        Self {
            text: text.to_string(),
            attachments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub color: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { fields: Vec<TextObject> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    Mrkdwn { text: String },
    PlainText { text: String },
}

impl TextObject {
    fn new(text: String, markup: Markup) -> Self {
        match markup {
            Markup::Mrkdwn => Self::Mrkdwn { text },
            Markup::PlainText => Self::PlainText { text },
        }
    }
}
