//! Action inputs: validation of the raw strings the runner passes in.
//!
//! Every input arrives as a string, empty when unset. Each parser accepts
//! the empty string where the input is optional and names the input in
//! its error otherwise.

use crate::model::{HexColor, Markup, Status};
use crate::slack::MessageTs;

/// Errors for input values that fail validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Invalid {0} input value. Should be a valid HEX color")]
    Color(&'static str),

    #[error("Invalid {0} input value. Should be: in-progress|success|failure|cancelled|skipped")]
    Status(&'static str),

    #[error("Invalid {0} input value. Should be a valid UNIX timestamp")]
    Timestamp(&'static str),

    #[error("Invalid {0} input value. Should be: mrkdwn|plain_text")]
    FieldType(&'static str),

    #[error(
        "Input does not meet YAML 1.2 \"Core Schema\" specification: {0}\n\
         Support boolean input list: `true | True | TRUE | false | False | FALSE`"
    )]
    Boolean(&'static str),
}

/// Raw input strings, as read from `INPUT_*` variables or flags.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub status: String,
    pub color: String,
    pub text: String,
    pub fields: String,
    pub field_type: String,
    pub timestamp: String,
    pub ignore_failures: String,
    pub ignore_message_not_found: String,
}

/// Validated inputs. `None` means "not given" so config and defaults can apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    pub status: Status,
    pub color: Option<HexColor>,
    pub text: Option<String>,
    pub fields: Option<Vec<String>>,
    pub field_type: Option<Markup>,
    pub timestamp: Option<MessageTs>,
    pub ignore_failures: bool,
    pub ignore_message_not_found: bool,
}

impl RawInputs {
    /// Validate every input, failing on the first invalid one.
    pub fn parse(&self) -> Result<Inputs, InputError> {
        Ok(Inputs {
            status: status("status", &self.status)?,
            color: color("color", &self.color)?,
            text: non_empty(&self.text),
            fields: multiline(&self.fields),
            field_type: field_type("field-type", &self.field_type)?,
            timestamp: timestamp("timestamp", &self.timestamp)?,
            ignore_failures: boolean("ignore-failures", &self.ignore_failures)?,
            ignore_message_not_found: boolean(
                "ignore-message-not-found",
                &self.ignore_message_not_found,
            )?,
        })
    }
}

/// An unset status is the catalog default; a set one must be a known code.
pub fn status(name: &'static str, value: &str) -> Result<Status, InputError> {
    if value.trim().is_empty() {
        return Ok(Status::lookup(value));
    }
    Status::parse(value).ok_or(InputError::Status(name))
}

pub fn color(name: &'static str, value: &str) -> Result<Option<HexColor>, InputError> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| InputError::Color(name))
}

pub fn timestamp(name: &'static str, value: &str) -> Result<Option<MessageTs>, InputError> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| InputError::Timestamp(name))
}

pub fn field_type(name: &'static str, value: &str) -> Result<Option<Markup>, InputError> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| InputError::FieldType(name))
}

/// A YAML 1.2 core schema boolean.
pub fn boolean(name: &'static str, value: &str) -> Result<bool, InputError> {
    match value.trim() {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        _ => Err(InputError::Boolean(name)),
    }
}

/// Non-empty trimmed lines.
pub fn multiline(value: &str) -> Option<Vec<String>> {
    let lines: Vec<String> = value
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();
    (!lines.is_empty()).then_some(lines)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> RawInputs {
        RawInputs {
            status: "unknown".to_string(),
            fields: "{STATUS}\n{REF}".to_string(),
            text: "GitHub Actions {GITHUB_JOB} job in {GITHUB_REF} by {GITHUB_ACTOR}".to_string(),
            ignore_failures: "false".to_string(),
            ignore_message_not_found: "true".to_string(),
            ..RawInputs::default()
        }
    }

    #[test]
    fn parses_default_inputs() {
        let inputs = defaults().parse().unwrap();
        assert_eq!(
            inputs,
            Inputs {
                status: Status::Unknown,
                color: None,
                text: Some(
                    "GitHub Actions {GITHUB_JOB} job in {GITHUB_REF} by {GITHUB_ACTOR}"
                        .to_string()
                ),
                fields: Some(vec!["{STATUS}".to_string(), "{REF}".to_string()]),
                field_type: None,
                timestamp: None,
                ignore_failures: false,
                ignore_message_not_found: true,
            }
        );
    }

    #[test]
    fn missing_booleans_are_rejected() {
        let err = RawInputs::default().parse().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Input does not meet YAML 1.2 \"Core Schema\" specification: ignore-failures\n\
             Support boolean input list: `true | True | TRUE | false | False | FALSE`"
        );
    }

    #[test]
    fn booleans() {
        for value in ["true", "True", "TRUE"] {
            assert_eq!(boolean("x", value), Ok(true));
        }
        for value in ["false", "False", "FALSE"] {
            assert_eq!(boolean("x", value), Ok(false));
        }
        assert_eq!(boolean("x", "yes"), Err(InputError::Boolean("x")));
    }

    #[test]
    fn statuses() {
        assert_eq!(status("status", ""), Ok(Status::Unknown));
        assert_eq!(status("status", "  "), Ok(Status::Unknown));
        assert_eq!(status("status", " success "), Ok(Status::Success));
        assert_eq!(status("status", "in-progress"), Ok(Status::InProgress));
        assert_eq!(status("status", "failure"), Ok(Status::Failure));

        let err = status("status", "done").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status input value. Should be: in-progress|success|failure|cancelled|skipped"
        );
    }

    #[test]
    fn colors() {
        assert_eq!(color("color", ""), Ok(None));
        assert_eq!(
            color("color", "#ff0000").unwrap().unwrap().as_str(),
            "#ff0000"
        );

        let err = color("color", "red").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid color input value. Should be a valid HEX color"
        );
    }

    #[test]
    fn timestamps() {
        assert_eq!(timestamp("timestamp", ""), Ok(None));
        assert_eq!(
            timestamp("timestamp", "1700000000.000100")
                .unwrap()
                .unwrap()
                .as_str(),
            "1700000000.000100"
        );

        let err = timestamp("timestamp", "yesterday").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid timestamp input value. Should be a valid UNIX timestamp"
        );
    }

    #[test]
    fn field_types() {
        assert_eq!(field_type("field-type", ""), Ok(None));
        assert_eq!(
            field_type("field-type", "plain_text"),
            Ok(Some(Markup::PlainText))
        );
        assert_eq!(
            field_type("field-type", "html"),
            Err(InputError::FieldType("field-type"))
        );
    }

    #[test]
    fn multiline_drops_blank_lines() {
        assert_eq!(multiline(""), None);
        assert_eq!(multiline("\n  \n"), None);
        assert_eq!(
            multiline("{STATUS}\n\n  Env: prod  \r\n"),
            Some(vec!["{STATUS}".to_string(), "Env: prod".to_string()])
        );
    }

    #[test]
    fn blank_text_is_unset() {
        let raw = RawInputs {
            text: "   ".to_string(),
            ..defaults()
        };
        assert_eq!(raw.parse().unwrap().text, None);
    }
}
