//! Slack transport: post and update messages through the Web API.
//!
//! Message identity in Slack is the timestamp (`ts`) returned when a message
//! is posted. It is the handle for later updates and the action's output.

mod client;
#[cfg(test)]
pub mod fake;
mod payload;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use jiff::Timestamp;

pub use client::{DEFAULT_API_URL, SlackClient};
pub use payload::Payload;

/// Slack's error code for a `ts` that no longer exists.
const MESSAGE_NOT_FOUND: &str = "message_not_found";

/// Errors that can occur talking to Slack.
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    /// Slack answered `ok: false` with this error code.
    #[error("Slack API error: {0}")]
    Api(String),

    #[error("Slack channel not found: #{0}")]
    ChannelNotFound(String),

    #[error("Slack token not found. Did you forget to set the SLACK_TOKEN environment variable?")]
    MissingToken,

    #[error("Slack token is not a valid header value")]
    InvalidToken,

    #[error("Slack response is missing the message timestamp")]
    MissingTimestamp,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SlackError {
    /// Whether the message being updated does not exist (deleted, or a stale `ts`).
    pub fn is_message_not_found(&self) -> bool {
        matches!(self, Self::Api(code) if code == MESSAGE_NOT_FOUND)
    }
}

pub type Result<T> = core::result::Result<T, SlackError>;

/// Posts and updates messages.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Post a new message, returning its timestamp.
    async fn post(&self, payload: &Payload) -> Result<MessageTs>;

    /// Replace the message at `ts`, returning the timestamp Slack reports.
    async fn update(&self, payload: &Payload, ts: &MessageTs) -> Result<MessageTs>;
}

/// A Slack message timestamp, e.g. `1700000000.000100`.
///
/// Seconds since the epoch with an optional fractional part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageTs(String);

impl MessageTs {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// When the message was posted, to the second.
    pub fn posted_at(&self) -> Option<Timestamp> {
        let seconds = self.0.split('.').next()?.parse().ok()?;
        Timestamp::from_second(seconds).ok()
    }
}

/// Error for strings that are not valid message timestamps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a Slack message timestamp: {0}")]
pub struct InvalidMessageTs(pub String);

impl FromStr for MessageTs {
    type Err = InvalidMessageTs;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let invalid = || InvalidMessageTs(s.to_string());

        let (seconds, fraction) = s.split_once('.').unwrap_or((s, ""));
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let seconds: i64 = seconds.parse().map_err(|_| invalid())?;
        if seconds <= 0 || Timestamp::from_second(seconds).is_err() {
            return Err(invalid());
        }

        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for MessageTs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
