//! HTTP client for the Slack Web API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::payload::Attachment;
use super::{MessageTs, Payload, Result, SlackError, Transport};

/// Base URL of the Slack Web API.
pub const DEFAULT_API_URL: &str = "https://slack.com/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size for `conversations.list`.
const CHANNEL_PAGE_LIMIT: &str = "200";

/// A Slack Web API client bound to one channel.
pub struct SlackClient {
    http: reqwest::Client,
    api_url: String,
    channel_id: String,
}

impl SlackClient {
    /// Build an authenticated client and resolve the channel to its ID.
    ///
    /// `channel` may be a name (with or without `#`) or a channel ID.
    pub async fn connect(api_url: &str, token: &str, channel: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SlackError::MissingToken);
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| SlackError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let mut client = Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            channel_id: String::new(),
        };
        client.channel_id = client.find_channel(channel).await?;
        Ok(client)
    }

    /// Page through `conversations.list` until the channel turns up.
    async fn find_channel(&self, channel: &str) -> Result<String> {
        let name = channel.trim().trim_start_matches('#');
        debug!("Finding #{name} channel...");

        let mut cursor = String::new();
        loop {
            let mut request = self
                .http
                .get(self.method_url("conversations.list"))
                .query(&[
                    ("types", "public_channel,private_channel"),
                    ("exclude_archived", "true"),
                    ("limit", CHANNEL_PAGE_LIMIT),
                ]);
            if !cursor.is_empty() {
                request = request.query(&[("cursor", cursor.as_str())]);
            }

            let response = request.send().await?.error_for_status()?;
            let page: ChannelPage = parse_response(response.json().await?)?;

            if let Some(found) = page.channels.iter().find(|c| c.name == name || c.id == name) {
                info!("Found #{} channel", found.name);
                debug!("Found channel ID: {}", found.id);
                return Ok(found.id.clone());
            }

            match page.response_metadata.map(|m| m.next_cursor) {
                Some(next) if !next.is_empty() => cursor = next,
                _ => return Err(SlackError::ChannelNotFound(name.to_string())),
            }
        }
    }

    async fn call<B: Serialize + Sync>(&self, method: &str, body: &B) -> Result<MessageTs> {
        let response = self
            .http
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        let posted: Posted = parse_response(response.json().await?)?;

        posted
            .ts
            .and_then(|ts| ts.parse().ok())
            .ok_or(SlackError::MissingTimestamp)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.api_url)
    }
}

#[async_trait]
impl Transport for SlackClient {
    async fn post(&self, payload: &Payload) -> Result<MessageTs> {
        debug!("Posting Slack message...");
        let body = PostMessage {
            channel: &self.channel_id,
            text: &payload.text,
            attachments: &payload.attachments,
        };

        let ts = self.call("chat.postMessage", &body).await?;
        info!("Posted Slack message");
        debug!("Timestamp: {ts}");
        Ok(ts)
    }

    async fn update(&self, payload: &Payload, ts: &MessageTs) -> Result<MessageTs> {
        debug!("Updating Slack message (timestamp: {ts})...");
        let body = UpdateMessage {
            channel: &self.channel_id,
            ts: ts.as_str(),
            text: &payload.text,
            attachments: &payload.attachments,
        };

        let ts = self.call("chat.update", &body).await?;
        info!("Updated Slack message");
        Ok(ts)
    }
}

/// Check the `ok` flag every Web API response carries, then decode the rest.
fn parse_response<T: DeserializeOwned>(body: serde_json::Value) -> Result<T> {
    #[derive(Deserialize)]
    struct Envelope {
        ok: bool,
        #[serde(default)]
        error: Option<String>,
    }

    let envelope = Envelope::deserialize(&body)?;
    if !envelope.ok {
        let code = envelope.error.unwrap_or_else(|| "unknown_error".to_string());
        return Err(SlackError::Api(code));
    }

    Ok(T::deserialize(body)?)
}

// ── Request and response shapes ──

/// Body of `chat.postMessage`. Attachments are left out when there are none.
#[derive(Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    attachments: &'a [Attachment],
}

/// Body of `chat.update`. An empty attachment list clears stale fields.
#[derive(Serialize)]
struct UpdateMessage<'a> {
    channel: &'a str,
    ts: &'a str,
    text: &'a str,
    attachments: &'a [Attachment],
}

#[derive(Debug, Deserialize)]
struct Posted {
    ts: Option<String>,
}

#[derive(Deserialize)]
struct ChannelPage {
    #[serde(default)]
    channels: Vec<Channel>,
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Deserialize)]
struct Channel {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}
