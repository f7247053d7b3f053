//! Send orchestration: post a new message or update the one already sent.
//!
//! The message is resolved before any network call, so a resolution error
//! never leaves a half-sent notification behind. Failed sends are returned
//! to the caller unchanged; the one exception is an update whose message no
//! longer exists, which may fall back to posting a fresh one.

use tracing::{debug, info, warn};

use crate::github::commands;
use crate::message::Message;
use crate::model::ExecutionContext;
use crate::resolve::ResolveError;
use crate::slack::{MessageTs, SlackError, Transport};

/// Whether the message has been sent, and under which timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Delivery {
    #[default]
    Unsent,
    Sent(MessageTs),
}

impl Delivery {
    pub fn timestamp(&self) -> Option<&MessageTs> {
        match self {
            Self::Unsent => None,
            Self::Sent(ts) => Some(ts),
        }
    }
}

impl From<Option<MessageTs>> for Delivery {
    fn from(ts: Option<MessageTs>) -> Self {
        ts.map_or(Self::Unsent, Self::Sent)
    }
}

/// Errors that can occur while sending.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Slack(#[from] SlackError),
}

/// Post the message if unsent, otherwise update it in place.
///
/// Returns the delivery state after the send: always `Sent`.
pub async fn send<T: Transport + ?Sized>(
    transport: &T,
    message: &Message,
    ctx: &ExecutionContext,
    delivery: &Delivery,
    ignore_message_not_found: bool,
) -> Result<Delivery, SendError> {
    debug!(
        status = %message.status().status,
        markup = ?message.markup(),
        "Rendering Slack message"
    );
    let rendered = message.render(ctx)?;
    let payload = &rendered.payload;

    let ts = match delivery {
        Delivery::Unsent => {
            let _group = commands::group("Post Slack message");
            transport.post(payload).await?
        }
        Delivery::Sent(ts) => {
            let _group = commands::group("Update Slack message");
            if let Some(posted_at) = ts.posted_at() {
                info!("Updating message posted at {posted_at}");
            }

            match transport.update(payload, ts).await {
                Ok(ts) => ts,
                Err(e) if ignore_message_not_found && e.is_message_not_found() => {
                    warn!("Slack message {ts} not found, posting a new one");
                    transport.post(payload).await?
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    Ok(Delivery::Sent(ts))
}
