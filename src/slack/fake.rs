//! Fake transport for testing.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{MessageTs, Payload, Result, Transport};

/// Timestamp returned when no response is scripted.
pub const FAKE_TS: &str = "1700000000.000100";

/// A recorded transport call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Post(Payload),
    Update(Payload, MessageTs),
}

/// Records calls and replays scripted responses in order.
#[derive(Default)]
pub struct FakeTransport {
    calls: Mutex<Vec<Call>>,
    responses: Mutex<VecDeque<Result<MessageTs>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next call. Unscripted calls succeed with [`FAKE_TS`].
    #[must_use]
    pub fn respond(self, response: Result<MessageTs>) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
        self
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: Call) -> Result<MessageTs> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Ok(FAKE_TS.parse().unwrap()))
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn post(&self, payload: &Payload) -> Result<MessageTs> {
        self.record(Call::Post(payload.clone()))
    }

    async fn update(&self, payload: &Payload, ts: &MessageTs) -> Result<MessageTs> {
        self.record(Call::Update(payload.clone(), ts.clone()))
    }
}
