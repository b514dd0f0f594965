use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    client::{ChatCompletionRequest, CompletionTransport, UpstreamReply},
    error::ServiceError,
};

/// In-process transport that replays canned replies and records every request.
///
/// Once the queue is drained it keeps answering with the last reply.
pub struct StubTransport {
    replies: Mutex<VecDeque<UpstreamReply>>,
    last: Mutex<Option<UpstreamReply>>,
    calls: Mutex<Vec<(String, ChatCompletionRequest)>>,
}

impl StubTransport {
    pub fn new(replies: impl IntoIterator<Item = UpstreamReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replies `200` with a single choice whose content is `content`.
    pub fn answering(content: &str) -> Self {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        });
        Self::new([UpstreamReply::new(200, body.to_string())])
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Token and request of every call so far, oldest first.
    pub fn calls(&self) -> Vec<(String, ChatCompletionRequest)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CompletionTransport for StubTransport {
    async fn send(
        &self,
        api_token: &str,
        request: &ChatCompletionRequest,
    ) -> Result<UpstreamReply, ServiceError> {
        self.calls
            .lock()
            .push((api_token.to_string(), request.clone()));

        let mut last = self.last.lock();
        if let Some(reply) = self.replies.lock().pop_front() {
            *last = Some(reply);
        }
        last.clone()
            .ok_or_else(|| ServiceError::Transport("stub transport has no replies".into()))
    }
}
