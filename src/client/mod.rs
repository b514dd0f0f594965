mod http;
mod stub;
mod types;

pub use http::HttpTransport;
pub use stub::StubTransport;
pub use types::{ChatCompletionRequest, ChatMessage, UpstreamReply};

use async_trait::async_trait;

use crate::error::ServiceError;

/// Sends one chat-completion request and hands back whatever came back.
///
/// Implementations do not interpret the status or the payload; that is the
/// gateway's job. Only failures to get any reply at all surface as errors.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn send(
        &self,
        api_token: &str,
        request: &ChatCompletionRequest,
    ) -> Result<UpstreamReply, ServiceError>;
}
