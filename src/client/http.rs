use async_trait::async_trait;
use tracing::debug;

use crate::{
    client::{ChatCompletionRequest, CompletionTransport, UpstreamReply},
    error::ServiceError,
};

/// Posts to an OpenAI-compatible `/chat/completions` endpoint with a bearer token.
///
/// No client timeout is configured; the call lives as long as the inbound
/// request that triggered it.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn send(
        &self,
        api_token: &str,
        request: &ChatCompletionRequest,
    ) -> Result<UpstreamReply, ServiceError> {
        debug!(endpoint = %self.endpoint, model = %request.model, "posting chat completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_token)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(UpstreamReply { status, body })
    }
}
