use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    client::{ChatCompletionRequest, CompletionTransport},
    config::AppConfig,
    error::ServiceError,
    prompt::{GenerationRequest, GenerationResponse, PromptSpec},
};

/// Returned with a 200 when the provider answers successfully but without a
/// `choices[0].message.content` string.
pub const UNEXPECTED_FORMAT_SENTINEL: &str = "Error: Unexpected response format from AI.";

pub type CompletionResult = Result<GenerationResponse, ServiceError>;

pub struct CompletionGateway {
    config: Arc<AppConfig>,
    transport: Arc<dyn CompletionTransport>,
}

impl CompletionGateway {
    pub fn new(config: Arc<AppConfig>, transport: Arc<dyn CompletionTransport>) -> Self {
        Self { config, transport }
    }

    pub fn has_credential(&self) -> bool {
        self.config.api_token.is_some()
    }

    pub fn credential(&self) -> Result<&str, ServiceError> {
        self.config
            .api_token
            .as_deref()
            .ok_or_else(|| ServiceError::Configuration("HF_TOKEN is not configured".into()))
    }

    pub async fn handle(&self, request: GenerationRequest) -> CompletionResult {
        let token = self.credential()?;

        if request.text.is_empty() {
            return Err(ServiceError::Validation("Text is required".into()));
        }

        let mode = request.mode();
        info!(
            mode = mode.as_str(),
            tone = request.tone(),
            chars = request.text.chars().count(),
            "generating content"
        );

        let prompt = PromptSpec::from_request(&request);
        let body = ChatCompletionRequest::new(&self.config.model, prompt, &self.config.generation);

        let reply = self.transport.send(token, &body).await?;
        debug!(status = reply.status, "completion API replied");

        if !reply.is_success() {
            warn!(status = reply.status, "completion API returned an error");
            return Err(ServiceError::Upstream {
                status: reply.status,
                body: truncate_chars(&reply.body, self.config.error_body_limit),
            });
        }

        let payload: Value = serde_json::from_str(&reply.body)
            .map_err(|e| ServiceError::Decode(e.to_string()))?;

        let result = match extract_content(&payload) {
            Some(content) => content.trim().to_string(),
            None => {
                // Kept for compatibility with the page, which only looks at `result`.
                // It hides provider schema drift behind a 200.
                warn!("completion API payload has no choices[0].message.content");
                UNEXPECTED_FORMAT_SENTINEL.to_string()
            }
        };

        Ok(GenerationResponse { result })
    }
}

fn extract_content(payload: &Value) -> Option<&str> {
    payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
}

fn truncate_chars(raw: &str, limit: usize) -> String {
    match raw.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &raw[..idx]),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{StubTransport, UpstreamReply};

    fn configured() -> Arc<AppConfig> {
        Arc::new(AppConfig::default().with_api_token("hf_test"))
    }

    fn gateway(config: Arc<AppConfig>, stub: &Arc<StubTransport>) -> CompletionGateway {
        CompletionGateway::new(config, stub.clone())
    }

    #[tokio::test]
    async fn empty_text_is_rejected_without_calling_out() {
        let stub = Arc::new(StubTransport::answering("unused"));
        let gateway = gateway(configured(), &stub);

        let err = gateway.handle(GenerationRequest::new("")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(err.status_code().as_u16(), 400);

        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn whitespace_only_text_is_forwarded() {
        let stub = Arc::new(StubTransport::answering("rewritten"));
        let gateway = gateway(configured(), &stub);

        let response = gateway.handle(GenerationRequest::new("   ")).await.unwrap();
        assert_eq!(response.result, "rewritten");

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.messages[1].content, "   ");
    }

    #[tokio::test]
    async fn missing_credential_fails_before_calling_out() {
        let stub = Arc::new(StubTransport::answering("unused"));
        let gateway = gateway(Arc::new(AppConfig::default()), &stub);
        assert!(!gateway.has_credential());

        let err = gateway
            .handle(GenerationRequest::new("some text"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));
        assert_eq!(err.status_code().as_u16(), 500);
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn credential_is_checked_before_text() {
        let stub = Arc::new(StubTransport::answering("unused"));
        let gateway = gateway(Arc::new(AppConfig::default()), &stub);

        let err = gateway.handle(GenerationRequest::new("")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));
    }

    #[tokio::test]
    async fn upstream_failure_reports_status() {
        let stub = Arc::new(StubTransport::new([UpstreamReply::new(
            503,
            "Service Unavailable",
        )]));
        let gateway = gateway(configured(), &stub);

        let err = gateway
            .handle(GenerationRequest::new("some text"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Upstream { status: 503, .. }));
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("Service Unavailable"));
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn upstream_error_body_is_truncated() {
        let config = AppConfig {
            error_body_limit: 10,
            ..AppConfig::default()
        }
        .with_api_token("hf_test");
        let stub = Arc::new(StubTransport::new([UpstreamReply::new(
            500,
            "x".repeat(200),
        )]));
        let gateway = gateway(Arc::new(config), &stub);

        let err = gateway
            .handle(GenerationRequest::new("some text"))
            .await
            .unwrap_err();
        match err {
            ServiceError::Upstream { body, .. } => {
                assert_eq!(body, format!("{}...", "x".repeat(10)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_choices_degrades_to_sentinel() {
        let stub = Arc::new(StubTransport::new([UpstreamReply::new(
            200,
            r#"{"id":"cmpl-1","object":"chat.completion"}"#,
        )]));
        let gateway = gateway(configured(), &stub);

        let response = gateway
            .handle(GenerationRequest::new("some text"))
            .await
            .unwrap();
        assert_eq!(response.result, UNEXPECTED_FORMAT_SENTINEL);
    }

    #[tokio::test]
    async fn non_string_content_degrades_to_sentinel() {
        let stub = Arc::new(StubTransport::new([UpstreamReply::new(
            200,
            r#"{"choices":[{"message":{"content":null}}]}"#,
        )]));
        let gateway = gateway(configured(), &stub);

        let response = gateway
            .handle(GenerationRequest::new("some text"))
            .await
            .unwrap();
        assert_eq!(response.result, UNEXPECTED_FORMAT_SENTINEL);
    }

    #[tokio::test]
    async fn non_json_success_body_is_a_decode_error() {
        let stub = Arc::new(StubTransport::new([UpstreamReply::new(200, "<html>")]));
        let gateway = gateway(configured(), &stub);

        let err = gateway
            .handle(GenerationRequest::new("some text"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[tokio::test]
    async fn result_is_trimmed() {
        let stub = Arc::new(StubTransport::answering("  Hello World  "));
        let gateway = gateway(configured(), &stub);

        let response = gateway
            .handle(GenerationRequest::new("some text"))
            .await
            .unwrap();
        assert_eq!(response.result, "Hello World");
    }

    #[tokio::test]
    async fn sends_system_then_user_with_configured_params() {
        let stub = Arc::new(StubTransport::answering("ok"));
        let gateway = gateway(configured(), &stub);

        let request = GenerationRequest::new("My original paragraph.")
            .with_mode("meta")
            .with_tone("Friendly");
        gateway.handle(request).await.unwrap();

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        let (token, sent) = &calls[0];
        assert_eq!(token, "hf_test");
        assert_eq!(sent.model, crate::config::DEFAULT_MODEL);
        assert_eq!(sent.messages.len(), 2);
        assert_eq!(sent.messages[0].role, "system");
        assert!(sent.messages[0].content.contains("Max 60 chars for Title"));
        assert!(sent.messages[0].content.contains("Tone: Friendly."));
        assert_eq!(sent.messages[1].role, "user");
        assert_eq!(sent.messages[1].content, "My original paragraph.");
        assert_eq!(sent.temperature, 0.9);
        assert_eq!(sent.top_p, 0.95);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }
}
