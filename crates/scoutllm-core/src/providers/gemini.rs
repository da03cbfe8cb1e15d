//! Google Gemini adapter
//!
//! Gemini has no system role in this API shape, so the system instruction is
//! prepended to the prompt. The model id is embedded in the URL path.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::error::{ProviderError, ProviderResult};
use super::traits::{str_at, u64_at, CompletionRequest, Provider};
use super::transport::HttpTransport;
use crate::types::{AnalysisResult, ProviderKind};

pub struct GeminiProvider {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
}

impl GeminiProvider {
    pub const DEFAULT_API_BASE: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_MODEL: &'static str = "gemini-pro";
    pub const TEMPERATURE: f64 = 0.4;

    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            api_base: Self::DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Accept ids with or without the "models/" resource prefix
    fn path_model(model: &str) -> &str {
        model.strip_prefix("models/").unwrap_or(model)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn default_model(&self) -> &str {
        Self::DEFAULT_MODEL
    }

    fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    fn endpoint(&self, _credential: &str, model: &str) -> ProviderResult<String> {
        Ok(format!(
            "{}/models/{}:generateContent",
            self.api_base,
            urlencoding::encode(Self::path_model(model))
        ))
    }

    fn authenticate(&self, credential: &str) -> ProviderResult<Vec<(String, String)>> {
        Ok(vec![("x-goog-api-key".to_string(), credential.trim().to_string())])
    }

    fn build_payload(&self, request: &CompletionRequest, _model: &str) -> Value {
        let prompt = format!("{}\n\n{}", request.system, request.prompt());
        json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {
                "maxOutputTokens": request.max_tokens,
                "temperature": Self::TEMPERATURE,
            },
        })
    }

    fn parse_response(&self, body: Value, model: &str) -> ProviderResult<AnalysisResult> {
        let parts = body
            .pointer("/candidates/0/content/parts")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                let reason = str_at(&body, "/promptFeedback/blockReason")
                    .map(|r| format!("prompt blocked ({})", r))
                    .unwrap_or_else(|| "missing candidates[0].content.parts".to_string());
                ProviderError::response_parse(self.name(), reason)
            })?;

        let texts: Vec<&str> = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect();
        if texts.is_empty() {
            return Err(ProviderError::response_parse(self.name(), "candidate has no text parts"));
        }

        Ok(AnalysisResult {
            analysis: texts.concat(),
            provider: self.name().to_string(),
            model: model.to_string(),
            tokens_used: u64_at(&body, "/usageMetadata/totalTokenCount"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::{MockReply, MockTransport};
    use crate::providers::ErrorKind;

    const KEY: &str = "AIzaSyA-0123456789abcdefghij";

    #[tokio::test]
    async fn test_request_shape() {
        let transport = Arc::new(MockTransport::with_replies(vec![MockReply::ok(json!({
            "candidates": [{"content": {"parts": [{"text": "Part one. "}, {"text": "Part two."}]}}],
            "usageMetadata": {"totalTokenCount": 99}
        }))]));
        let provider = GeminiProvider::new(transport.clone());
        let request = CompletionRequest::new("Be kind.", "Review.", 800).with_context("CV\n\n");

        let result = provider.analyze(KEY, &request).await.unwrap();
        assert_eq!(result.analysis, "Part one. Part two.");
        assert_eq!(result.provider, "Google Gemini");
        assert_eq!(result.model, "gemini-pro");
        assert_eq!(result.tokens_used, Some(99));

        let sent = transport.last_request().unwrap();
        assert_eq!(
            sent.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );
        assert!(!sent.url.contains(KEY));
        assert_eq!(sent.header_value("x-goog-api-key"), Some(KEY));

        let body = sent.body.unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Be kind.\n\nCV\n\nReview.");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 800);
        assert_eq!(body["generationConfig"]["temperature"], 0.4);
    }

    #[test]
    fn test_model_id_cannot_change_request_target() {
        let provider = GeminiProvider::new(Arc::new(MockTransport::new()));
        let url = provider.endpoint(KEY, "../files?x=1#frag").unwrap();
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/..%2Ffiles%3Fx%3D1%23frag:generateContent"
        );
        assert_eq!(
            provider.endpoint(KEY, "models/gemini-1.5-pro").unwrap(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[tokio::test]
    async fn test_discovered_model_id_is_stripped() {
        let transport = Arc::new(MockTransport::with_replies(vec![MockReply::ok(json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
        }))]));
        let provider = GeminiProvider::new(transport.clone());
        let request = CompletionRequest::new("s", "t", 10).with_model("models/gemini-1.5-flash");

        let result = provider.analyze(KEY, &request).await.unwrap();
        assert_eq!(result.model, "models/gemini-1.5-flash");
        assert_eq!(result.tokens_used, None);
        assert!(transport
            .last_request()
            .unwrap()
            .url
            .ends_with("/models/gemini-1.5-flash:generateContent"));
    }

    #[test]
    fn test_blocked_prompt() {
        let provider = GeminiProvider::new(Arc::new(MockTransport::new()));
        let err = provider
            .parse_response(json!({"promptFeedback": {"blockReason": "SAFETY"}}), "gemini-pro")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseParse);
        assert!(err.to_string().contains("SAFETY"));
    }
}
