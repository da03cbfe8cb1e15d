//! Cohere chat adapter (single prompt with preamble)

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::chat_completions;
use super::error::{ProviderError, ProviderResult};
use super::traits::{str_at, sum_at, CompletionRequest, Provider};
use super::transport::HttpTransport;
use crate::types::{AnalysisResult, ProviderKind};

pub struct CohereProvider {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
}

impl CohereProvider {
    pub const DEFAULT_API_BASE: &'static str = "https://api.cohere.ai/v1";
    pub const DEFAULT_MODEL: &'static str = "command-r-plus";

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
}

#[async_trait]
impl Provider for CohereProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Cohere
    }

    fn default_model(&self) -> &str {
        Self::DEFAULT_MODEL
    }

    fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    fn endpoint(&self, _credential: &str, _model: &str) -> ProviderResult<String> {
        Ok(format!("{}/chat", self.api_base))
    }

    fn authenticate(&self, credential: &str) -> ProviderResult<Vec<(String, String)>> {
        Ok(chat_completions::bearer(credential))
    }

    fn build_payload(&self, request: &CompletionRequest, model: &str) -> Value {
        json!({
            "model": model,
            "message": request.prompt(),
            "preamble": request.system,
            "max_tokens": request.max_tokens,
        })
    }

    // The v1 chat response does not echo the model
    fn parse_response(&self, body: Value, model: &str) -> ProviderResult<AnalysisResult> {
        let text = str_at(&body, "/text")
            .ok_or_else(|| ProviderError::response_parse(self.name(), "missing text"))?;

        Ok(AnalysisResult {
            analysis: text.to_string(),
            provider: self.name().to_string(),
            model: model.to_string(),
            tokens_used: sum_at(
                &body,
                "/meta/billed_units/input_tokens",
                "/meta/billed_units/output_tokens",
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::{MockReply, MockTransport};

    #[tokio::test]
    async fn test_preamble_and_message() {
        let transport = Arc::new(MockTransport::with_replies(vec![MockReply::ok(json!({
            "response_id": "r1",
            "text": "Command R says: good.",
            "meta": {"billed_units": {"input_tokens": 40, "output_tokens": 12}}
        }))]));
        let provider = CohereProvider::new(transport.clone());
        let request = CompletionRequest::new("Preamble here.", "Task.", 256).with_context("Context. ");

        let result = provider.analyze("co-0123456789", &request).await.unwrap();
        assert_eq!(result.analysis, "Command R says: good.");
        assert_eq!(result.provider, "Cohere");
        assert_eq!(result.model, "command-r-plus");
        assert_eq!(result.tokens_used, Some(52));

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "https://api.cohere.ai/v1/chat");
        let body = sent.body.unwrap();
        assert_eq!(body["preamble"], "Preamble here.");
        assert_eq!(body["message"], "Context. Task.");
        assert_eq!(body["max_tokens"], 256);
        assert!(body.get("messages").is_none());
    }

    #[test]
    fn test_missing_text() {
        let provider = CohereProvider::new(Arc::new(MockTransport::new()));
        assert!(provider.parse_response(json!({"meta": {}}), "command-r").is_err());
        let result = provider.parse_response(json!({"text": "t"}), "command-r").unwrap();
        assert_eq!(result.tokens_used, None);
    }
}
