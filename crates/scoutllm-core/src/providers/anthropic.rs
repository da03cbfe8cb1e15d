//! Anthropic Messages API adapter

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::error::{ProviderError, ProviderResult};
use super::traits::{str_at, sum_at, CompletionRequest, Provider};
use super::transport::HttpTransport;
use crate::types::{AnalysisResult, ChatMessage, ProviderKind};

pub struct AnthropicProvider {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
}

impl AnthropicProvider {
    pub const DEFAULT_API_BASE: &'static str = "https://api.anthropic.com/v1";
    pub const DEFAULT_MODEL: &'static str = "claude-3-opus-20240229";
    pub const API_VERSION: &'static str = "2023-06-01";

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
impl Provider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn default_model(&self) -> &str {
        Self::DEFAULT_MODEL
    }

    fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    fn endpoint(&self, _credential: &str, _model: &str) -> ProviderResult<String> {
        Ok(format!("{}/messages", self.api_base))
    }

    fn authenticate(&self, credential: &str) -> ProviderResult<Vec<(String, String)>> {
        Ok(vec![
            ("x-api-key".to_string(), credential.trim().to_string()),
            ("anthropic-version".to_string(), Self::API_VERSION.to_string()),
        ])
    }

    // The Messages API takes the system instruction as a top-level field
    fn build_payload(&self, request: &CompletionRequest, model: &str) -> Value {
        json!({
            "model": model,
            "max_tokens": request.max_tokens,
            "system": request.system,
            "messages": [ChatMessage::user(request.prompt())],
        })
    }

    fn parse_response(&self, body: Value, model: &str) -> ProviderResult<AnalysisResult> {
        let blocks = body
            .get("content")
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::response_parse(self.name(), "missing content array"))?;

        let texts: Vec<&str> = blocks
            .iter()
            .filter(|block| block.get("type").and_then(Value::as_str).unwrap_or("text") == "text")
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .collect();
        if texts.is_empty() {
            return Err(ProviderError::response_parse(self.name(), "no text content block"));
        }

        Ok(AnalysisResult {
            analysis: texts.concat(),
            provider: self.name().to_string(),
            model: str_at(&body, "/model").unwrap_or(model).to_string(),
            tokens_used: sum_at(&body, "/usage/input_tokens", "/usage/output_tokens"),
        })
    }
}
