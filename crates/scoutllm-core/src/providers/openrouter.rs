//! OpenRouter adapter (OpenAI-compatible chat completions)

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::chat_completions;
use super::error::ProviderResult;
use super::traits::{CompletionRequest, Provider};
use super::transport::HttpTransport;
use crate::types::{AnalysisResult, ProviderKind};

/// Adapter for openrouter.ai
pub struct OpenRouterProvider {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
}

impl OpenRouterProvider {
    pub const DEFAULT_API_BASE: &'static str = "https://openrouter.ai/api/v1";
    pub const DEFAULT_MODEL: &'static str = "openai/gpt-4o";

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
impl Provider for OpenRouterProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenRouter
    }

    fn default_model(&self) -> &str {
        Self::DEFAULT_MODEL
    }

    fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    fn endpoint(&self, _credential: &str, _model: &str) -> ProviderResult<String> {
        Ok(format!("{}/chat/completions", self.api_base))
    }

    fn authenticate(&self, credential: &str) -> ProviderResult<Vec<(String, String)>> {
        Ok(chat_completions::bearer(credential))
    }

    fn build_payload(&self, request: &CompletionRequest, model: &str) -> Value {
        chat_completions::payload(request, model)
    }

    fn parse_response(&self, body: Value, model: &str) -> ProviderResult<AnalysisResult> {
        chat_completions::parse(self.name(), &body, model)
    }
}
