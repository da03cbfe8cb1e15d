//! OpenAI chat-completions adapter
//!
//! The only adapter with a retry: when the requested model fails for any
//! reason, one more attempt is made against the low-cost fallback model.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::chat_completions;
use super::error::ProviderResult;
use super::traits::{CompletionRequest, Provider};
use super::transport::HttpTransport;
use crate::logging::SharedLogger;
use crate::types::{AnalysisResult, ProviderKind};

/// Adapter for api.openai.com
pub struct OpenAiProvider {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
    logger: SharedLogger,
}

impl OpenAiProvider {
    pub const DEFAULT_API_BASE: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &'static str = "gpt-4o";
    /// Lowest-cost model, target of the single fallback attempt
    pub const FALLBACK_MODEL: &'static str = "gpt-3.5-turbo";

    /// Create an adapter against the public endpoint
    pub fn new(transport: Arc<dyn HttpTransport>, logger: SharedLogger) -> Self {
        Self {
            transport,
            api_base: Self::DEFAULT_API_BASE.to_string(),
            logger,
        }
    }

    /// Use a different base URL
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
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

    async fn analyze(
        &self,
        credential: &str,
        request: &CompletionRequest,
    ) -> ProviderResult<AnalysisResult> {
        let model = self.resolve_model(request);

        match self.send(credential, request, &model).await {
            Ok(result) => Ok(result),
            Err(err) if model != Self::FALLBACK_MODEL => {
                self.logger.warn(&format!(
                    "[OpenAiProvider] {} failed ({} error), retrying once with {}",
                    model,
                    err.kind(),
                    Self::FALLBACK_MODEL
                ));
                self.send(credential, request, Self::FALLBACK_MODEL).await
            }
            Err(err) => Err(err),
        }
    }
}
