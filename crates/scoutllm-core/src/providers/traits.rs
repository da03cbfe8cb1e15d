//! Provider adapter trait

use async_trait::async_trait;
use serde_json::Value;

use super::error::{ProviderError, ProviderResult};
use super::transport::{HttpRequest, HttpTransport};
use crate::types::{AnalysisRequest, AnalysisResult, ProviderKind};

/// What every adapter receives: instructions, context, budget, optional model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub context: String,
    pub task: String,
    pub max_tokens: u32,
    pub model: Option<String>,
}

impl CompletionRequest {
    /// Create a request with no context and no pinned model
    pub fn new(system: impl Into<String>, task: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: system.into(),
            context: String::new(),
            task: task.into(),
            max_tokens,
            model: None,
        }
    }

    /// Set the context block
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Pin a model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// User-facing prompt: context followed directly by the task
    pub fn prompt(&self) -> String {
        format!("{}{}", self.context, self.task)
    }
}

impl From<&AnalysisRequest> for CompletionRequest {
    fn from(request: &AnalysisRequest) -> Self {
        Self {
            system: request.system_instruction.clone(),
            context: request.context.clone(),
            task: request.task_instruction.clone(),
            max_tokens: request.max_tokens,
            model: request.selection.model.clone(),
        }
    }
}

/// Provider adapter
///
/// An adapter knows one provider's wire format. The required methods cover
/// authentication, payload construction and response parsing; `send` and
/// `analyze` chain them over the shared transport and rarely need
/// overriding.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Which provider this adapter speaks to
    fn kind(&self) -> ProviderKind;

    /// Name reported in results and errors
    fn name(&self) -> &'static str {
        self.kind().label()
    }

    /// Model used when the caller does not pick one
    fn default_model(&self) -> &str;

    /// Transport used for the exchange
    fn transport(&self) -> &dyn HttpTransport;

    /// Full URL for a completion with `model`
    fn endpoint(&self, credential: &str, model: &str) -> ProviderResult<String>;

    /// Authentication headers derived from the credential
    fn authenticate(&self, credential: &str) -> ProviderResult<Vec<(String, String)>>;

    /// Provider-specific JSON body
    fn build_payload(&self, request: &CompletionRequest, model: &str) -> Value;

    /// Normalize a successful response body
    fn parse_response(&self, body: Value, model: &str) -> ProviderResult<AnalysisResult>;

    /// Caller-supplied model if present, else the provider default
    fn resolve_model(&self, request: &CompletionRequest) -> String {
        request
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.default_model())
            .to_string()
    }

    /// One network exchange against a specific model
    async fn send(
        &self,
        credential: &str,
        request: &CompletionRequest,
        model: &str,
    ) -> ProviderResult<AnalysisResult> {
        let url = self.endpoint(credential, model)?;
        let headers = self.authenticate(credential)?;
        let payload = self.build_payload(request, model);

        let response = self
            .transport()
            .send(HttpRequest::post(url, payload).headers(headers))
            .await
            .map_err(|e| ProviderError::transport(self.name(), e.to_string()))?;

        if !response.is_success() {
            return Err(ProviderError::http_status(
                self.name(),
                response.status,
                response.body,
            ));
        }

        let body = response
            .json()
            .map_err(|e| ProviderError::response_parse(self.name(), format!("body is not JSON: {}", e)))?;

        self.parse_response(body, model)
    }

    /// Run an analysis with the resolved model
    async fn analyze(
        &self,
        credential: &str,
        request: &CompletionRequest,
    ) -> ProviderResult<AnalysisResult> {
        let model = self.resolve_model(request);
        self.send(credential, request, &model).await
    }
}

/// String at a JSON pointer
pub(crate) fn str_at<'a>(body: &'a Value, pointer: &str) -> Option<&'a str> {
    body.pointer(pointer).and_then(Value::as_str)
}

/// Unsigned integer at a JSON pointer
pub(crate) fn u64_at(body: &Value, pointer: &str) -> Option<u64> {
    body.pointer(pointer).and_then(Value::as_u64)
}

/// Sum of two counters, only when both are reported
pub(crate) fn sum_at(body: &Value, first: &str, second: &str) -> Option<u64> {
    Some(u64_at(body, first)? + u64_at(body, second)?)
}
