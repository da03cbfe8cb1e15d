//! Adapter for a caller-defined HTTP endpoint
//!
//! The credential is a composite: `https://host/path|Header-Name: value`.
//! The part before the first `|` is the endpoint URL; the optional part after
//! it is split on the first `:` into one extra request header.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::{json, Value};

use super::error::{ProviderError, ProviderResult};
use super::traits::{str_at, CompletionRequest, Provider};
use super::transport::HttpTransport;
use crate::types::{AnalysisResult, ProviderKind};

/// Separates the endpoint URL from the header spec
pub const CREDENTIAL_DELIMITER: char = '|';

/// Response fields tried in order for the analysis text
const TEXT_FIELDS: [&str; 3] = ["text", "content", "response"];

/// Parsed form of the composite credential
#[derive(Clone, PartialEq, Eq)]
pub struct CustomEndpoint {
    pub url: String,
    pub header: Option<(String, String)>,
}

impl CustomEndpoint {
    /// Split a composite credential
    pub fn parse(credential: &str) -> ProviderResult<Self> {
        let (url, header_spec) = match credential.split_once(CREDENTIAL_DELIMITER) {
            Some((url, spec)) => (url.trim(), Some(spec)),
            None => (credential.trim(), None),
        };

        let invalid = || ProviderError::credential_format(ProviderKind::Custom.label());

        if url.is_empty() || reqwest::Url::parse(url).is_err() {
            return Err(invalid());
        }

        let header = header_spec
            .map(|spec| match spec.split_once(':') {
                Some((name, value)) => (name.trim().to_string(), value.trim().to_string()),
                None => (spec.trim().to_string(), String::new()),
            })
            .filter(|(name, _)| !name.is_empty());

        // Anything the HTTP client would refuse is a malformed credential
        if let Some((name, value)) = &header {
            if HeaderName::from_bytes(name.as_bytes()).is_err() || HeaderValue::from_str(value).is_err() {
                return Err(invalid());
            }
        }

        Ok(Self {
            url: url.to_string(),
            header,
        })
    }

    /// The header value, which is the secret part of the credential
    pub fn secret(&self) -> Option<&str> {
        self.header
            .as_ref()
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }
}

impl std::fmt::Debug for CustomEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomEndpoint")
            .field("header", &self.header.as_ref().map(|(name, _)| name))
            .finish_non_exhaustive()
    }
}

pub struct CustomProvider {
    transport: Arc<dyn HttpTransport>,
}

impl CustomProvider {
    pub const DEFAULT_MODEL: &'static str = "custom";

    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    fn extract_text(body: &Value) -> String {
        match TEXT_FIELDS.iter().find_map(|field| body.get(*field)) {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        }
    }
}

#[async_trait]
impl Provider for CustomProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Custom
    }

    fn default_model(&self) -> &str {
        Self::DEFAULT_MODEL
    }

    fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    // A custom endpoint has no model choice
    fn resolve_model(&self, _request: &CompletionRequest) -> String {
        Self::DEFAULT_MODEL.to_string()
    }

    fn endpoint(&self, credential: &str, _model: &str) -> ProviderResult<String> {
        Ok(CustomEndpoint::parse(credential)?.url)
    }

    fn authenticate(&self, credential: &str) -> ProviderResult<Vec<(String, String)>> {
        Ok(CustomEndpoint::parse(credential)?.header.into_iter().collect())
    }

    fn build_payload(&self, request: &CompletionRequest, _model: &str) -> Value {
        json!({
            "system_prompt": request.system,
            "prompt": request.prompt(),
            "max_tokens": request.max_tokens,
        })
    }

    fn parse_response(&self, body: Value, model: &str) -> ProviderResult<AnalysisResult> {
        Ok(AnalysisResult {
            analysis: Self::extract_text(&body),
            provider: self.name().to_string(),
            model: str_at(&body, "/model").unwrap_or(model).to_string(),
            tokens_used: None,
        })
    }
}
