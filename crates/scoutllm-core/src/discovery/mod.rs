//! Model discovery
//!
//! Two tiers: a live listing from the provider when it offers one and a
//! credential is at hand, otherwise the static catalog. Every failure in the
//! live tier degrades to the catalog; callers always get a non-empty list
//! for a known provider, tagged with where it came from.

mod remote;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::catalog;
use crate::config::Settings;
use crate::logging::SharedLogger;
use crate::providers::{default_api_base, HttpTransport};
use crate::types::{ModelDescriptor, ProviderKind};

/// Where a model list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    /// Live listing from the provider
    Remote,
    /// Static catalog
    Catalog,
}

/// Models for one provider plus their origin
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredModels {
    pub models: Vec<ModelDescriptor>,
    pub source: ModelSource,
}

impl DiscoveredModels {
    fn catalog(kind: ProviderKind) -> Self {
        Self {
            models: catalog::default_models(kind),
            source: ModelSource::Catalog,
        }
    }
}

/// Why the live tier was skipped or abandoned
#[derive(Error, Debug, Clone, PartialEq, Eq)]
enum ListingFailure {
    #[error("no credential supplied")]
    NoCredential,

    #[error("credential rejected by format check")]
    InvalidCredential,

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("unreadable listing: {0}")]
    Parse(String),

    #[error("listing contained no usable models")]
    Empty,
}

/// Resolves the model list for a provider
pub struct ModelDiscovery {
    transport: Arc<dyn HttpTransport>,
    settings: Settings,
    logger: SharedLogger,
}

impl ModelDiscovery {
    pub fn new(transport: Arc<dyn HttpTransport>, settings: Settings, logger: SharedLogger) -> Self {
        Self {
            transport,
            settings,
            logger,
        }
    }

    /// Models for a provider, with their source
    ///
    /// A live listing that succeeds but yields no usable models is treated
    /// as a failure and answered from the catalog.
    pub async fn discover(&self, kind: ProviderKind, credential: Option<&str>) -> DiscoveredModels {
        if !catalog::descriptor(kind).remote_listing {
            return DiscoveredModels::catalog(kind);
        }

        match self.fetch_remote(kind, credential).await {
            Ok(models) => {
                self.logger.debug(&format!(
                    "[ModelDiscovery] {} listed {} models",
                    kind,
                    models.len()
                ));
                DiscoveredModels {
                    models,
                    source: ModelSource::Remote,
                }
            }
            Err(ListingFailure::NoCredential) => DiscoveredModels::catalog(kind),
            Err(failure) => {
                self.logger.warn(&format!(
                    "[ModelDiscovery] {} listing unavailable ({}), using catalog",
                    kind, failure
                ));
                DiscoveredModels::catalog(kind)
            }
        }
    }

    /// Models for a provider identifier; unknown providers have none
    pub async fn list_models(&self, provider: &str, credential: Option<&str>) -> Vec<ModelDescriptor> {
        match ProviderKind::parse(provider) {
            Some(kind) => self.discover(kind, credential).await.models,
            None => Vec::new(),
        }
    }

    async fn fetch_remote(
        &self,
        kind: ProviderKind,
        credential: Option<&str>,
    ) -> Result<Vec<ModelDescriptor>, ListingFailure> {
        let credential = credential
            .filter(|c| !c.trim().is_empty())
            .ok_or(ListingFailure::NoCredential)?;

        // Same check as dispatch, on the raw value
        if !catalog::descriptor(kind).validate_credential(credential) {
            return Err(ListingFailure::InvalidCredential);
        }

        let base = self
            .settings
            .api_base(kind)
            .or_else(|| default_api_base(kind).map(str::to_string))
            .ok_or(ListingFailure::Empty)?;

        let limit = self.settings.discovery_timeout();
        let request = remote::listing_request(kind, &base, credential)
            .ok_or(ListingFailure::Empty)?
            .timeout(limit);

        // The transport honors the request timeout; this bounds transports that do not
        let response = tokio::time::timeout(limit, self.transport.send(request))
            .await
            .map_err(|_| ListingFailure::Timeout(limit))?
            .map_err(|e| ListingFailure::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(ListingFailure::Status(response.status));
        }

        let body = response
            .json()
            .map_err(|e| ListingFailure::Parse(e.to_string()))?;
        let models = remote::parse_listing(kind, &body).map_err(ListingFailure::Parse)?;

        if models.is_empty() {
            return Err(ListingFailure::Empty);
        }
        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryLogger;
    use crate::providers::mock::{MockReply, MockTransport};
    use serde_json::json;

    const OPENAI_KEY: &str = "sk-live-abcdefghijkl";
    const GEMINI_KEY: &str = "AIzaSyA-0123456789abcdef";

    fn discovery(transport: &Arc<MockTransport>, logger: &Arc<MemoryLogger>) -> ModelDiscovery {
        ModelDiscovery::new(transport.clone(), Settings::default(), logger.clone())
    }

    #[tokio::test]
    async fn test_remote_listing_replaces_catalog() {
        let transport = Arc::new(MockTransport::with_replies(vec![MockReply::ok(json!({
            "data": [{"id": "gpt-4o-2024-08-06"}, {"id": "dall-e-3"}]
        }))]));
        let logger = Arc::new(MemoryLogger::new());

        let found = discovery(&transport, &logger)
            .discover(ProviderKind::OpenAi, Some(OPENAI_KEY))
            .await;
        assert_eq!(found.source, ModelSource::Remote);
        assert_eq!(found.models.len(), 1);
        assert_eq!(found.models[0].id, "gpt-4o-2024-08-06");

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "https://api.openai.com/v1/models");
        assert_eq!(sent.timeout, Some(Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn test_no_credential_uses_catalog_without_network() {
        let transport = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());

        let found = discovery(&transport, &logger)
            .discover(ProviderKind::Gemini, None)
            .await;
        assert_eq!(found.source, ModelSource::Catalog);
        assert_eq!(found.models, catalog::default_models(ProviderKind::Gemini));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_credential_uses_catalog_without_network() {
        let transport = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());

        let found = discovery(&transport, &logger)
            .discover(ProviderKind::OpenRouter, Some("not-a-valid-key"))
            .await;
        assert_eq!(found.source, ModelSource::Catalog);
        assert_eq!(transport.call_count(), 0);
        assert!(!logger.contains("not-a-valid-key"));
    }

    #[tokio::test]
    async fn test_padded_credential_rejected_like_dispatch() {
        let transport = Arc::new(MockTransport::with_replies(vec![MockReply::ok(json!({
            "data": [{"id": "gpt-4o"}]
        }))]));
        let logger = Arc::new(MemoryLogger::new());
        let padded = "  sk-abcdefghijklmnop";
        assert!(!catalog::validate_credential("openai", padded));

        let found = discovery(&transport, &logger)
            .discover(ProviderKind::OpenAi, Some(padded))
            .await;
        assert_eq!(found.source, ModelSource::Catalog);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_providers_without_listing_never_touch_network() {
        let transport = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());
        let discovery = discovery(&transport, &logger);

        for kind in [ProviderKind::Nvidia, ProviderKind::Anthropic, ProviderKind::Cohere, ProviderKind::Custom] {
            let found = discovery.discover(kind, Some("0123456789abcdef")).await;
            assert_eq!(found.source, ModelSource::Catalog);
            assert!(!found.models.is_empty());
        }
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failures_degrade_to_catalog() {
        let replies = vec![
            MockReply::error(401, json!({"error": "bad key"})),
            MockReply::Fail("connection refused".into()),
            MockReply::Timeout,
            MockReply::Text { status: 200, body: "<html>".into() },
            MockReply::ok(json!({"models": []})),
        ];
        let transport = Arc::new(MockTransport::with_replies(replies));
        let logger = Arc::new(MemoryLogger::new());
        let discovery = discovery(&transport, &logger);

        for _ in 0..5 {
            let found = discovery.discover(ProviderKind::Gemini, Some(GEMINI_KEY)).await;
            assert_eq!(found.source, ModelSource::Catalog);
            assert_eq!(found.models, catalog::default_models(ProviderKind::Gemini));
        }
        assert_eq!(transport.call_count(), 5);
        assert!(logger.contains("HTTP 401"));
        assert!(logger.contains("no usable models"));
        assert!(!logger.contains(GEMINI_KEY));
    }

    #[tokio::test]
    async fn test_gemini_listing_uses_header_auth() {
        let transport = Arc::new(MockTransport::with_replies(vec![MockReply::ok(json!({
            "models": [{"name": "models/gemini-1.5-flash", "displayName": "Gemini 1.5 Flash", "inputTokenLimit": 1048576}]
        }))]));
        let logger = Arc::new(MemoryLogger::new());
        let settings = Settings::new().with_api_base(ProviderKind::Gemini, "http://localhost:7000/v1beta");

        let found = ModelDiscovery::new(transport.clone(), settings, logger.clone())
            .discover(ProviderKind::Gemini, Some(GEMINI_KEY))
            .await;
        assert_eq!(found.source, ModelSource::Remote);
        assert_eq!(found.models[0].context_window, 1048576);

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "http://localhost:7000/v1beta/models");
        assert!(!sent.url.contains(GEMINI_KEY));
        assert_eq!(sent.header_value("x-goog-api-key"), Some(GEMINI_KEY));
    }

    #[tokio::test]
    async fn test_list_models_by_identifier() {
        let transport = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());
        let discovery = discovery(&transport, &logger);

        assert_eq!(
            discovery.list_models("anthropic", None).await,
            catalog::default_models(ProviderKind::Anthropic)
        );
        assert!(discovery.list_models("mistral", Some("key")).await.is_empty());
    }
}
