//! Service settings

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::types::{ProviderKind, ProviderSelection, DEFAULT_MAX_TOKENS};

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_discovery_timeout() -> u64 {
    10
}

/// Settings for `AnalysisService` and `ModelDiscovery`
///
/// ```yaml
/// default_provider: openrouter
/// default_model: anthropic/claude-3-opus
/// max_tokens: 1500
/// request_timeout_secs: 120
/// api_bases:
///   openai: https://proxy.internal/v1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Provider used when a caller has no preference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,

    /// Model used when a caller has no preference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    /// Output-size budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Replacement for the built-in reviewer system instruction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Timeout for analysis calls; absent keeps the HTTP client default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Upper bound for a single model-listing call
    #[serde(default = "default_discovery_timeout")]
    pub discovery_timeout_secs: u64,

    /// Base URL overrides keyed by provider id
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub api_bases: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_provider: None,
            default_model: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: None,
            request_timeout_secs: None,
            discovery_timeout_secs: default_discovery_timeout(),
            api_bases: HashMap::new(),
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Override a provider's base URL
    pub fn with_api_base(mut self, kind: ProviderKind, base: impl Into<String>) -> Self {
        self.api_bases.insert(kind.id().to_string(), base.into());
        self
    }

    /// Set the output budget
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the system prompt override
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the analysis request timeout
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Base URL override for a provider, trailing slashes removed
    pub fn api_base(&self, kind: ProviderKind) -> Option<String> {
        self.api_bases
            .get(kind.id())
            .map(|base| base.trim_end_matches('/').to_string())
    }

    /// Analysis request timeout, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Bound for a model-listing call
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout_secs.max(1))
    }

    /// Selection for the configured default provider and model
    pub fn default_selection(&self, credential: impl Into<String>) -> Option<ProviderSelection> {
        let provider = self.default_provider.as_deref()?;
        let selection = ProviderSelection::new(provider, credential);
        Some(match &self.default_model {
            Some(model) => selection.with_model(model.clone()),
            None => selection,
        })
    }

    /// Check the values that cannot be expressed through types
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_tokens == 0 {
            return Err(ConfigError::Other("max_tokens must be positive".to_string()));
        }

        if let Some(provider) = &self.default_provider {
            if ProviderKind::parse(provider).is_none() {
                return Err(ConfigError::Other(format!(
                    "Unknown default_provider: {}",
                    provider
                )));
            }
        }

        // Keys must be exact ids; `api_base` looks them up that way
        for key in self.api_bases.keys() {
            if !ProviderKind::ALL.iter().any(|kind| kind.id() == key) {
                return Err(ConfigError::Other(format!(
                    "api_bases entry for unknown provider: {}",
                    key
                )));
            }
        }

        Ok(())
    }
}
