//! Analysis request and result types

use serde::{Deserialize, Serialize};

use crate::secrets::{SecretStore, SecretStoreError, SecretStoreResult};

/// Output-size budget used when the caller does not choose one
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Which provider to call, with which credential and model
///
/// This is the explicit, per-call replacement for ambient session state.
/// The credential is opaque and never appears in `Debug` output.
#[derive(Clone)]
pub struct ProviderSelection {
    /// Provider id or display name, resolved against the catalog at dispatch
    pub provider: String,
    credential: String,
    /// Model id; `None` means the provider default
    pub model: Option<String>,
}

impl ProviderSelection {
    /// Create a selection with an explicit credential
    pub fn new(provider: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            credential: credential.into(),
            model: None,
        }
    }

    /// Create a selection whose credential is looked up in a secret store
    pub fn from_store(provider: impl Into<String>, store: &dyn SecretStore) -> SecretStoreResult<Self> {
        let provider = provider.into();
        let key = crate::types::ProviderKind::parse(&provider)
            .map(|kind| kind.id().to_string())
            .unwrap_or_else(|| provider.clone());
        let credential = store
            .get(&key)
            .ok_or_else(|| SecretStoreError::NotFound(key.clone()))?;
        Ok(Self::new(provider, credential))
    }

    /// Pin a specific model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model = if model.trim().is_empty() { None } else { Some(model) };
        self
    }

    /// The raw credential
    pub fn credential(&self) -> &str {
        &self.credential
    }
}

impl std::fmt::Debug for ProviderSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSelection")
            .field("provider", &self.provider)
            .field("credential", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// A provider-agnostic analysis request
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Provider, credential and model
    pub selection: ProviderSelection,
    /// System instruction
    pub system_instruction: String,
    /// Composed context block, may be empty
    pub context: String,
    /// Task instruction appended after the context
    pub task_instruction: String,
    /// Output-size budget in tokens
    pub max_tokens: u32,
}

impl AnalysisRequest {
    /// Create a request with the default output budget and empty context
    pub fn new(
        selection: ProviderSelection,
        system_instruction: impl Into<String>,
        task_instruction: impl Into<String>,
    ) -> Self {
        Self {
            selection,
            system_instruction: system_instruction.into(),
            context: String::new(),
            task_instruction: task_instruction.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Set the context block
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Set the output budget; zero keeps the default
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        if max_tokens > 0 {
            self.max_tokens = max_tokens;
        }
        self
    }
}

/// Normalized result returned by every adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Free-text analysis
    pub analysis: String,
    /// Provider name that produced the analysis
    pub provider: String,
    /// Model actually used
    pub model: String,
    /// Total tokens, when the provider reports them
    pub tokens_used: Option<u64>,
}
