//! Environment variable credential store

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::traits::SecretStore;

/// Mapping from provider ids to environment variable names
static ENV_VAR_MAP: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("openai", vec!["OPENAI_API_KEY"]);
    m.insert("gemini", vec!["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    m.insert("nvidia", vec!["NVIDIA_API_KEY"]);
    m.insert("openrouter", vec!["OPENROUTER_API_KEY"]);
    m.insert("anthropic", vec!["ANTHROPIC_API_KEY"]);
    m.insert("cohere", vec!["COHERE_API_KEY", "CO_API_KEY"]);
    m.insert("custom", vec!["SCOUTLLM_CUSTOM_API"]);
    m
});

/// Read-only store backed by environment variables
///
/// Provider ids map to their conventional variables:
/// - `openai` → `OPENAI_API_KEY`
/// - `gemini` → `GEMINI_API_KEY` or `GOOGLE_API_KEY`
/// - `custom` → `SCOUTLLM_CUSTOM_API` (the `url|Header: value` composite)
///
/// Variables are read on every lookup.
#[derive(Debug, Default)]
pub struct EnvSecretStore {
    _private: (),
}

impl EnvSecretStore {
    /// Create a new environment variable store
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Get the environment variable names for a provider
    pub fn env_vars_for_provider(provider: &str) -> Option<&'static [&'static str]> {
        ENV_VAR_MAP.get(provider.to_lowercase().as_str()).map(|v| v.as_slice())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        if let Some(vars) = Self::env_vars_for_provider(key) {
            return vars.iter().find_map(|var| non_empty_var(var));
        }

        non_empty_var(key)
    }
}
