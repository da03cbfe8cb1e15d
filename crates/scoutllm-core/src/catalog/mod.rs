//! Static provider catalog and credential format validation
//!
//! The catalog is built once on first access and is read-only afterwards,
//! so it can be shared by any number of callers without locking.

use once_cell::sync::Lazy;

use crate::types::{CredentialRule, ModelDescriptor, ProviderDescriptor, ProviderKind};

static CATALOG: Lazy<Vec<ProviderDescriptor>> = Lazy::new(|| {
    vec![
        ProviderDescriptor {
            kind: ProviderKind::OpenAi,
            display_name: "OpenAI (ChatGPT)",
            credential_rule: CredentialRule::Prefix("sk-"),
            remote_listing: true,
            models: vec![
                ModelDescriptor::new("gpt-4o", "GPT-4o", 128000, "OpenAI's latest multimodal model with improved capabilities"),
                ModelDescriptor::new("gpt-4-turbo", "GPT-4 Turbo", 128000, "Latest GPT-4 model with improved capabilities"),
                ModelDescriptor::new("gpt-4", "GPT-4", 8192, "OpenAI's powerful large language model"),
                ModelDescriptor::new("gpt-3.5-turbo", "GPT-3.5 Turbo", 16385, "Optimized for chat at a lower cost"),
            ],
        },
        ProviderDescriptor {
            kind: ProviderKind::Gemini,
            display_name: "Google Gemini",
            credential_rule: CredentialRule::LongerThan(20),
            remote_listing: true,
            models: vec![
                ModelDescriptor::new("gemini-1.5-pro", "Gemini 1.5 Pro", 1000000, "Google's most powerful model with very large context window"),
                ModelDescriptor::new("gemini-1.5-flash", "Gemini 1.5 Flash", 1000000, "Faster version of Gemini 1.5 with large context"),
                ModelDescriptor::new("gemini-pro", "Gemini Pro", 32768, "Balanced performance for most tasks"),
            ],
        },
        ProviderDescriptor {
            kind: ProviderKind::Nvidia,
            display_name: "NVIDIA NIMs",
            credential_rule: CredentialRule::Any,
            remote_listing: false,
            models: vec![
                ModelDescriptor::new("llama3-70b-instruct", "Llama 3 70B Instruct", 8192, "Meta's Llama 3 70B model"),
                ModelDescriptor::new("llama3-8b-instruct", "Llama 3 8B Instruct", 8192, "Meta's Llama 3 8B model"),
            ],
        },
        ProviderDescriptor {
            kind: ProviderKind::OpenRouter,
            display_name: "OpenRouter",
            credential_rule: CredentialRule::Prefix("sk-"),
            remote_listing: true,
            models: vec![
                ModelDescriptor::new("openai/gpt-4o", "OpenAI GPT-4o", 128000, "Latest GPT-4 model via OpenRouter"),
                ModelDescriptor::new("anthropic/claude-3-opus", "Anthropic Claude 3 Opus", 200000, "Claude 3 Opus via OpenRouter"),
                ModelDescriptor::new("google/gemini-pro", "Google Gemini Pro", 32768, "Google's Gemini Pro via OpenRouter"),
                ModelDescriptor::new("meta-llama/llama-3-70b-instruct", "Meta Llama 3 70B", 8192, "Llama 3 70B via OpenRouter"),
            ],
        },
        ProviderDescriptor {
            kind: ProviderKind::Anthropic,
            display_name: "Anthropic Claude",
            credential_rule: CredentialRule::Prefix("sk-"),
            remote_listing: false,
            models: vec![
                ModelDescriptor::new("claude-3-opus-20240229", "Claude 3 Opus", 200000, "Anthropic's most powerful model"),
                ModelDescriptor::new("claude-3-sonnet-20240229", "Claude 3 Sonnet", 200000, "Balanced performance and cost"),
                ModelDescriptor::new("claude-3-haiku-20240307", "Claude 3 Haiku", 200000, "Fastest Claude model for quick responses"),
            ],
        },
        ProviderDescriptor {
            kind: ProviderKind::Cohere,
            display_name: "Cohere",
            credential_rule: CredentialRule::Any,
            remote_listing: false,
            models: vec![
                ModelDescriptor::new("command-r-plus", "Command R+", 128000, "Cohere's most powerful model"),
                ModelDescriptor::new("command-r", "Command R", 128000, "Balanced performance and cost"),
                ModelDescriptor::new("command-light", "Command Light", 4096, "Fast and cost-effective option"),
            ],
        },
        ProviderDescriptor {
            kind: ProviderKind::Custom,
            display_name: "Custom API",
            credential_rule: CredentialRule::Any,
            remote_listing: false,
            models: vec![ModelDescriptor::new("custom", "Custom Model", 0, "Your custom API endpoint")],
        },
    ]
});

/// All provider descriptors in catalog order
pub fn providers() -> &'static [ProviderDescriptor] {
    &CATALOG
}

/// Descriptor for a known provider kind
pub fn descriptor(kind: ProviderKind) -> &'static ProviderDescriptor {
    // ProviderKind::ALL and CATALOG share one order
    let index = ProviderKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or_default();
    &CATALOG[index]
}

/// Display name for a provider kind
pub fn display_name(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => "OpenAI (ChatGPT)",
        other => other.label(),
    }
}

/// Resolve a provider identity (id or display name)
pub fn lookup(provider: &str) -> Option<&'static ProviderDescriptor> {
    ProviderKind::parse(provider).map(descriptor)
}

/// Static model list for a provider
pub fn default_models(kind: ProviderKind) -> Vec<ModelDescriptor> {
    descriptor(kind).models.clone()
}

/// Check a credential's format for a provider
///
/// Format only: no network call is made and a `true` result does not mean
/// the provider will accept the key. Unknown providers never validate.
pub fn validate_credential(provider: &str, credential: &str) -> bool {
    lookup(provider)
        .map(|descriptor| descriptor.validate_credential(credential))
        .unwrap_or(false)
}
