//! Provider and model descriptor types

use serde::{Deserialize, Serialize};

/// Descriptor for a model a provider can serve
///
/// Two descriptors are equal when their ids are equal; the display fields
/// are informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Model identifier as the provider's API expects it
    pub id: String,
    /// Display name
    pub name: String,
    /// Context window in tokens, 0 when unknown
    #[serde(default)]
    pub context_window: u32,
    /// Human readable description
    #[serde(default)]
    pub description: String,
}

impl ModelDescriptor {
    /// Create a new model descriptor
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        context_window: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            context_window,
            description: description.into(),
        }
    }
}

impl PartialEq for ModelDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelDescriptor {}

/// The providers this crate knows how to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    Nvidia,
    OpenRouter,
    Anthropic,
    Cohere,
    Custom,
}

impl ProviderKind {
    /// All providers in catalog order
    pub const ALL: [ProviderKind; 7] = [
        ProviderKind::OpenAi,
        ProviderKind::Gemini,
        ProviderKind::Nvidia,
        ProviderKind::OpenRouter,
        ProviderKind::Anthropic,
        ProviderKind::Cohere,
        ProviderKind::Custom,
    ];

    /// Stable identifier (e.g. "openai")
    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Nvidia => "nvidia",
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Cohere => "cohere",
            ProviderKind::Custom => "custom",
        }
    }

    /// Name reported in results and errors
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Gemini => "Google Gemini",
            ProviderKind::Nvidia => "NVIDIA NIMs",
            ProviderKind::OpenRouter => "OpenRouter",
            ProviderKind::Anthropic => "Anthropic Claude",
            ProviderKind::Cohere => "Cohere",
            ProviderKind::Custom => "Custom API",
        }
    }

    /// Parse a provider identity, accepting the id or the catalog display name
    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL.into_iter().find(|kind| {
            kind.id().eq_ignore_ascii_case(needle)
                || kind.label().eq_ignore_ascii_case(needle)
                || crate::catalog::display_name(*kind).eq_ignore_ascii_case(needle)
        })
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Format rule a credential must satisfy before any request is made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialRule {
    /// Key must begin with a literal prefix (e.g. "sk-")
    Prefix(&'static str),
    /// Key must be strictly longer than the given number of characters
    LongerThan(usize),
    /// Any non-empty key passing the global minimum length
    Any,
}

impl CredentialRule {
    /// Minimum trimmed length required for every provider
    pub const MIN_LENGTH: usize = 10;

    /// Check a raw credential against this rule
    pub fn check(&self, credential: &str) -> bool {
        let trimmed = credential.trim();
        if trimmed.chars().count() < Self::MIN_LENGTH {
            return false;
        }

        match self {
            CredentialRule::Prefix(prefix) => credential.starts_with(prefix),
            CredentialRule::LongerThan(len) => credential.chars().count() > *len,
            CredentialRule::Any => true,
        }
    }
}

/// Static description of a provider: identity, credential rule, default models
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    /// Provider identity
    pub kind: ProviderKind,
    /// Display name shown to users
    pub display_name: &'static str,
    /// Credential format rule
    pub credential_rule: CredentialRule,
    /// Whether the provider exposes a models-listing endpoint
    pub remote_listing: bool,
    /// Default models, never empty
    pub models: Vec<ModelDescriptor>,
}

impl ProviderDescriptor {
    /// Stable provider id
    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    /// Check a credential against this provider's format rule
    pub fn validate_credential(&self, credential: &str) -> bool {
        self.credential_rule.check(credential)
    }

    /// Look up one of the default models by id
    pub fn model(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_descriptor_equality_by_id() {
        let a = ModelDescriptor::new("gpt-4", "GPT-4", 8192, "one");
        let b = ModelDescriptor::new("gpt-4", "Something Else", 0, "two");
        let c = ModelDescriptor::new("gpt-4o", "GPT-4", 8192, "one");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_model_descriptor_context_defaults() {
        let model: ModelDescriptor =
            serde_json::from_str(r#"{"id":"x","name":"X"}"#).unwrap();
        assert_eq!(model.context_window, 0);
        assert!(model.description.is_empty());
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!(ProviderKind::parse("openai"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse("OpenRouter"), Some(ProviderKind::OpenRouter));
        assert_eq!(ProviderKind::parse("Google Gemini"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::parse("OpenAI (ChatGPT)"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse(" cohere "), Some(ProviderKind::Cohere));
        assert_eq!(ProviderKind::parse("mistral"), None);
        assert_eq!(ProviderKind::parse(""), None);
    }

    #[test]
    fn test_credential_rules() {
        assert!(CredentialRule::Prefix("sk-").check("sk-abcdefghijkl"));
        assert!(!CredentialRule::Prefix("sk-").check("pk-abcdefghijkl"));
        assert!(!CredentialRule::Prefix("sk-").check("sk-short"));

        assert!(CredentialRule::LongerThan(20).check("abcdefghijklmnopqrstuvwxyz"));
        assert!(!CredentialRule::LongerThan(20).check("abcdefghijklmnop"));

        assert!(CredentialRule::Any.check("0123456789"));
        assert!(!CredentialRule::Any.check("         012345678   "));
        assert!(!CredentialRule::Any.check(""));
    }
}
