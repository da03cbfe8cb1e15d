//! Provider error types

use thiserror::Error;

/// Category of a failure, independent of which provider raised it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Credential failed the provider's format rule; no request was made
    CredentialFormat,
    /// Provider identity is not in the catalog; no request was made
    UnknownProvider,
    /// Network failure, timeout or non-success HTTP status
    Transport,
    /// Response body lacked the expected fields
    ResponseParse,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::CredentialFormat => write!(f, "credential format"),
            ErrorKind::UnknownProvider => write!(f, "unknown provider"),
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::ResponseParse => write!(f, "response parse"),
        }
    }
}

/// Errors raised by adapters and by pre-dispatch validation
///
/// Carries no retry state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Invalid API key format for {provider}")]
    CredentialFormat { provider: String },

    #[error("Unsupported AI provider: {provider}")]
    UnknownProvider { provider: String },

    /// `message` holds the provider's own error text when it sent one
    #[error("{} error: {message}", api_name(.provider))]
    Transport {
        provider: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid response from {provider}: {message}")]
    ResponseParse { provider: String, message: String },
}

impl ProviderError {
    /// Create a credential format error
    pub fn credential_format(provider: impl Into<String>) -> Self {
        Self::CredentialFormat {
            provider: provider.into(),
        }
    }

    /// Create an unknown provider error
    pub fn unknown_provider(provider: impl Into<String>) -> Self {
        Self::UnknownProvider {
            provider: provider.into(),
        }
    }

    /// Create a transport error with no HTTP status
    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            provider: provider.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Create a transport error for a non-success HTTP status
    pub fn http_status(provider: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, body)
        };
        Self::Transport {
            provider: provider.into(),
            status: Some(status),
            message,
        }
    }

    /// Create a response parse error
    pub fn response_parse(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResponseParse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Failure category
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::CredentialFormat { .. } => ErrorKind::CredentialFormat,
            ProviderError::UnknownProvider { .. } => ErrorKind::UnknownProvider,
            ProviderError::Transport { .. } => ErrorKind::Transport,
            ProviderError::ResponseParse { .. } => ErrorKind::ResponseParse,
        }
    }

    /// Provider the error is attributed to
    pub fn provider(&self) -> &str {
        match self {
            ProviderError::CredentialFormat { provider }
            | ProviderError::UnknownProvider { provider }
            | ProviderError::Transport { provider, .. }
            | ProviderError::ResponseParse { provider, .. } => provider,
        }
    }

    /// HTTP status, for transport errors that got a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Replace every occurrence of `secret` in the error's text
    pub fn redact(self, secret: &str) -> Self {
        let secret = secret.trim();
        if secret.is_empty() {
            return self;
        }
        let scrub = |s: String| s.replace(secret, "[REDACTED]");

        match self {
            ProviderError::CredentialFormat { provider } => ProviderError::CredentialFormat {
                provider: scrub(provider),
            },
            ProviderError::UnknownProvider { provider } => ProviderError::UnknownProvider {
                provider: scrub(provider),
            },
            ProviderError::Transport {
                provider,
                status,
                message,
            } => ProviderError::Transport {
                provider: scrub(provider),
                status,
                message: scrub(message),
            },
            ProviderError::ResponseParse { provider, message } => ProviderError::ResponseParse {
                provider: scrub(provider),
                message: scrub(message),
            },
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// "OpenAI" -> "OpenAI API", "Custom API" stays as is
fn api_name(provider: &str) -> String {
    if provider.ends_with("API") {
        provider.to_string()
    } else {
        format!("{} API", provider)
    }
}
