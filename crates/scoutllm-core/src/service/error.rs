//! Service-level error

use thiserror::Error;

use crate::providers::{ErrorKind, ProviderError};

/// The single error kind raised by [`AnalysisService`](super::AnalysisService)
///
/// Wraps whatever went wrong with the provider that was asked. The wrapped
/// error has already had the caller's credential scrubbed from it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error analyzing with {provider}: {source}")]
pub struct ServiceError {
    provider: String,
    #[source]
    source: ProviderError,
}

impl ServiceError {
    pub(crate) fn new(provider: impl Into<String>, source: ProviderError) -> Self {
        Self {
            provider: provider.into(),
            source,
        }
    }

    /// Provider the request was addressed to
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Failure category
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    /// HTTP status, when the provider answered with one
    pub fn status(&self) -> Option<u16> {
        self.source.status()
    }

    /// The wrapped adapter error
    pub fn cause(&self) -> &ProviderError {
        &self.source
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_message_and_source() {
        let err = ServiceError::new("Cohere", ProviderError::http_status("Cohere", 503, "overloaded"));
        assert_eq!(
            err.to_string(),
            "Error analyzing with Cohere: Cohere API error: HTTP 503: overloaded"
        );
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), Some(503));
        assert!(err.source().is_some());
    }
}
