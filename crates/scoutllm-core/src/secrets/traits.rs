//! Core trait and errors for credential stores

use thiserror::Error;

/// Errors that can occur during secret store operations
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("No credential configured for {0}")]
    NotFound(String),
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Trait for credential sources
///
/// Keys are provider ids ("openai", "gemini", ...) or, for stores that
/// support it, a direct variable name.
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Retrieve a credential by key
    fn get(&self, key: &str) -> Option<String>;

    /// Check if a credential exists
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
