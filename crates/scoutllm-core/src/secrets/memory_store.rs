//! In-memory credential store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::SecretStore;

/// In-memory store for tests and embedding applications
///
/// Credentials live only as long as the store does.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a credential
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.secrets.write().insert(key.into(), value.into());
    }

    /// Remove a credential, returning whether it existed
    pub fn remove(&self, key: &str) -> bool {
        self.secrets.write().remove(key).is_some()
    }

    /// Number of stored credentials
    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecretStore for MemorySecretStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.secrets.read().get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySecretStore::new();
        assert!(store.is_empty());

        store.insert("openai", "sk-test");
        assert_eq!(store.get("openai"), Some("sk-test".to_string()));
        assert!(store.has("openai"));
        assert_eq!(store.len(), 1);

        assert!(store.remove("openai"));
        assert!(!store.remove("openai"));
        assert_eq!(store.get("openai"), None);
    }
}
