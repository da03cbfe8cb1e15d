//! Credential lookup
//!
//! Credentials are normally passed per call. These stores let a caller
//! resolve one on demand instead; nothing here caches a credential beyond
//! the lifetime of the store the caller owns.

mod traits;
mod env_store;
mod memory_store;

pub use traits::{SecretStore, SecretStoreError, SecretStoreResult};
pub use env_store::EnvSecretStore;
pub use memory_store::MemorySecretStore;
