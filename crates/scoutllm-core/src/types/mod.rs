//! Core types shared by the catalog, adapters and the dispatch service

mod message;
mod model;
mod request;

pub use message::{ChatMessage, MessageRole};
pub use model::{CredentialRule, ModelDescriptor, ProviderDescriptor, ProviderKind};
pub use request::{AnalysisRequest, AnalysisResult, ProviderSelection, DEFAULT_MAX_TOKENS};
