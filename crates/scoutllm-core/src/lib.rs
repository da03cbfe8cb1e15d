//! ScoutLLM Core
//!
//! Multi-provider analysis orchestration. One request shape, seven
//! incompatible LLM backends behind it: a static provider catalog with
//! credential rules, live model discovery with a catalog fallback, a request
//! composer, one adapter per provider, and a dispatch service that reports
//! every failure through a single error type.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scoutllm_core::{AnalysisService, ConsoleLogger, FileConfigProvider, ProviderSelection, ResumeInput};
//!
//! let settings = FileConfigProvider::user().load()?;
//! let service = AnalysisService::new(settings, Arc::new(ConsoleLogger::new()));
//!
//! // Live listing when the key works, static catalog otherwise
//! let models = service.list_models("openai", Some(&api_key)).await;
//!
//! let selection = ProviderSelection::new("openai", api_key).with_model(&models[0].id);
//! let result = service
//!     .analyze_resume(&selection, &ResumeInput::new(resume_text), None)
//!     .await?;
//! ```

pub mod types;
pub mod catalog;
pub mod compose;
pub mod providers;
pub mod discovery;
pub mod service;
pub mod secrets;
pub mod logging;
pub mod config;

// Re-export commonly used types
pub use types::{
    ChatMessage, MessageRole,
    CredentialRule, ModelDescriptor, ProviderDescriptor, ProviderKind,
    AnalysisRequest, AnalysisResult, ProviderSelection, DEFAULT_MAX_TOKENS,
};

pub use catalog::validate_credential;

pub use compose::{compose_context, ResumeInput, SideInformation, SkillSummary};

pub use providers::{
    create_provider, supported_providers,
    ErrorKind, Provider, ProviderError, ProviderResult,
    HttpTransport, ReqwestTransport, TransportError,
};

pub use discovery::{DiscoveredModels, ModelDiscovery, ModelSource};

pub use service::{AnalysisService, ServiceError, ServiceResult};

pub use secrets::{
    SecretStore, SecretStoreError, SecretStoreResult,
    EnvSecretStore, MemorySecretStore,
};

pub use logging::{Logger, NoOpLogger, SharedLogger, ConsoleLogger, LogLevel, MemoryLogger};

pub use config::{ConfigError, ConfigResult, FileConfigProvider, Settings};
