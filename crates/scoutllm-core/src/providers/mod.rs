//! Provider adapters
//!
//! One adapter per provider, all implementing [`Provider`]. Each adapter
//! owns its provider's wire format (auth headers, payload, response shape)
//! and talks to the network only through an [`HttpTransport`].
//!
//! ## Providers
//!
//! | id | wire shape |
//! |----|-----------|
//! | `openai` | chat completions, falls back once to `gpt-3.5-turbo` |
//! | `gemini` | `generateContent`, model in the URL path |
//! | `nvidia` | chat completions |
//! | `openrouter` | chat completions |
//! | `anthropic` | messages with top-level `system` |
//! | `cohere` | single `message` with `preamble` |
//! | `custom` | caller endpoint, minimal JSON body |

mod traits;
mod error;
mod transport;
mod chat_completions;
mod openai;
mod gemini;
mod nvidia;
mod openrouter;
mod anthropic;
mod cohere;
mod custom;
pub mod mock;

pub use traits::{CompletionRequest, Provider};
pub use error::{ErrorKind, ProviderError, ProviderResult};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

pub use openai::OpenAiProvider;
pub use gemini::GeminiProvider;
pub use nvidia::NvidiaProvider;
pub use openrouter::OpenRouterProvider;
pub use anthropic::AnthropicProvider;
pub use cohere::CohereProvider;
pub use custom::{CustomEndpoint, CustomProvider, CREDENTIAL_DELIMITER};

pub use mock::{MockReply, MockTransport};

use std::sync::Arc;

use crate::config::Settings;
use crate::logging::SharedLogger;
use crate::types::ProviderKind;

/// Create the adapter for a provider
///
/// Base URL overrides from `settings` are applied here, so adapters are
/// fully configured once and never consult settings per call.
pub fn create_provider(
    kind: ProviderKind,
    transport: Arc<dyn HttpTransport>,
    settings: &Settings,
    logger: SharedLogger,
) -> Box<dyn Provider> {
    let base = settings.api_base(kind);

    match kind {
        ProviderKind::OpenAi => {
            let provider = OpenAiProvider::new(transport, logger);
            Box::new(match base {
                Some(base) => provider.with_api_base(base),
                None => provider,
            })
        }
        ProviderKind::Gemini => {
            let provider = GeminiProvider::new(transport);
            Box::new(match base {
                Some(base) => provider.with_api_base(base),
                None => provider,
            })
        }
        ProviderKind::Nvidia => {
            let provider = NvidiaProvider::new(transport);
            Box::new(match base {
                Some(base) => provider.with_api_base(base),
                None => provider,
            })
        }
        ProviderKind::OpenRouter => {
            let provider = OpenRouterProvider::new(transport);
            Box::new(match base {
                Some(base) => provider.with_api_base(base),
                None => provider,
            })
        }
        ProviderKind::Anthropic => {
            let provider = AnthropicProvider::new(transport);
            Box::new(match base {
                Some(base) => provider.with_api_base(base),
                None => provider,
            })
        }
        ProviderKind::Cohere => {
            let provider = CohereProvider::new(transport);
            Box::new(match base {
                Some(base) => provider.with_api_base(base),
                None => provider,
            })
        }
        // The endpoint travels inside the credential
        ProviderKind::Custom => Box::new(CustomProvider::new(transport)),
    }
}

/// Default public base URL for a provider (`None` for custom)
pub fn default_api_base(kind: ProviderKind) -> Option<&'static str> {
    match kind {
        ProviderKind::OpenAi => Some(OpenAiProvider::DEFAULT_API_BASE),
        ProviderKind::Gemini => Some(GeminiProvider::DEFAULT_API_BASE),
        ProviderKind::Nvidia => Some(NvidiaProvider::DEFAULT_API_BASE),
        ProviderKind::OpenRouter => Some(OpenRouterProvider::DEFAULT_API_BASE),
        ProviderKind::Anthropic => Some(AnthropicProvider::DEFAULT_API_BASE),
        ProviderKind::Cohere => Some(CohereProvider::DEFAULT_API_BASE),
        ProviderKind::Custom => None,
    }
}

/// List all supported provider IDs
pub fn supported_providers() -> Vec<&'static str> {
    ProviderKind::ALL.iter().map(|kind| kind.id()).collect()
}
