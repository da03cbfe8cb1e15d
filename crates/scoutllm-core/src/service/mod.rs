//! Dispatch orchestrator
//!
//! `AnalysisService` is the single entry point for analyses. It checks the
//! provider identity and credential before any network activity, picks the
//! adapter, and turns every adapter failure into a [`ServiceError`].
//!
//! ```rust,ignore
//! use scoutllm_core::{AnalysisService, ProviderSelection, ResumeInput, Settings};
//!
//! let service = AnalysisService::new(Settings::default(), logger);
//! let selection = ProviderSelection::new("anthropic", api_key);
//! let result = service
//!     .analyze_resume(&selection, &ResumeInput::new(text), None)
//!     .await?;
//! println!("{} ({})", result.analysis, result.model);
//! ```

mod error;

pub use error::{ServiceError, ServiceResult};

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog;
use crate::compose::{self, ResumeInput};
use crate::config::Settings;
use crate::discovery::{DiscoveredModels, ModelDiscovery};
use crate::logging::SharedLogger;
use crate::providers::{
    create_provider, CompletionRequest, CustomEndpoint, HttpTransport, Provider, ProviderError,
    ReqwestTransport, CREDENTIAL_DELIMITER,
};
use crate::types::{AnalysisRequest, AnalysisResult, ModelDescriptor, ProviderKind, ProviderSelection};

/// Shortest part of a custom credential redacted wherever it appears
const MIN_REDACTED_SECRET_CHARS: usize = 8;

/// Routes analysis requests to provider adapters
pub struct AnalysisService {
    settings: Settings,
    providers: HashMap<ProviderKind, Box<dyn Provider>>,
    discovery: ModelDiscovery,
    logger: SharedLogger,
}

impl AnalysisService {
    /// Create a service backed by a reqwest client
    pub fn new(settings: Settings, logger: SharedLogger) -> Self {
        let transport = ReqwestTransport::new().with_timeout(settings.request_timeout());
        Self::with_transport(settings, Arc::new(transport), logger)
    }

    /// Create a service over an arbitrary transport
    pub fn with_transport(
        settings: Settings,
        transport: Arc<dyn HttpTransport>,
        logger: SharedLogger,
    ) -> Self {
        let providers = ProviderKind::ALL
            .iter()
            .map(|&kind| {
                (
                    kind,
                    create_provider(kind, transport.clone(), &settings, logger.clone()),
                )
            })
            .collect();
        let discovery = ModelDiscovery::new(transport, settings.clone(), logger.clone());

        Self {
            settings,
            providers,
            discovery,
            logger,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Reviewer instruction: the configured override or the built-in text
    pub fn system_prompt(&self) -> &str {
        self.settings
            .system_prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(compose::DEFAULT_SYSTEM_PROMPT)
    }

    /// Run one analysis
    pub async fn analyze(&self, request: &AnalysisRequest) -> ServiceResult<AnalysisResult> {
        let selection = &request.selection;
        let credential = selection.credential();

        let kind = ProviderKind::parse(&selection.provider).ok_or_else(|| {
            ServiceError::new(
                selection.provider.clone(),
                ProviderError::unknown_provider(selection.provider.clone()),
            )
        })?;
        let label = kind.label();

        if !catalog::descriptor(kind).validate_credential(credential) {
            self.logger.warn(&format!(
                "[AnalysisService] rejected {} credential before dispatch",
                label
            ));
            return Err(ServiceError::new(label, ProviderError::credential_format(label)));
        }

        let provider = self
            .providers
            .get(&kind)
            .ok_or_else(|| ServiceError::new(label, ProviderError::unknown_provider(label)))?;

        let completion = CompletionRequest::from(request);
        self.logger.info(&format!(
            "[AnalysisService] dispatching to {} (model={})",
            label,
            provider.resolve_model(&completion)
        ));

        match provider.analyze(credential, &completion).await {
            Ok(result) => {
                self.logger.debug(&format!(
                    "[AnalysisService] {} answered with {} characters",
                    label,
                    result.analysis.len()
                ));
                Ok(result)
            }
            Err(err) => {
                let err = Self::scrub(kind, credential, err);
                self.logger.error(&format!("[AnalysisService] {} failed: {}", label, err));
                Err(ServiceError::new(label, err))
            }
        }
    }

    /// Review a resume with the configured system instruction
    pub async fn analyze_resume(
        &self,
        selection: &ProviderSelection,
        input: &ResumeInput,
        max_tokens: Option<u32>,
    ) -> ServiceResult<AnalysisResult> {
        let request = AnalysisRequest::new(selection.clone(), self.system_prompt(), compose::RESUME_TASK)
            .with_context(input.context())
            .with_max_tokens(max_tokens.unwrap_or(self.settings.max_tokens));
        self.analyze(&request).await
    }

    /// Compare a resume against a job description
    pub async fn job_match(
        &self,
        selection: &ProviderSelection,
        resume_text: &str,
        job_description: &str,
        max_tokens: Option<u32>,
    ) -> ServiceResult<AnalysisResult> {
        let request = AnalysisRequest::new(
            selection.clone(),
            compose::JOB_MATCH_SYSTEM_PROMPT,
            compose::job_match_task(resume_text, job_description),
        )
        .with_max_tokens(max_tokens.unwrap_or(self.settings.max_tokens));
        self.analyze(&request).await
    }

    /// Models for a provider identifier, live when possible
    pub async fn list_models(&self, provider: &str, credential: Option<&str>) -> Vec<ModelDescriptor> {
        self.discovery.list_models(provider, credential).await
    }

    /// Models for a provider, with their source
    pub async fn discover_models(&self, kind: ProviderKind, credential: Option<&str>) -> DiscoveredModels {
        self.discovery.discover(kind, credential).await
    }

    // The custom credential embeds a header that is secret on its own. Parts
    // too short to tell apart from ordinary words are left alone.
    fn scrub(kind: ProviderKind, credential: &str, err: ProviderError) -> ProviderError {
        let err = err.redact(credential);
        if kind != ProviderKind::Custom {
            return err;
        }

        let spec = credential
            .split_once(CREDENTIAL_DELIMITER)
            .map(|(_, spec)| spec.to_string());
        let value = CustomEndpoint::parse(credential)
            .ok()
            .and_then(|endpoint| endpoint.secret().map(str::to_string));

        [spec, value]
            .into_iter()
            .flatten()
            .filter(|part| part.trim().chars().count() >= MIN_REDACTED_SECRET_CHARS)
            .fold(err, |err, part| err.redact(&part))
    }
}
