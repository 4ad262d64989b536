// Provider-chain translation architecture
//
// Translation backends are plain HTTP services with different wire formats:
// - LibreTranslate: POST JSON, `{"translatedText": ...}` answer
// - GoogleGtx: GET query string, nested array-of-segments answer
//
// The chain tries them in configured order, one attempt each, and stops at
// the first usable translation.

pub mod common;
pub mod google;
pub mod libre;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

pub use common::extract_translated_text;
use crate::config::{ProviderConfig, ProviderKind, TranslateConfig};
use crate::detect::TranslationTarget;
use crate::error::{AnubadError, Result, TranslationError, TranslationResult};

/// Everything a provider receives for one call
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub source_text: String,
    pub source_language: String,
    pub target: TranslationTarget,
    pub output_format: String,
}

impl TranslationRequest {
    pub fn new(source_text: &str, target: TranslationTarget) -> Self {
        Self {
            source_text: source_text.to_string(),
            source_language: "auto".to_string(),
            target,
            output_format: "text".to_string(),
        }
    }
}

/// A single translation backend. One call issues exactly one outbound request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> TranslationResult<String>;
}

/// Provider plus the name and time budget the chain applies to it
#[derive(Clone)]
pub struct ProviderHandle {
    pub name: String,
    pub timeout: Duration,
    pub provider: Arc<dyn TranslationProvider>,
}

impl ProviderHandle {
    pub fn new(name: impl Into<String>, timeout: Duration, provider: Arc<dyn TranslationProvider>) -> Self {
        Self {
            name: name.into(),
            timeout,
            provider,
        }
    }
}

/// Successful chain output
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    pub provider: String,
}

/// Ordered fallback list of providers
#[derive(Clone, Default)]
pub struct ProviderChain {
    handles: Vec<ProviderHandle>,
}

impl ProviderChain {
    pub fn new(handles: Vec<ProviderHandle>) -> Self {
        Self { handles }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Worst-case latency: the sum of every provider's timeout
    pub fn max_latency(&self) -> Duration {
        self.handles.iter().map(|h| h.timeout).sum()
    }

    /// Try each provider once, in order, until one returns a non-blank translation
    pub async fn translate(&self, text: &str, target: TranslationTarget) -> TranslationResult<Translation> {
        let request = TranslationRequest::new(text, target);
        let mut attempts = Vec::with_capacity(self.handles.len());

        for (idx, handle) in self.handles.iter().enumerate() {
            debug!(
                "Attempt {}/{}: provider '{}' -> {} (timeout {:?})",
                idx + 1,
                self.handles.len(),
                handle.name,
                target,
                handle.timeout
            );

            let outcome = match tokio::time::timeout(handle.timeout, handle.provider.translate(&request)).await {
                Ok(Ok(translated)) if translated.trim().is_empty() => {
                    Err(TranslationError::ProviderMalformedResponse {
                        provider: handle.name.clone(),
                        message: "empty translation".to_string(),
                    })
                }
                Ok(result) => result,
                Err(_) => Err(TranslationError::ProviderTimeout {
                    provider: handle.name.clone(),
                    timeout: handle.timeout,
                }),
            };

            match outcome {
                Ok(translated) => {
                    info!("Provider '{}' translated message to {}", handle.name, target);
                    return Ok(Translation {
                        text: translated,
                        provider: handle.name.clone(),
                    });
                }
                Err(e) => {
                    warn!("{}; falling back", e);
                    attempts.push(e);
                }
            }
        }

        Err(TranslationError::AllProvidersFailed { attempts })
    }
}

/// Factory for creating providers from configuration
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn TranslationProvider>> {
        let provider: Arc<dyn TranslationProvider> = match config.kind {
            ProviderKind::LibreTranslate => Arc::new(libre::LibreTranslateProvider::new(config)?),
            ProviderKind::GoogleGtx => Arc::new(google::GoogleGtxProvider::new(config)?),
        };
        Ok(provider)
    }

    pub fn create_chain(config: &TranslateConfig) -> Result<ProviderChain> {
        if config.providers.is_empty() {
            return Err(AnubadError::Config(
                "At least one translation provider must be configured".to_string(),
            ));
        }

        let handles = config
            .providers
            .iter()
            .map(|p| -> Result<ProviderHandle> {
                Ok(ProviderHandle::new(
                    p.name.clone(),
                    p.timeout(),
                    Self::create_provider(p)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ProviderChain::new(handles))
    }
}
