//! Roman-Bangla to Bengali script conversion.
//!
//! Best effort: a failure here never stops a translation, the pipeline just
//! carries on with the Latin text.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::TransliterationConfig;
use crate::error::{Result, TranslationError, TranslationResult};
use crate::translate::common::build_client;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transliterator: Send + Sync {
    async fn transliterate(&self, text: &str) -> TranslationResult<String>;
}

/// Google Input Tools transliteration endpoint
pub struct GoogleInputToolsTransliterator {
    endpoint: String,
    input_tool: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct InputToolsBody<'a> {
    text: &'a str,
    itc: &'a str,
    num: u32,
}

impl GoogleInputToolsTransliterator {
    pub fn new(config: &TransliterationConfig) -> Result<Self> {
        Ok(Self {
            endpoint: config.endpoint.clone(),
            input_tool: config.input_tool.clone(),
            client: build_client(config.timeout())?,
        })
    }
}

/// Top candidate from `["SUCCESS", [[input, [candidate, ...], ...]]]`
pub fn extract_candidate(value: &Value) -> Option<String> {
    if let Some(status) = value.get(0).and_then(Value::as_str) {
        if status != "SUCCESS" {
            return None;
        }
    }

    let candidate = value.get(1)?.get(0)?.get(1)?.get(0)?.as_str()?;
    if candidate.trim().is_empty() {
        None
    } else {
        Some(candidate.to_string())
    }
}

#[async_trait]
impl Transliterator for GoogleInputToolsTransliterator {
    async fn transliterate(&self, text: &str) -> TranslationResult<String> {
        let body = InputToolsBody {
            text,
            itc: &self.input_tool,
            num: 1,
        };

        debug!("Sending transliteration request to: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslationError::TransliterationFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::TransliterationFailure(format!("HTTP {}", status)));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| TranslationError::TransliterationFailure(format!("invalid JSON: {}", e)))?;

        extract_candidate(&value).ok_or_else(|| {
            TranslationError::TransliterationFailure("no candidate in response".to_string())
        })
    }
}
