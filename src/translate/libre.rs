use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{Result, TranslationResult};
use super::{TranslationProvider, TranslationRequest, common};

/// LibreTranslate-compatible endpoint
pub struct LibreTranslateProvider {
    name: String,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
    client: Client,
}

#[derive(Debug, Serialize)]
struct LibreTranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

impl LibreTranslateProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            name: config.name.clone(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            timeout: config.timeout(),
            client: common::build_client(config.timeout())?,
        })
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslateProvider {
    async fn translate(&self, request: &TranslationRequest) -> TranslationResult<String> {
        let body = LibreTranslateBody {
            q: &request.source_text,
            source: &request.source_language,
            target: request.target.code(),
            format: &request.output_format,
            api_key: self.api_key.as_deref(),
        };

        debug!("Sending LibreTranslate request to: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| common::request_error(&self.name, self.timeout, e))?;

        common::read_translation(&self.name, self.timeout, response).await
    }
}
