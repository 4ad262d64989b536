use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{Result, TranslationResult};
use super::{TranslationProvider, TranslationRequest, common};

/// Google's keyless "gtx" translate endpoint.
///
/// Answers with nested segment arrays instead of a `translatedText` field.
pub struct GoogleGtxProvider {
    name: String,
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl GoogleGtxProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            name: config.name.clone(),
            endpoint: config.endpoint.clone(),
            timeout: config.timeout(),
            client: common::build_client(config.timeout())?,
        })
    }
}

#[async_trait]
impl TranslationProvider for GoogleGtxProvider {
    async fn translate(&self, request: &TranslationRequest) -> TranslationResult<String> {
        let query = [
            ("client", "gtx"),
            ("sl", request.source_language.as_str()),
            ("tl", request.target.code()),
            ("dt", "t"),
            ("q", request.source_text.as_str()),
        ];

        debug!("Sending gtx request to: {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await
            .map_err(|e| common::request_error(&self.name, self.timeout, e))?;

        common::read_translation(&self.name, self.timeout, response).await
    }
}
