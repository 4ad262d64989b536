use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::MessengerConfig;
use crate::error::{AnubadError, Result};
use super::models::SendMessageRequest;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers reply text to a platform user
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_text(&self, recipient_id: &str, text: &str) -> Result<()>;
}

/// Messenger Send API client. The page access token is handed in at construction.
pub struct GraphApiSender {
    client: Client,
    messages_url: String,
    access_token: String,
}

impl GraphApiSender {
    pub fn new(config: &MessengerConfig) -> Result<Self> {
        if config.page_access_token.trim().is_empty() {
            warn!("No page access token configured; replies will be rejected by the Send API");
        }

        let client = Client::builder().timeout(SEND_TIMEOUT).build()?;

        Ok(Self {
            client,
            messages_url: format!("{}/me/messages", config.graph_api_url.trim_end_matches('/')),
            access_token: config.page_access_token.clone(),
        })
    }
}

#[async_trait]
impl MessageSender for GraphApiSender {
    async fn send_text(&self, recipient_id: &str, text: &str) -> Result<()> {
        let request = SendMessageRequest::text(recipient_id, text);

        debug!("Sending reply to recipient {}", recipient_id);

        let response = self
            .client
            .post(&self.messages_url)
            .query(&[("access_token", self.access_token.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AnubadError::Messenger(format!("Send API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AnubadError::Messenger(format!(
                "Send API error {}: {}", status, error_text
            )));
        }

        Ok(())
    }
}
