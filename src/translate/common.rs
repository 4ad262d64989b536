use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, TranslationError, TranslationResult};

/// Build the HTTP client a provider uses for all its calls
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(client)
}

/// Pull the translated string out of a provider response.
///
/// Accepts either envelope without knowing which provider answered:
/// - `{"translatedText": "..."}`
/// - nested segments `[[["seg1", ...], ["seg2", ...]], ...]` (or the bare
///   segment list), joined from each segment's first field
///
/// Returns `None` when neither shape yields non-blank text.
pub fn extract_translated_text(value: &Value) -> Option<String> {
    if let Some(text) = value.get("translatedText").and_then(Value::as_str) {
        return non_blank(text.to_string());
    }

    let outer = value.as_array()?;
    let segments = match outer.first()?.as_array()?.first() {
        Some(Value::Array(_)) => outer.first()?.as_array()?,
        Some(Value::String(_)) => outer,
        _ => return None,
    };

    let joined: String = segments
        .iter()
        .filter_map(|segment| segment.as_array()?.first()?.as_str())
        .collect();

    non_blank(joined)
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text) }
}

/// Map a reqwest failure onto the provider error taxonomy
pub(crate) fn request_error(provider: &str, timeout: Duration, err: reqwest::Error) -> TranslationError {
    if err.is_timeout() {
        TranslationError::ProviderTimeout {
            provider: provider.to_string(),
            timeout,
        }
    } else {
        TranslationError::ProviderNetworkError {
            provider: provider.to_string(),
            message: err.to_string(),
        }
    }
}

/// Check the status, parse the body as JSON and extract the translation
pub(crate) async fn read_translation(
    provider: &str,
    timeout: Duration,
    response: Response,
) -> TranslationResult<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| request_error(provider, timeout, e))?;

    if !status.is_success() {
        return Err(TranslationError::ProviderNetworkError {
            provider: provider.to_string(),
            message: format!("HTTP {}: {}", status, body),
        });
    }

    debug!("Raw response from '{}': {}", provider, body);

    let value: Value = serde_json::from_str(&body).map_err(|e| {
        TranslationError::ProviderMalformedResponse {
            provider: provider.to_string(),
            message: format!("invalid JSON: {}", e),
        }
    })?;

    extract_translated_text(&value).ok_or_else(|| TranslationError::ProviderMalformedResponse {
        provider: provider.to_string(),
        message: "no translated text in response".to_string(),
    })
}
