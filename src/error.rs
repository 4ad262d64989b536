use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnubadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Messenger error: {0}")]
    Messenger(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, AnubadError>;

/// Failures of the network-facing steps of the translation pipeline.
///
/// None of these cross `TranslationPipeline::reply_for`; they are logged and
/// turned into a fallback or the fixed failure reply.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslationError {
    #[error("Transliteration failed: {0}")]
    TransliterationFailure(String),

    #[error("Provider '{provider}' timed out after {timeout:?}")]
    ProviderTimeout { provider: String, timeout: Duration },

    #[error("Provider '{provider}' network error: {message}")]
    ProviderNetworkError { provider: String, message: String },

    #[error("Provider '{provider}' returned a malformed response: {message}")]
    ProviderMalformedResponse { provider: String, message: String },

    #[error("All {} translation providers failed", .attempts.len())]
    AllProvidersFailed { attempts: Vec<TranslationError> },
}

pub type TranslationResult<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_providers_failed_message_counts_attempts() {
        let err = TranslationError::AllProvidersFailed {
            attempts: vec![
                TranslationError::ProviderTimeout {
                    provider: "libre".to_string(),
                    timeout: Duration::from_secs(15),
                },
                TranslationError::ProviderNetworkError {
                    provider: "google".to_string(),
                    message: "connection refused".to_string(),
                },
            ],
        };
        assert_eq!(err.to_string(), "All 2 translation providers failed");
    }

    #[test]
    fn test_server_error_message() {
        let err = AnubadError::Server("Failed to bind 0.0.0.0:10000: address in use".to_string());
        assert_eq!(
            err.to_string(),
            "Server error: Failed to bind 0.0.0.0:10000: address in use"
        );
    }
}
