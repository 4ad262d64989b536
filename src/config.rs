use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use crate::error::{Result, AnubadError};

fn default_transliteration_enabled() -> bool {
    true
}

fn default_input_tool() -> String {
    "bn-t-i0-und".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub messenger: MessengerConfig,
    pub translate: TranslateConfig,
    pub transliteration: TransliterationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the webhook server binds to
    pub host: String,
    /// Port the webhook server listens on
    pub port: u16,
    /// Token the platform echoes back during webhook verification
    pub verify_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessengerConfig {
    /// Base URL of the Graph API, without a trailing slash
    pub graph_api_url: String,
    /// Page access token used by the Send API (usually injected via PAGE_ACCESS_TOKEN)
    #[serde(default)]
    pub page_access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Providers in priority order; the first is the primary, the rest are fallbacks
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Name used in logs and error messages
    pub name: String,
    /// Wire protocol spoken by the endpoint
    pub kind: ProviderKind,
    /// Full URL of the translate endpoint
    pub endpoint: String,
    /// Upper bound for a single attempt
    pub timeout_secs: u64,
    /// Optional API key, sent only by providers that accept one
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    /// LibreTranslate: POST JSON, answers `{"translatedText": ...}`
    LibreTranslate,
    /// Google "gtx" endpoint: GET with query parameters, answers nested segment arrays
    GoogleGtx,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransliterationConfig {
    /// Convert Roman-Bangla to Bengali script before translating
    #[serde(default = "default_transliteration_enabled")]
    pub enabled: bool,
    /// Google Input Tools endpoint
    pub endpoint: String,
    /// Input tool code sent as `itc`
    #[serde(default = "default_input_tool")]
    pub input_tool: String,
    pub timeout_secs: u64,
}

impl TransliterationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 10000,
                verify_token: "mytoken".to_string(),
            },
            messenger: MessengerConfig {
                graph_api_url: "https://graph.facebook.com/v18.0".to_string(),
                page_access_token: String::new(),
            },
            translate: TranslateConfig {
                providers: vec![
                    ProviderConfig {
                        name: "libretranslate".to_string(),
                        kind: ProviderKind::LibreTranslate,
                        endpoint: "https://libretranslate.de/translate".to_string(),
                        timeout_secs: 15,
                        api_key: None,
                    },
                    ProviderConfig {
                        name: "google".to_string(),
                        kind: ProviderKind::GoogleGtx,
                        endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
                        timeout_secs: 10,
                        api_key: None,
                    },
                ],
            },
            transliteration: TransliterationConfig {
                enabled: true,
                endpoint: "https://inputtools.google.com/request".to_string(),
                input_tool: default_input_tool(),
                timeout_secs: 10,
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnubadError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| AnubadError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AnubadError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| AnubadError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Apply `PAGE_ACCESS_TOKEN`, `VERIFY_TOKEN` and `PORT` from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = lookup("PAGE_ACCESS_TOKEN") {
            self.messenger.page_access_token = token;
        }
        if let Some(token) = lookup("VERIFY_TOKEN") {
            self.server.verify_token = token;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                AnubadError::Config(format!("Invalid PORT value '{}'", port))
            })?;
        }

        Ok(())
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.translate.providers.is_empty() {
            return Err(AnubadError::Config(
                "At least one translation provider must be configured".to_string(),
            ));
        }

        for provider in &self.translate.providers {
            if provider.endpoint.trim().is_empty() {
                return Err(AnubadError::Config(format!(
                    "Provider '{}' has an empty endpoint", provider.name
                )));
            }
            if provider.timeout_secs == 0 {
                return Err(AnubadError::Config(format!(
                    "Provider '{}' must have a timeout greater than zero", provider.name
                )));
            }
        }

        if self.transliteration.enabled {
            if self.transliteration.endpoint.trim().is_empty() {
                return Err(AnubadError::Config(
                    "Transliteration is enabled but has no endpoint".to_string(),
                ));
            }
            if self.transliteration.timeout_secs == 0 {
                return Err(AnubadError::Config(
                    "Transliteration timeout must be greater than zero".to_string(),
                ));
            }
        }

        Ok(())
    }
}
