use std::collections::BTreeMap;

use serde::Deserialize;

use crate::locator::InstanceLocator;
use crate::logger::LogLevel;
use crate::utils::constants::DEFAULT_HTTP_TIMEOUT_MS;

/// ================================
/// Full SDK configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SdkConfig {
    pub instance_locator: InstanceLocator,
    #[serde(default)]
    pub token_provider: TokenProviderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// ================================
/// Token provider
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct TokenProviderConfig {
    /// replaces `https://{region}.pusherplatform.io`; empty means unset
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// appended to the token endpoint as-is, e.g. `user_id`
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl TokenProviderConfig {
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|url| !url.is_empty())
    }
}

impl Default for TokenProviderConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: default_timeout_ms(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: LogLevel, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}
