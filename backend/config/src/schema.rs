//! PokeLens runtime configuration schema.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::defaults::*;
use crate::env::ConfigError;

/// Which generative provider answers identification prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenRouter,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenRouter => "openrouter",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openrouter" => Ok(Self::OpenRouter),
            other => Err(ConfigError::InvalidValue {
                var_name: "LLM_PROVIDER".into(),
                value: other.into(),
                reason: "expected `gemini` or `openrouter`".into(),
            }),
        }
    }
}

/// Credentials and endpoint for one generative provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

/// Image-classification endpoint used by `/recognize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub url: String,
    pub image_size: u32,
}

/// Root configuration for PokeLens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokelensConfig {
    pub bind_address: String,
    pub port: u16,
    pub llm_provider: ProviderKind,
    pub gemini: ProviderConfig,
    pub openrouter: ProviderConfig,
    pub classifier: ClassifierConfig,
    pub max_attempts: u32,
    pub max_upload_bytes: usize,
    pub upstream_timeout_secs: u64,
    pub log_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
}

impl Default for PokelensConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            llm_provider: ProviderKind::default(),
            gemini: ProviderConfig {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_string(),
                base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            },
            openrouter: ProviderConfig {
                api_key: None,
                model: DEFAULT_OPENROUTER_MODEL.to_string(),
                base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            },
            classifier: ClassifierConfig {
                api_key: None,
                url: DEFAULT_CLASSIFIER_URL.to_string(),
                image_size: DEFAULT_IMAGE_SIZE,
            },
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

impl PokelensConfig {
    /// Settings of the provider selected by `llm_provider`.
    pub fn active_provider(&self) -> &ProviderConfig {
        match self.llm_provider {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::OpenRouter => &self.openrouter,
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
