//! Environment variable loading.
//!
//! Every setting is optional; absent or empty variables fall back to
//! [`crate::defaults`]. Numbers that fail to parse are an error rather than
//! being silently replaced.

use std::collections::HashMap;
use std::str::FromStr;

use crate::schema::{PokelensConfig, ProviderKind};

/// Error returned for unusable env values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for env var \"{var_name}\": {reason}")]
    InvalidValue {
        var_name: String,
        value: String,
        reason: String,
    },
}

impl PokelensConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(&std::env::vars().collect())
    }

    /// Load configuration from a provided map (useful for testing).
    pub fn from_env_map(env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let lookup = EnvLookup(env);
        let mut config = Self::default();

        if let Some(v) = lookup.string("POKELENS_BIND") {
            config.bind_address = v;
        }
        if let Some(v) = lookup.parsed("PORT")? {
            config.port = v;
        }
        if let Some(v) = lookup.string("LLM_PROVIDER") {
            config.llm_provider = v.parse::<ProviderKind>()?;
        }

        config.gemini.api_key = lookup.string("GEMINI_API_KEY");
        if let Some(v) = lookup.string("GEMINI_MODEL") {
            config.gemini.model = v;
        }
        if let Some(v) = lookup.string("GEMINI_BASE_URL") {
            config.gemini.base_url = v;
        }

        config.openrouter.api_key = lookup.string("OPENROUTER_API_KEY");
        if let Some(v) = lookup.string("OPENROUTER_MODEL") {
            config.openrouter.model = v;
        }
        if let Some(v) = lookup.string("OPENROUTER_BASE_URL") {
            config.openrouter.base_url = v;
        }

        config.classifier.api_key = lookup.string("CLASSIFIER_API_KEY");
        if let Some(v) = lookup.string("CLASSIFIER_URL") {
            config.classifier.url = v;
        }
        if let Some(v) = lookup.parsed("POKELENS_IMAGE_SIZE")? {
            config.classifier.image_size = v;
        }

        if let Some(v) = lookup.parsed("POKELENS_MAX_ATTEMPTS")? {
            config.max_attempts = v;
        }
        if let Some(v) = lookup.parsed("POKELENS_MAX_UPLOAD_BYTES")? {
            config.max_upload_bytes = v;
        }
        if let Some(v) = lookup.parsed("POKELENS_UPSTREAM_TIMEOUT_SECS")? {
            config.upstream_timeout_secs = v;
        }
        if let Some(v) = lookup.string("POKELENS_LOG_LEVEL") {
            config.log_level = v;
        }
        config.log_dir = lookup.string("POKELENS_LOG_DIR");

        Ok(config)
    }
}

struct EnvLookup<'a>(&'a HashMap<String, String>);

impl EnvLookup<'_> {
    fn string(&self, name: &str) -> Option<String> {
        self.0
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn parsed<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(raw) = self.string(name) else {
            return Ok(None);
        };
        raw.parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                var_name: name.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn empty_env_uses_defaults() {
        let cfg = PokelensConfig::from_env_map(&HashMap::new()).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.llm_provider, ProviderKind::Gemini);
        assert_eq!(cfg.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(cfg.gemini.model, DEFAULT_GEMINI_MODEL);
        assert!(cfg.gemini.api_key.is_none());
    }

    #[test]
    fn reads_overrides() {
        let cfg = PokelensConfig::from_env_map(&env(&[
            ("PORT", "8080"),
            ("LLM_PROVIDER", "OpenRouter"),
            ("OPENROUTER_API_KEY", "sk-or-abc"),
            ("POKELENS_MAX_ATTEMPTS", "5"),
            ("POKELENS_IMAGE_SIZE", "299"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.llm_provider, ProviderKind::OpenRouter);
        assert_eq!(cfg.active_provider().api_key.as_deref(), Some("sk-or-abc"));
        assert_eq!(cfg.max_attempts, 5);
        assert_eq!(cfg.classifier.image_size, 299);
    }

    #[test]
    fn blank_values_are_ignored() {
        let cfg = PokelensConfig::from_env_map(&env(&[("GEMINI_API_KEY", "  "), ("PORT", "")]))
            .unwrap();
        assert!(cfg.gemini.api_key.is_none());
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn error_on_unparseable_number() {
        let err = PokelensConfig::from_env_map(&env(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn error_on_unknown_provider() {
        let err = PokelensConfig::from_env_map(&env(&[("LLM_PROVIDER", "ollama")])).unwrap_err();
        assert!(err.to_string().contains("LLM_PROVIDER"));
    }
}
