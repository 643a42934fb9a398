//! Config validation: checks with user-friendly error messages.

use crate::schema::PokelensConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &PokelensConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_limits(config, &mut report);
    validate_provider(config, &mut report);
    validate_classifier(config, &mut report);
    report
}

fn validate_limits(config: &PokelensConfig, report: &mut ValidationReport) {
    if config.max_attempts == 0 {
        report.error("maxAttempts", "Must allow at least one upstream attempt");
    }
    if config.max_upload_bytes == 0 {
        report.error("maxUploadBytes", "Upload limit must be greater than zero");
    }
    if config.upstream_timeout_secs == 0 {
        report.error("upstreamTimeoutSecs", "Timeout must be at least one second");
    }
    if config.port == 0 {
        report.warn("port", "Port 0 binds a random port");
    }
}

/// The selected provider needs a key; the other one is optional.
fn validate_provider(config: &PokelensConfig, report: &mut ValidationReport) {
    let provider = config.active_provider();
    let path = config.llm_provider.as_str();
    if provider.api_key.is_none() {
        report.error(
            format!("{path}.apiKey"),
            "No API key set for the selected provider; the relay cannot start without one",
        );
    }
    if provider.model.trim().is_empty() {
        report.error(format!("{path}.model"), "Model cannot be empty");
    }
    if !provider.base_url.starts_with("http://") && !provider.base_url.starts_with("https://") {
        report.error(format!("{path}.baseUrl"), "Base URL must be http(s)");
    }
}

fn validate_classifier(config: &PokelensConfig, report: &mut ValidationReport) {
    let classifier = &config.classifier;
    if classifier.image_size == 0 {
        report.error("classifier.imageSize", "Image size must be greater than zero");
    }
    if classifier.api_key.is_none() {
        report.warn("classifier.apiKey", "No classifier API key set; /recognize may be rejected upstream");
    }
    if !classifier.url.starts_with("http://") && !classifier.url.starts_with("https://") {
        report.error("classifier.url", "Classifier URL must be http(s)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ProviderKind;

    #[test]
    fn missing_selected_provider_key_is_an_error() {
        let report = validate(&PokelensConfig::default());
        assert!(!report.is_valid());
        assert!(report.errors.iter().any(|e| e.path == "gemini.apiKey"));
        assert!(report.warnings.iter().any(|w| w.path == "classifier.apiKey"));
    }

    #[test]
    fn only_selected_provider_needs_a_key() {
        let mut cfg = PokelensConfig {
            llm_provider: ProviderKind::OpenRouter,
            ..Default::default()
        };
        cfg.openrouter.api_key = Some("sk-or-test".into());
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert!(!report.errors.iter().any(|e| e.path == "gemini.apiKey"));
    }

    #[test]
    fn zero_attempts_is_an_error() {
        let cfg = PokelensConfig {
            max_attempts: 0,
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert!(report.errors.iter().any(|e| e.path == "maxAttempts"));
    }

    #[test]
    fn bad_base_url_is_an_error() {
        let mut cfg = PokelensConfig::default();
        cfg.gemini.base_url = "generativelanguage.googleapis.com".into();
        cfg.gemini.api_key = Some("AIza-test".into());
        let report = validate(&cfg);
        assert!(report.errors.iter().any(|e| e.path == "gemini.baseUrl"));
        assert!(!report.errors.iter().any(|e| e.path == "gemini.apiKey"));
    }
}
