//! PokeLens runtime configuration.
//!
//! Provides:
//! - Typed config schema (listener, providers, classifier, limits, logging)
//! - Environment loading with defaults
//! - Config redaction for safe logging
//! - Validation with errors and warnings

pub mod defaults;
pub mod env;
pub mod redact;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use env::ConfigError;
pub use redact::redact;
pub use schema::{ClassifierConfig, PokelensConfig, ProviderConfig, ProviderKind};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Result};

/// Validate a loaded config, logging every finding. Fails on errors only.
///
/// Call after the logger is installed so warnings are visible.
pub fn ensure_valid(config: &PokelensConfig) -> Result<()> {
    let report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        bail!("configuration has {} error(s)", report.errors.len());
    }
    Ok(())
}
