//! Builds the runtime components from a loaded config.

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use pokelens_config::PokelensConfig;
use pokelens_core::PokeError;
use pokelens_gateway::GatewayState;
use pokelens_identifier::{GeminiProvider, OpenRouterProvider, PokemonIdentifier, ProviderRegistry};
use pokelens_understanding::HttpImageClassifier;

/// Register every provider that has credentials.
pub fn build_registry(config: &PokelensConfig, client: &Client) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    if let Some(api_key) = &config.gemini.api_key {
        registry.register(Arc::new(
            GeminiProvider::new(api_key)
                .with_base_url(&config.gemini.base_url)
                .with_client(client.clone()),
        ));
        info!("Registered Gemini provider");
    }

    if let Some(api_key) = &config.openrouter.api_key {
        registry.register(Arc::new(
            OpenRouterProvider::new(api_key)
                .with_base_url(&config.openrouter.base_url)
                .with_client(client.clone()),
        ));
        info!("Registered OpenRouter provider");
    }

    registry
}

/// The identifier backed by the provider named in `LLM_PROVIDER`.
pub fn build_identifier(config: &PokelensConfig) -> Result<PokemonIdentifier> {
    let client = Client::builder()
        .timeout(config.upstream_timeout())
        .build()
        .context("Failed to build upstream HTTP client")?;

    let registry = build_registry(config, &client);
    let provider = registry.get(config.llm_provider.as_str()).ok_or_else(|| {
        PokeError::Config(format!(
            "provider `{}` is selected but has no API key (registered: {:?})",
            config.llm_provider,
            registry.list()
        ))
    })?;

    Ok(PokemonIdentifier::new(provider, &config.active_provider().model)
        .with_max_attempts(config.max_attempts))
}

pub fn build_state(config: &PokelensConfig) -> Result<GatewayState> {
    let identifier = build_identifier(config)?;
    let classifier = HttpImageClassifier::new(
        &config.classifier.url,
        config.classifier.api_key.clone(),
        config.upstream_timeout(),
    )?;

    Ok(GatewayState {
        identifier: Arc::new(identifier),
        classifier: Arc::new(classifier),
        max_upload_bytes: config.max_upload_bytes,
        image_size: config.classifier.image_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokelens_config::ProviderKind;

    #[test]
    fn registers_only_keyed_providers() {
        let mut config = PokelensConfig::default();
        config.openrouter.api_key = Some("sk-or-test".into());

        let registry = build_registry(&config, &Client::new());
        assert_eq!(registry.list(), vec!["openrouter".to_string()]);
    }

    #[test]
    fn selected_provider_without_key_fails() {
        let mut config = PokelensConfig::default();
        config.llm_provider = ProviderKind::Gemini;
        config.openrouter.api_key = Some("sk-or-test".into());

        let err = build_identifier(&config).err().unwrap();
        assert!(err.to_string().contains("gemini"));
    }

    #[test]
    fn identifier_uses_configured_budget() {
        let mut config = PokelensConfig::default();
        config.gemini.api_key = Some("test-key".into());
        config.max_attempts = 4;

        let identifier = build_identifier(&config).unwrap();
        assert_eq!(identifier.provider_name(), "gemini");
        assert_eq!(identifier.max_attempts(), 4);
    }
}
