//! One-off identification from the terminal, without starting the server.

use anyhow::{anyhow, Result};
use uuid::Uuid;

use pokelens_config::PokelensConfig;
use pokelens_core::IdentificationResult;
use pokelens_identifier::PokemonIdentifier;
use pokelens_logging::redact_sensitive_data;

use crate::wiring::build_identifier;

pub async fn run(config: &PokelensConfig, text: &str) -> Result<()> {
    let identifier = build_identifier(config)?;
    let result = describe(&identifier, text).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Upstream errors can embed the request URL, key included; scrub before printing.
async fn describe(identifier: &PokemonIdentifier, text: &str) -> Result<IdentificationResult> {
    let request_id = Uuid::new_v4().to_string();
    identifier
        .identify_description(&request_id, text)
        .await
        .map_err(|e| anyhow!("{}", redact_sensitive_data(&e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use pokelens_identifier::MockProvider;

    #[tokio::test]
    async fn upstream_error_hides_key() {
        let provider = Arc::new(MockProvider::new("gemini").then_fail(
            "error sending request for url (https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent?key=AIzaSySecretKey123)",
        ));
        let identifier = PokemonIdentifier::new(provider, "gemini-1.5-flash");

        let err = describe(&identifier, "yellow mouse").await.unwrap_err();
        let message = format!("{err:#}");
        assert!(!message.contains("AIzaSySecretKey123"), "got: {message}");
        assert!(message.contains("key=[REDACTED]"));
    }

    #[tokio::test]
    async fn returns_five_names() {
        let provider = Arc::new(MockProvider::new("mock"));
        let identifier = PokemonIdentifier::new(provider, "test-model");

        let result = describe(&identifier, "starter pokemon").await.unwrap();
        assert_eq!(result.names().count(), 5);
    }
}
