use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::{debug, info, warn};

use pokelens_core::{
    IdentificationResult, ImageUpload, InlineImage, LlmProvider, LlmRequest, PokeError,
    TARGET_COUNT,
};
use pokelens_logging::{EventLogger, IdentificationEvent};
use pokelens_understanding::parse_pokemon_names;

/// Default number of upstream calls allowed per description.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

const IMAGE_PROMPT: &str =
    "Identify the pokemon shown in this image. List 5 pokemon it could be, one name per line.";

/// Prompt sent for a free-text description.
pub fn description_prompt(description: &str) -> String {
    format!(
        "Based on the following description, list 5 pokemon that could be described as {description}. \
         Reply with one pokemon name per line."
    )
}

/// Turns descriptions and images into a fixed-size list of pokemon names.
///
/// Descriptions get up to `max_attempts` upstream calls; each attempt replaces
/// the previous names, and the loop stops once [`TARGET_COUNT`] names are in.
/// Images get exactly one call. Provider errors abort without retry.
pub struct PokemonIdentifier {
    provider: Arc<dyn LlmProvider>,
    model: String,
    max_attempts: u32,
}

impl PokemonIdentifier {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Identify pokemon from a text description.
    pub async fn identify_description(
        &self,
        request_id: &str,
        description: &str,
    ) -> Result<IdentificationResult, PokeError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(PokeError::InvalidRequest(
                "description must not be empty".into(),
            ));
        }

        let request = LlmRequest::text(&self.model, description_prompt(description));

        let mut names: Vec<String> = Vec::new();
        let mut attempts = 0;
        while attempts < self.max_attempts && names.len() < TARGET_COUNT {
            attempts += 1;
            names = self.ask(request_id, &request, attempts).await?;
        }

        if names.len() < TARGET_COUNT {
            warn!(
                request_id,
                attempts,
                parsed = names.len(),
                "Attempt budget exhausted, padding result"
            );
        }

        Ok(self.finish(request_id, names, attempts))
    }

    /// Identify pokemon from a validated image upload. Single attempt.
    pub async fn identify_image(
        &self,
        request_id: &str,
        image: &ImageUpload,
    ) -> Result<IdentificationResult, PokeError> {
        let request = LlmRequest::text(&self.model, IMAGE_PROMPT).with_image(InlineImage {
            mime_type: image.mime_type.clone(),
            data_base64: STANDARD.encode(&image.data),
        });

        let names = self.ask(request_id, &request, 1).await?;
        Ok(self.finish(request_id, names, 1))
    }

    async fn ask(
        &self,
        request_id: &str,
        request: &LlmRequest,
        attempt: u32,
    ) -> Result<Vec<String>, PokeError> {
        let provider = self.provider.name().to_string();
        debug!(request_id, provider = %provider, attempt, "Calling provider");

        let response = self.provider.complete(request).await.map_err(|e| {
            let err = PokeError::upstream(&provider, &e);
            EventLogger::log_event(
                request_id,
                IdentificationEvent::Failed {
                    error_msg: err.to_string(),
                },
            );
            err
        })?;

        let names = parse_pokemon_names(&response.content);
        info!(
            request_id,
            provider = %provider,
            attempt,
            parsed = names.len(),
            latency_ms = response.latency_ms,
            "Provider responded"
        );
        EventLogger::log_event(
            request_id,
            IdentificationEvent::Attempt {
                provider,
                attempt,
                parsed: names.len(),
            },
        );
        Ok(names)
    }

    fn finish(&self, request_id: &str, names: Vec<String>, attempts: u32) -> IdentificationResult {
        let result = IdentificationResult::from_names(names);
        EventLogger::log_event(
            request_id,
            IdentificationEvent::Completed {
                identified: result.identified_count(),
                attempts,
            },
        );
        result
    }
}
