//! Identification endpoints: `POST /description` and `POST /upload`.
//!
//! Both answer with exactly five `{ "name": ... }` entries.

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use pokelens_core::{IdentificationResult, IdentifiedPokemon, PokeError};
use pokelens_logging::{EventLogger, IdentificationEvent};

use crate::attachments::read_image_field;
use crate::error::ApiError;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct DescriptionRequest {
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationResponse {
    pub message: String,
    pub identified_pokemon: Vec<IdentifiedPokemon>,
}

impl IdentificationResponse {
    fn new(message: &str, result: IdentificationResult) -> Self {
        Self {
            message: message.to_string(),
            identified_pokemon: result.into_inner(),
        }
    }
}

/// Handler for `POST /description`.
#[instrument(skip_all)]
pub async fn identify_description(
    State(state): State<GatewayState>,
    payload: Result<Json<DescriptionRequest>, JsonRejection>,
) -> Result<Json<IdentificationResponse>, ApiError> {
    const FAILURE: &str = "Error identifying pokemon from description";

    let Json(request) =
        payload.map_err(|e| ApiError::new(FAILURE, PokeError::InvalidRequest(e.body_text())))?;

    let request_id = Uuid::new_v4().to_string();
    EventLogger::log_event(
        &request_id,
        IdentificationEvent::RequestReceived {
            route: "/description".into(),
            detail: request.description.clone(),
        },
    );

    let result = state
        .identifier
        .identify_description(&request_id, &request.description)
        .await
        .map_err(|e| ApiError::new(FAILURE, e))?;

    Ok(Json(IdentificationResponse::new("Description received", result)))
}

/// Handler for `POST /upload`.
#[instrument(skip_all)]
pub async fn identify_upload(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, axum::extract::multipart::MultipartRejection>,
) -> Result<Json<IdentificationResponse>, ApiError> {
    const FAILURE: &str = "Error identifying pokemon from image";

    let multipart =
        multipart.map_err(|e| ApiError::new(FAILURE, PokeError::InvalidUpload(e.body_text())))?;
    let upload = read_image_field(multipart, state.max_upload_bytes)
        .await
        .map_err(|e| ApiError::new(FAILURE, e))?;

    let request_id = Uuid::new_v4().to_string();
    EventLogger::log_event(
        &request_id,
        IdentificationEvent::RequestReceived {
            route: "/upload".into(),
            detail: format!("{} ({} bytes)", upload.mime_type, upload.data.len()),
        },
    );

    let result = state
        .identifier
        .identify_image(&request_id, &upload)
        .await
        .map_err(|e| ApiError::new(FAILURE, e))?;

    Ok(Json(IdentificationResponse::new("Image received", result)))
}
