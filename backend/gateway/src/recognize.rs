//! Image classification endpoint (`POST /recognize`).

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use pokelens_core::PokeError;
use pokelens_media::resize_for_classification;

use crate::attachments::read_image_field;
use crate::error::ApiError;
use crate::server::GatewayState;

const FAILURE: &str = "Error recognizing image";

#[derive(Debug, Serialize, Deserialize)]
pub struct RecognizeResponse {
    pub predicted_class: String,
}

/// Handler for `POST /recognize`.
/// Resizes the upload to the model's input size and forwards it to the classifier.
#[instrument(skip_all)]
pub async fn recognize_image(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RecognizeResponse>, ApiError> {
    let multipart =
        multipart.map_err(|e| ApiError::new(FAILURE, PokeError::InvalidUpload(e.body_text())))?;
    let upload = read_image_field(multipart, state.max_upload_bytes)
        .await
        .map_err(|e| ApiError::new(FAILURE, e))?;

    let size = state.image_size;
    let resized = tokio::task::spawn_blocking(move || resize_for_classification(&upload, size))
        .await
        .map_err(|e| ApiError::new(FAILURE, PokeError::Other(e.into())))?
        .map_err(|e| ApiError::new(FAILURE, PokeError::InvalidUpload(format!("{e:#}"))))?;

    let classification = state
        .classifier
        .classify(&resized)
        .await
        .map_err(|e| ApiError::new(FAILURE, PokeError::upstream(state.classifier.name(), &e)))?;

    info!(
        predicted_class = %classification.predicted_class,
        confidence = ?classification.confidence,
        "Image recognized"
    );

    Ok(Json(RecognizeResponse {
        predicted_class: classification.predicted_class,
    }))
}
