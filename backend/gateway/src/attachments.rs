//! Image attachment extraction from `multipart/form-data` bodies.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use tracing::{debug, info};

use pokelens_core::{ImageUpload, PokeError};
use pokelens_media::validate_image_upload;

/// Name of the form field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Pull the `image` field out of a form and validate it. Other fields are skipped.
pub async fn read_image_field(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<ImageUpload, PokeError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error(e, max_bytes))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            debug!(field = ?field.name(), "Skipping form field");
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| read_error(e, max_bytes))?;

        info!(
            filename = ?filename,
            content_type = ?content_type,
            size = data.len(),
            "Received image attachment"
        );
        return validate_image_upload(filename, content_type.as_deref(), data, max_bytes);
    }

    Err(PokeError::InvalidUpload(format!(
        "no `{IMAGE_FIELD}` file in form data"
    )))
}

// A body cut off by the request limit surfaces as a generic stream error.
fn read_error(err: MultipartError, max_bytes: usize) -> PokeError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PokeError::InvalidUpload(format!("uploaded image exceeds {max_bytes} bytes"))
    } else {
        PokeError::InvalidUpload(err.body_text())
    }
}
