//! Upload validation: accept only non-empty, size-limited images.

use bytes::Bytes;
use tracing::{debug, warn};

use pokelens_core::{ImageUpload, PokeError};

use crate::mime_detect::{is_image, mime_from_extension, sniff_mime_type};

const OPAQUE_MIME: &str = "application/octet-stream";

/// Validate a raw upload and label it with its sniffed MIME type.
///
/// A declared content type (or, failing that, the filename extension) that
/// names a non-image type is rejected even when the bytes look like an image.
pub fn validate_image_upload(
    filename: Option<String>,
    declared_mime: Option<&str>,
    data: Bytes,
    max_bytes: usize,
) -> Result<ImageUpload, PokeError> {
    if data.is_empty() {
        return Err(PokeError::InvalidUpload("uploaded image is empty".into()));
    }
    if data.len() > max_bytes {
        return Err(PokeError::InvalidUpload(format!(
            "uploaded image is {} bytes, limit is {max_bytes}",
            data.len()
        )));
    }

    let claimed = declared_mime
        .filter(|m| !m.trim().is_empty() && !m.eq_ignore_ascii_case(OPAQUE_MIME))
        .or_else(|| filename.as_deref().map(mime_from_extension))
        .filter(|m| *m != OPAQUE_MIME);
    if let Some(claimed) = claimed {
        if !is_image(claimed) {
            warn!(claimed = %claimed, "Rejected non-image upload");
            return Err(PokeError::UnsupportedMediaType(claimed.to_string()));
        }
    }

    let Some(mime_type) = sniff_mime_type(&data) else {
        warn!(bytes = data.len(), "Upload does not look like a supported image");
        return Err(PokeError::UnsupportedMediaType(
            "payload is not a recognized image format".into(),
        ));
    };

    debug!(mime = mime_type, bytes = data.len(), "Accepted image upload");
    Ok(ImageUpload {
        filename,
        mime_type: mime_type.to_string(),
        data,
    })
}
