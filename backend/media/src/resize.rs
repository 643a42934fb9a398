//! Image preparation for the classification model.

use std::io::Cursor;

use anyhow::{Context, Result};
use bytes::Bytes;
use image::{imageops::FilterType, ImageFormat};
use tracing::info;

use pokelens_core::ImageUpload;

/// Decode an upload, resize it to `size × size`, and re-encode it as PNG.
pub fn resize_for_classification(upload: &ImageUpload, size: u32) -> Result<ImageUpload> {
    let decoded = image::load_from_memory(&upload.data).context("Failed to decode image")?;
    info!(
        from_width = decoded.width(),
        from_height = decoded.height(),
        size,
        "Resizing image for classification"
    );

    let resized = decoded.resize_exact(size, size, FilterType::Triangle);

    let mut out = Cursor::new(Vec::new());
    resized
        .write_to(&mut out, ImageFormat::Png)
        .context("Failed to encode resized image")?;

    Ok(ImageUpload {
        filename: upload.filename.clone(),
        mime_type: "image/png".to_string(),
        data: Bytes::from(out.into_inner()),
    })
}
