//! Media handling for image uploads: sniffing, validation, and resizing.

pub mod resize;
pub mod mime_detect;
pub mod upload;

pub use resize::resize_for_classification;
pub use mime_detect::{is_image, mime_from_extension, sniff_mime_type};
pub use upload::validate_image_upload;
