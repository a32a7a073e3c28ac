//! Upload validation and re-encoding for the vision model.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat};

use super::{IdentifyError, VisionError};

/// Media type every upload is re-encoded to.
pub const PREPARED_MIME: &str = "image/jpeg";

/// Reject anything that is not declared as an image.
pub fn validate_content_type(content_type: Option<&str>) -> Result<(), IdentifyError> {
    match content_type {
        Some(ct) if ct.starts_with("image/") => Ok(()),
        Some(ct) => Err(IdentifyError::InvalidContentType(ct.to_string())),
        None => Err(IdentifyError::InvalidContentType("(none)".to_string())),
    }
}

/// Decode the upload, proving it is a loadable image.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, IdentifyError> {
    if bytes.is_empty() {
        return Err(IdentifyError::InvalidImage("empty upload".to_string()));
    }
    image::load_from_memory(bytes).map_err(|e| IdentifyError::InvalidImage(e.to_string()))
}

/// Re-encode as JPEG and wrap in a `data:` URL.
pub fn to_data_url(image: &DynamicImage) -> Result<String, VisionError> {
    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut cursor = Cursor::new(Vec::new());
    rgb.write_to(&mut cursor, ImageFormat::Jpeg)
        .map_err(|e| VisionError::Encode(e.to_string()))?;

    Ok(format!(
        "data:{};base64,{}",
        PREPARED_MIME,
        STANDARD.encode(cursor.into_inner())
    ))
}
