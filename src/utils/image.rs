use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{info, warn};

use crate::errors::AppError;

const ALLOWED_MIME_TYPES: [&str; 5] = ["image/png", "image/jpeg", "image/gif", "image/webp", "image/bmp"];

/// Decodes a base64 image (optionally given as a `data:` URL) into an
/// in-memory buffer and checks that the bytes really are an image.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, AppError> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact.as_bytes()).map_err(|err| {
        warn!("Rejecting image with invalid base64: {}", err);
        AppError::BadRequest("Invalid base64 image".to_string())
    })?;

    let kind = infer::get(&bytes).ok_or_else(|| {
        warn!("Unable to detect image type");
        AppError::BadRequest("Unsupported image format".to_string())
    })?;

    if !ALLOWED_MIME_TYPES.contains(&kind.mime_type()) {
        warn!("Rejecting upload of type {}", kind.mime_type());
        return Err(AppError::BadRequest("Unsupported image format".to_string()));
    }

    info!("Decoded {} image ({} bytes)", kind.mime_type(), bytes.len());
    Ok(bytes)
}
