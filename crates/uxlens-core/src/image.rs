//! Image preparation: file encoding and thumbnail generation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageReader;
use image::codecs::jpeg::JpegEncoder;
use std::io::Cursor;
use std::path::Path;
use uxlens_types::{AuditError, EncodedImage, sniff_mime_type};

/// Thumbnails are scaled down to at most this width, aspect preserved.
pub const THUMBNAIL_MAX_WIDTH: u32 = 80;

/// JPEG quality for thumbnail output.
pub const THUMBNAIL_JPEG_QUALITY: u8 = 70;

/// Read an image file and base64-encode it, sniffing the MIME type from
/// the file's magic bytes rather than trusting the extension.
pub fn encode_file(path: &Path) -> Result<EncodedImage, AuditError> {
    let bytes = std::fs::read(path).map_err(|e| AuditError::InvalidInput {
        message: format!("Cannot read {}: {e}", path.display()),
    })?;
    if bytes.is_empty() {
        return Err(AuditError::InvalidInput {
            message: format!("{} is empty", path.display()),
        });
    }
    let mime_type = sniff_mime_type(&bytes);
    Ok(EncodedImage::new(STANDARD.encode(&bytes), mime_type))
}

/// Produce a small JPEG thumbnail of an already-encoded image.
///
/// Images at or below the max width are re-encoded without scaling.
/// The output is always JPEG regardless of the source format, which
/// keeps the metadata tier compact.
pub fn make_thumbnail(source: &EncodedImage) -> Result<EncodedImage, AuditError> {
    let bytes = STANDARD
        .decode(&source.data)
        .map_err(|e| AuditError::InvalidInput {
            message: format!("Image payload is not valid base64: {e}"),
        })?;

    let decoded = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| AuditError::InvalidInput {
            message: format!("Unrecognized image format: {e}"),
        })?
        .decode()
        .map_err(|e| AuditError::InvalidInput {
            message: format!("Cannot decode image: {e}"),
        })?;

    let scaled = if decoded.width() > THUMBNAIL_MAX_WIDTH {
        let height = (u64::from(decoded.height()) * u64::from(THUMBNAIL_MAX_WIDTH)
            / u64::from(decoded.width()))
        .max(1) as u32;
        decoded.thumbnail_exact(THUMBNAIL_MAX_WIDTH, height)
    } else {
        decoded
    };

    // JPEG has no alpha channel
    let rgb = scaled.to_rgb8();
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, THUMBNAIL_JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(|e| AuditError::InvalidInput {
            message: format!("Thumbnail encoding failed: {e}"),
        })?;

    Ok(EncodedImage::new(STANDARD.encode(&out), "image/jpeg"))
}
