//! File-type gate applied before any bytes are decoded.

use thiserror::Error;

/// Rejection of a user-selected file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileTypeError {
    /// The declared content type is not an image type.
    #[error("Please select an image file")]
    InvalidFileType { mime: String },
}

/// Check whether a MIME type names an image (`image/*`).
///
/// Matching is case-insensitive and ignores surrounding whitespace and any
/// parameters after `;`.
pub fn is_image_mime(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    match essence.split_once('/') {
        Some((kind, subtype)) => kind.eq_ignore_ascii_case("image") && !subtype.trim().is_empty(),
        None => false,
    }
}

/// Validate a declared content type, returning `InvalidFileType` for
/// anything that is not an image.
pub fn validate_file_type(mime: &str) -> Result<(), FileTypeError> {
    if is_image_mime(mime) {
        Ok(())
    } else {
        Err(FileTypeError::InvalidFileType {
            mime: mime.to_string(),
        })
    }
}
