//! Cropframe Core - rotated region extraction for a crop-and-save flow
//!
//! This crate provides the image work behind an interactive cropper: file
//! type checks and decoding, extraction of an axis-aligned region from a
//! rotated image, PNG/JPEG encoding, and the headless session state that
//! drives the crop UI.

pub mod decode;
pub mod encode;
pub mod session;
pub mod transform;

pub use decode::{decode_image, validate_file_type, DecodeError, SourceImage};
pub use encode::OutputFormat;
pub use session::{CropSession, SessionConfig, SessionError, SessionEvent, SessionStage};
pub use transform::{
    extract, extract_region, extract_with, CroppedImage, ExtractError, ExtractOptions,
    ExtractStrategy, InterpolationFilter,
};

/// Crop rectangle in source pixels, relative to the unrotated image's
/// top-left corner.
///
/// The origin may be negative and the rectangle may extend past the image;
/// uncovered output pixels are transparent. `width` and `height` must be
/// positive for extraction to succeed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl CropRect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when width or height is not positive.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
