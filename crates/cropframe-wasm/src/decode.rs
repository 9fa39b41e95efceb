//! File validation and decoding bindings.
//!
//! # Example
//!
//! ```typescript
//! import { is_image_mime, decode_image } from '@cropframe/wasm';
//!
//! if (!is_image_mime(file.type)) {
//!   showError('Please select an image file');
//! } else {
//!   const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! }
//! ```

use crate::types::JsSourceImage;
use cropframe_core::decode;
use wasm_bindgen::prelude::*;

/// Whether a MIME type names an image (`image/*`).
#[wasm_bindgen]
pub fn is_image_mime(mime: &str) -> bool {
    decode::is_image_mime(mime)
}

/// Validate a file's declared MIME type.
///
/// # Errors
///
/// Throws "Please select an image file" for non-image types.
#[wasm_bindgen]
pub fn validate_file_type(mime: &str) -> Result<(), JsValue> {
    decode::validate_file_type(mime).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode PNG, JPEG, GIF, WebP or BMP bytes into RGBA, applying EXIF
/// orientation.
///
/// # Errors
///
/// Throws if the format is unrecognised or the file is corrupt.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsSourceImage::from_image)
        .map_err(|e| {
            log::warn!("decode failed: {}", e);
            JsValue::from_str(&e.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_is_image_mime() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/jpeg"));
        assert!(!is_image_mime("text/plain"));
        assert!(!is_image_mime(""));
    }

    #[test]
    fn test_validate_file_type_ok() {
        assert!(validate_file_type("image/webp").is_ok());
    }

    #[test]
    fn test_decode_image() {
        let image = decode_image(&png_bytes(6, 4)).unwrap();
        assert_eq!(image.width(), 6);
        assert_eq!(image.height(), 4);
        assert_eq!(image.byte_length(), 6 * 4 * 4);
        assert_eq!(&image.pixels()[0..4], &[10, 20, 30, 255]);
    }
}
