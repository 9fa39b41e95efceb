//! Image encoding bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, to_data_url } from '@cropframe/wasm';
//!
//! const png = encode_png(pixels, width, height);
//! img.src = to_data_url(png, 'image/png');
//! ```

use cropframe_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Errors
///
/// Throws if the buffer length is not `width * height * 4` or a dimension
/// is zero.
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode RGBA pixel data to JPEG bytes, flattening transparency over white.
///
/// `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Wrap encoded bytes in a base64 `data:` URL.
#[wasm_bindgen]
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    encode::to_data_url(bytes, mime)
}
