//! Cropframe WASM - WebAssembly bindings for Cropframe
//!
//! This crate exposes cropframe-core to the browser: file checks, decoding,
//! rotated region extraction, encoding, and the crop session state.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for images and crop results
//! - `decode` - File type validation and image decoding
//! - `encode` - PNG/JPEG encoding and data URLs
//! - `transform` - Region extraction
//! - `session` - Crop session state machine
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, crop_image, default_download_filename } from '@cropframe/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const cropped = crop_image(image, croppedAreaPixels, rotation);
//! link.href = cropped.to_data_url();
//! link.download = default_download_filename();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod transform;
mod types;

pub use decode::{decode_image, is_image_mime, validate_file_type};
pub use encode::{encode_jpeg, encode_png, to_data_url};
pub use session::JsCropSession;
pub use transform::{crop_image, crop_image_with, extract_region};
pub use types::{JsCroppedImage, JsSourceImage};

/// Initialize the WASM module (called automatically on load).
///
/// Routes Rust panics and `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("cropframe: logger init failed: {}", e).into());
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// File name offered for the download action.
#[wasm_bindgen]
pub fn default_download_filename() -> String {
    cropframe_core::session::DEFAULT_DOWNLOAD_FILENAME.to_string()
}

/// Fixed crop aspect ratio (width / height).
#[wasm_bindgen]
pub fn default_aspect_ratio() -> f64 {
    cropframe_core::session::DEFAULT_ASPECT_RATIO
}
