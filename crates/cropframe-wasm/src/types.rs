//! WASM-compatible wrapper types for image data.
//!
//! These types own their buffers in WASM memory and copy them out to
//! JavaScript only when a getter is called.

use cropframe_core::decode::SourceImage;
use cropframe_core::transform::CroppedImage;
use wasm_bindgen::prelude::*;

/// A decoded RGBA image (also used for extracted regions).
///
/// # Memory Management
///
/// `pixels()` copies the buffer into a JavaScript `Uint8Array`. Keep the
/// image in WASM memory and pass it back to `crop_image`/`extract_region`
/// instead of round-tripping the pixels.
#[wasm_bindgen]
pub struct JsSourceImage {
    inner: SourceImage,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Create an image from dimensions and RGBA pixel data
    /// (4 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsSourceImage {
        JsSourceImage {
            inner: SourceImage::new(width, height, pixels),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGBA pixel data as a Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer also releases it.
    pub fn free(self) {}
}

impl JsSourceImage {
    pub(crate) fn from_image(inner: SourceImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_image(&self) -> &SourceImage {
        &self.inner
    }
}

/// An encoded crop result.
#[wasm_bindgen]
pub struct JsCroppedImage {
    inner: CroppedImage,
}

#[wasm_bindgen]
impl JsCroppedImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// MIME type of the encoded payload (`image/png` unless configured).
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes.len()
    }

    /// Encoded file bytes as a Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// The payload as a `data:` URL, ready for an `<img src>` or a
    /// download link.
    pub fn to_data_url(&self) -> String {
        self.inner.to_data_url()
    }
}

impl JsCroppedImage {
    pub(crate) fn from_cropped(inner: CroppedImage) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropframe_core::encode::OutputFormat;

    #[test]
    fn test_js_source_image_creation() {
        let img = JsSourceImage::new(100, 50, vec![0u8; 100 * 50 * 4]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 20000);
    }

    #[test]
    fn test_js_source_image_pixels() {
        let pixels = vec![255u8, 128, 64, 255, 32, 16, 8, 0];
        let img = JsSourceImage::new(2, 1, pixels.clone());
        assert_eq!(img.pixels(), pixels);
        assert_eq!(img.as_image().pixel(1, 0), [32, 16, 8, 0]);
    }

    #[test]
    fn test_from_image() {
        let js_img = JsSourceImage::from_image(SourceImage::filled(20, 10, [1, 2, 3, 4]));
        assert_eq!(js_img.width(), 20);
        assert_eq!(js_img.byte_length(), 800);
    }

    #[test]
    fn test_js_cropped_image() {
        let cropped = JsCroppedImage::from_cropped(CroppedImage {
            width: 3,
            height: 2,
            format: OutputFormat::Png,
            bytes: vec![1, 2, 3],
        });
        assert_eq!(cropped.width(), 3);
        assert_eq!(cropped.height(), 2);
        assert_eq!(cropped.mime_type(), "image/png");
        assert_eq!(cropped.bytes(), vec![1, 2, 3]);
        assert_eq!(cropped.to_data_url(), "data:image/png;base64,AQID");
    }
}
