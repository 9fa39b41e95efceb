//! Crop session bindings.
//!
//! `JsCropSession` holds the current [`CropSession`] snapshot and swaps it
//! on every transition, so the UI can read the getters after each call and
//! re-render.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsCropSession();
//! session.load_file(file.type, new Uint8Array(await file.arrayBuffer()));
//! if (session.image_error) showError(session.image_error);
//!
//! session.set_rotation(15);
//! session.crop_complete(area.x, area.y, area.width, area.height);
//! session.commit_crop();
//! preview.src = session.cropped().to_data_url();
//! ```

use crate::transform::rect_from_numbers;
use crate::types::{JsCroppedImage, JsSourceImage};
use cropframe_core::session::{CropSession, SessionConfig, SessionStage};
use wasm_bindgen::prelude::*;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

impl Default for JsCropSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsCropSession {
    /// Start a session with the default config.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCropSession {
        JsCropSession {
            inner: CropSession::default(),
        }
    }

    /// Start a session from a plain config object. Missing fields take
    /// their defaults; invalid values are repaired and logged.
    pub fn with_config(config: JsValue) -> Result<JsCropSession, JsValue> {
        let config: SessionConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid session config: {}", e)))?;
        Ok(JsCropSession {
            inner: CropSession::new(config),
        })
    }

    /// "empty", "editing" or "cropped".
    #[wasm_bindgen(getter)]
    pub fn stage(&self) -> String {
        match self.inner.stage() {
            SessionStage::Empty => "empty",
            SessionStage::Editing => "editing",
            SessionStage::Cropped => "cropped",
        }
        .to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn image_error(&self) -> Option<String> {
        self.inner.image_error().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.zoom()
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u16 {
        self.inner.rotation()
    }

    #[wasm_bindgen(getter)]
    pub fn crop_x(&self) -> f64 {
        self.inner.crop_position().x
    }

    #[wasm_bindgen(getter)]
    pub fn crop_y(&self) -> f64 {
        self.inner.crop_position().y
    }

    #[wasm_bindgen(getter)]
    pub fn aspect_ratio(&self) -> f64 {
        self.inner.config().aspect_ratio
    }

    #[wasm_bindgen(getter)]
    pub fn zoom_min(&self) -> f64 {
        self.inner.config().zoom_min
    }

    #[wasm_bindgen(getter)]
    pub fn zoom_max(&self) -> f64 {
        self.inner.config().zoom_max
    }

    #[wasm_bindgen(getter)]
    pub fn zoom_step(&self) -> f64 {
        self.inner.config().zoom_step
    }

    #[wasm_bindgen(getter)]
    pub fn rotation_max(&self) -> u16 {
        self.inner.config().rotation_max
    }

    #[wasm_bindgen(getter)]
    pub fn download_filename(&self) -> String {
        self.inner.download_filename()
    }

    /// The loaded image (copied), if any.
    pub fn image(&self) -> Option<JsSourceImage> {
        self.inner
            .image()
            .map(|image| JsSourceImage::from_image(image.clone()))
    }

    /// The committed crop (copied), if any.
    pub fn cropped(&self) -> Option<JsCroppedImage> {
        self.inner
            .cropped()
            .map(|cropped| JsCroppedImage::from_cropped(cropped.clone()))
    }

    /// Accept a picked file. A non-image type sets `image_error` instead of
    /// throwing.
    ///
    /// # Errors
    ///
    /// Throws if an image file cannot be decoded.
    pub fn load_file(&mut self, mime: &str, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner = self.inner.load_file(mime, bytes).map_err(to_js_error)?;
        Ok(())
    }

    pub fn set_crop_position(&mut self, x: f64, y: f64) {
        self.inner = self.inner.set_crop_position(x, y);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.inner = self.inner.set_zoom(zoom);
    }

    pub fn set_rotation(&mut self, degrees: i32) {
        self.inner = self.inner.set_rotation(degrees);
    }

    /// Record the pixel crop area reported by the widget.
    pub fn crop_complete(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner = self.inner.crop_complete(rect_from_numbers(x, y, width, height));
    }

    /// Extract the current area.
    ///
    /// # Errors
    ///
    /// Throws if no image is loaded or the area is rejected; the session
    /// is unchanged.
    pub fn commit_crop(&mut self) -> Result<(), JsValue> {
        self.inner = self.inner.commit_crop().map_err(to_js_error)?;
        Ok(())
    }

    pub fn crop_again(&mut self) {
        self.inner = self.inner.crop_again();
    }

    pub fn start_over(&mut self) {
        self.inner = self.inner.start_over();
    }

    /// Encoded bytes for the save action.
    ///
    /// # Errors
    ///
    /// Throws if nothing has been cropped yet.
    pub fn download_bytes(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .download()
            .map(|(_, bytes)| bytes)
            .map_err(to_js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_defaults() {
        let session = JsCropSession::new();
        assert_eq!(session.stage(), "empty");
        assert_eq!(session.zoom(), 1.0);
        assert_eq!(session.zoom_min(), 1.0);
        assert_eq!(session.zoom_max(), 3.0);
        assert_eq!(session.zoom_step(), 0.1);
        assert_eq!(session.rotation_max(), 360);
        assert!((session.aspect_ratio() - 4.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(session.download_filename(), "cropped-image.png");
    }

    #[test]
    fn test_rejected_file_sets_error() {
        let mut session = JsCropSession::new();
        session.load_file("text/plain", b"hello").unwrap();
        assert_eq!(session.stage(), "empty");
        assert_eq!(session.image_error().as_deref(), Some("Please select an image file"));
    }

    #[test]
    fn test_full_flow() {
        let mut session = JsCropSession::new();
        session.load_file("image/png", &png_bytes(40, 30)).unwrap();
        assert_eq!(session.stage(), "editing");
        assert_eq!(session.image().map(|i| i.width()), Some(40));

        session.set_zoom(1.5);
        session.set_rotation(30);
        session.set_crop_position(2.0, -3.0);
        session.crop_complete(5.0, 5.0, 20.0, 15.0);
        session.commit_crop().unwrap();

        assert_eq!(session.stage(), "cropped");
        let cropped = session.cropped().unwrap();
        assert_eq!((cropped.width(), cropped.height()), (20, 15));
        assert_eq!(session.download_bytes().unwrap(), cropped.bytes());

        session.crop_again();
        assert_eq!(session.stage(), "editing");
        assert_eq!(session.rotation(), 30);

        session.start_over();
        assert_eq!(session.stage(), "empty");
        assert_eq!(session.rotation(), 0);
        assert_eq!(session.crop_x(), 0.0);
        assert_eq!(session.crop_y(), 0.0);
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    struct TestConfig {
        aspect_ratio: f64,
        download_filename: &'static str,
    }

    #[wasm_bindgen_test]
    fn test_with_config() {
        let config = serde_wasm_bindgen::to_value(&TestConfig {
            aspect_ratio: 1.0,
            download_filename: "avatar.png",
        })
        .unwrap();
        let session = JsCropSession::with_config(config).unwrap();
        assert_eq!(session.aspect_ratio(), 1.0);
        assert_eq!(session.download_filename(), "avatar.png");
        assert_eq!(session.zoom_max(), 3.0);
    }

    #[wasm_bindgen_test]
    fn test_commit_without_image_throws() {
        let mut session = JsCropSession::new();
        assert!(session.commit_crop().is_err());
        assert_eq!(session.stage(), "empty");
    }

    #[wasm_bindgen_test]
    fn test_download_before_crop_throws() {
        assert!(JsCropSession::new().download_bytes().is_err());
    }
}
