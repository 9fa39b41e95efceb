//! Region extraction bindings.
//!
//! Crop coordinates arrive as JavaScript numbers in source pixels relative
//! to the unrotated image (the widget's `croppedAreaPixels`). Fractional
//! values are rounded to the nearest pixel.

use crate::types::{JsCroppedImage, JsSourceImage};
use cropframe_core::transform::{self, ExtractOptions, InterpolationFilter};
use cropframe_core::CropRect;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Crop rectangle as sent from JavaScript.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct JsCropRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl JsCropRect {
    pub(crate) fn to_rect(self) -> CropRect {
        rect_from_numbers(self.x, self.y, self.width, self.height)
    }
}

/// Round JS numbers to a pixel rect. NaN becomes 0, which the extractor
/// rejects as an empty region.
pub(crate) fn rect_from_numbers(x: f64, y: f64, width: f64, height: f64) -> CropRect {
    CropRect::new(
        x.round() as i64,
        y.round() as i64,
        width.round() as i64,
        height.round() as i64,
    )
}

fn parse_rect(rect: JsValue) -> Result<CropRect, JsValue> {
    serde_wasm_bindgen::from_value::<JsCropRect>(rect)
        .map(JsCropRect::to_rect)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop rect: {}", e)))
}

fn to_js_error(e: transform::ExtractError) -> JsValue {
    log::error!("Error creating cropped image: {}", e);
    JsValue::from_str(&e.to_string())
}

/// Extract a rotated region as raw RGBA pixels.
///
/// # Arguments
///
/// * `image` - Decoded source image
/// * `x`, `y`, `width`, `height` - Crop rect in source pixels
/// * `rotation` - Degrees clockwise
/// * `filter` - 0 = nearest, 1 = bilinear, 2 = lanczos3
///
/// # Returns
///
/// A `width × height` image; pixels the rotated source does not cover are
/// transparent.
#[wasm_bindgen]
pub fn extract_region(
    image: &JsSourceImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rotation: f64,
    filter: u8,
) -> Result<JsSourceImage, JsValue> {
    let options = ExtractOptions {
        filter: InterpolationFilter::from_code(filter),
        ..Default::default()
    };
    let rect = rect_from_numbers(x, y, width, height);

    transform::extract_region(image.as_image(), rect, rotation, &options)
        .map(JsSourceImage::from_image)
        .map_err(to_js_error)
}

/// Extract a rotated region and encode it as PNG.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = crop_image(image, croppedAreaPixels, rotation);
/// preview.src = cropped.to_data_url();
/// ```
#[wasm_bindgen]
pub fn crop_image(
    image: &JsSourceImage,
    rect: JsValue,
    rotation: f64,
) -> Result<JsCroppedImage, JsValue> {
    let rect = parse_rect(rect)?;
    transform::extract(image.as_image(), rect, rotation)
        .map(JsCroppedImage::from_cropped)
        .map_err(to_js_error)
}

/// Like [`crop_image`], with `ExtractOptions` passed as a plain object,
/// e.g. `{ filter: "lanczos3", format: { type: "jpeg", quality: 90 } }`.
/// Missing fields take their defaults.
#[wasm_bindgen]
pub fn crop_image_with(
    image: &JsSourceImage,
    rect: JsValue,
    rotation: f64,
    options: JsValue,
) -> Result<JsCroppedImage, JsValue> {
    let rect = parse_rect(rect)?;
    let options: ExtractOptions = if options.is_undefined() || options.is_null() {
        ExtractOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid extract options: {}", e)))?
    };

    transform::extract_with(image.as_image(), rect, rotation, &options)
        .map(JsCroppedImage::from_cropped)
        .map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 4x4 image with a distinct color per quadrant.
    fn quadrant_image() -> JsSourceImage {
        let mut pixels = Vec::with_capacity(4 * 4 * 4);
        for y in 0..4 {
            for x in 0..4 {
                let px = match (x < 2, y < 2) {
                    (true, true) => [255, 0, 0, 255],
                    (false, true) => [0, 255, 0, 255],
                    (true, false) => [0, 0, 255, 255],
                    (false, false) => [255, 255, 0, 255],
                };
                pixels.extend_from_slice(&px);
            }
        }
        JsSourceImage::new(4, 4, pixels)
    }

    #[test]
    fn test_rect_from_numbers_rounds() {
        assert_eq!(rect_from_numbers(1.4, -0.6, 9.5, 3.0), CropRect::new(1, -1, 10, 3));
        assert_eq!(rect_from_numbers(f64::NAN, 0.0, 1.0, 1.0).x, 0);
    }

    #[test]
    fn test_extract_identity() {
        let img = quadrant_image();
        let region = extract_region(&img, 0.0, 0.0, 4.0, 4.0, 0.0, 1).unwrap();
        assert_eq!(region.width(), 4);
        assert_eq!(region.height(), 4);
        assert_eq!(region.pixels(), img.pixels());
    }

    #[test]
    fn test_extract_quadrant() {
        let img = quadrant_image();
        let region = extract_region(&img, 2.0, 2.0, 2.0, 2.0, 0.0, 0).unwrap();
        assert_eq!(region.pixels(), [255, 255, 0, 255].repeat(4));
    }

    #[test]
    fn test_extract_rotated_90() {
        let img = quadrant_image();
        let region = extract_region(&img, 0.0, 0.0, 4.0, 4.0, 90.0, 0).unwrap();
        // Clockwise: the bottom-left (blue) quadrant moves to the top-left.
        assert_eq!(&region.pixels()[0..4], &[0, 0, 255, 255]);
    }

    #[test]
    fn test_extract_outside_is_transparent() {
        let img = quadrant_image();
        let region = extract_region(&img, 100.0, 100.0, 3.0, 3.0, 0.0, 1).unwrap();
        assert!(region.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_extract_far_away_js_numbers() {
        let img = quadrant_image();
        // 1e19 saturates to i64::MAX and -1e19 to i64::MIN.
        for (x, y) in [(1e19, 0.0), (-1e19, 1e19), (0.0, -1e19)] {
            let region = extract_region(&img, x, y, 4.0, 4.0, 0.0, 1).unwrap();
            assert!(region.pixels().iter().all(|&b| b == 0), "at ({}, {})", x, y);
        }
    }

    #[test]
    fn test_js_crop_rect_to_rect() {
        let rect = JsCropRect {
            x: 0.2,
            y: 1.7,
            width: 100.0,
            height: 75.49,
        };
        assert_eq!(rect.to_rect(), CropRect::new(0, 2, 100, 75));
    }
}
