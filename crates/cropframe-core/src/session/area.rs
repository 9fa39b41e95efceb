//! Initial crop area used before the selection widget reports one.

use crate::transform::compute_rotated_bounds;
use crate::CropRect;

/// The largest `aspect`-shaped rectangle that fits inside the rotated
/// image bounds, shrunk by `zoom` and centred on the image centre.
///
/// Coordinates are in the same frame the extractor uses: source pixels
/// relative to the unrotated image's top-left corner. Non-positive or
/// non-finite `aspect`/`zoom` fall back to 1.
pub fn default_crop_area(
    width: u32,
    height: u32,
    aspect: f64,
    zoom: f64,
    rotation: f64,
) -> CropRect {
    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    let zoom = if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 };
    let rotation = if rotation.is_finite() { rotation } else { 0.0 };

    let (bw, bh) = compute_rotated_bounds(width, height, rotation);
    let (bw, bh) = (bw as f64, bh as f64);

    let (crop_w, crop_h) = if bw / bh > aspect {
        (bh * aspect, bh)
    } else {
        (bw, bw / aspect)
    };
    let crop_w = (crop_w / zoom).round().max(1.0);
    let crop_h = (crop_h / zoom).round().max(1.0);

    let x = (width as f64 / 2.0 - crop_w / 2.0).round();
    let y = (height as f64 / 2.0 - crop_h / 2.0).round();

    CropRect::new(x as i64, y as i64, crop_w as i64, crop_h as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_image_limited_by_height() {
        let rect = default_crop_area(800, 300, 4.0 / 3.0, 1.0, 0.0);
        assert_eq!(rect, CropRect::new(200, 0, 400, 300));
    }

    #[test]
    fn test_tall_image_limited_by_width() {
        let rect = default_crop_area(300, 800, 4.0 / 3.0, 1.0, 0.0);
        assert_eq!(rect, CropRect::new(0, 288, 300, 225));
    }

    #[test]
    fn test_zoom_shrinks_around_centre() {
        let rect = default_crop_area(400, 300, 4.0 / 3.0, 2.0, 0.0);
        assert_eq!(rect, CropRect::new(100, 75, 200, 150));
    }

    #[test]
    fn test_rotation_uses_rotated_bounds() {
        let rect = default_crop_area(400, 300, 4.0 / 3.0, 1.0, 90.0);
        // Rotated bounds are 300x400, so the width limits the crop.
        assert_eq!(rect.width, 300);
        assert_eq!(rect.height, 225);
        assert_eq!(rect.x, 50);
    }

    #[test]
    fn test_degenerate_inputs_fall_back() {
        let rect = default_crop_area(10, 10, f64::NAN, 0.0, f64::INFINITY);
        assert_eq!(rect, CropRect::new(0, 0, 10, 10));
    }

    #[test]
    fn test_never_empty() {
        let rect = default_crop_area(1, 1, 16.0 / 9.0, 3.0, 0.0);
        assert!(rect.width >= 1 && rect.height >= 1);
    }
}
