//! Rotation-safe canvas geometry.
//!
//! A source image of size `w × h` is drawn centred on a square "safe area"
//! canvas large enough to hold it at any rotation:
//!
//! ```text
//! safe_area = 2 * ((max(w, h) / 2) * √2)
//! ```
//!
//! The unrotated draw position is snapped to whole pixels so a 0° extraction
//! is an exact copy. Rotation pivots about the drawn image's own centre, and
//! quarter turns use exact trig values.
//!
//! A quarter turn is an exact pixel permutation only when `w` and `h` have
//! the same parity. Otherwise the pivot sits half a pixel off the grid, the
//! rotated pixel centres land on source pixel boundaries, and bilinear or
//! Lanczos sampling blends neighbouring pixels (nearest picks one of them).
//! Extracting a crop rectangle then amounts to placing the baked canvas on
//! the output surface at the negated draw offset minus the rectangle origin.

use std::f64::consts::SQRT_2;

/// Angles closer than this to a multiple of 360° are treated as no rotation.
const ANGLE_EPSILON: f64 = 1e-9;

/// Side length of the smallest square that contains a `width × height`
/// image at any rotation, before rounding to pixels.
pub fn safe_area(width: u32, height: u32) -> f64 {
    let max_size = width.max(height) as f64;
    2.0 * ((max_size / 2.0) * SQRT_2)
}

/// Normalise an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle_degrees: f64) -> f64 {
    let normalized = angle_degrees.rem_euclid(360.0);
    if normalized < ANGLE_EPSILON || 360.0 - normalized < ANGLE_EPSILON {
        0.0
    } else {
        normalized
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Example
///
/// ```
/// use cropframe_core::transform::compute_rotated_bounds;
///
/// let (w, h) = compute_rotated_bounds(100, 50, 90.0);
/// assert_eq!((w, h), (50, 100));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let angle = normalize_degrees(angle_degrees);

    if angle == 0.0 || (angle - 180.0).abs() < 0.001 {
        return (width, height);
    }
    if (angle - 90.0).abs() < 0.001 || (angle - 270.0).abs() < 0.001 {
        return (height, width);
    }

    let angle_rad = angle.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // new_w = |w*cos| + |h*sin|, new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Exact `(sin, cos)` for multiples of 90°, so quarter turns carry no
/// rounding noise into the sample positions.
fn quarter_turn_sin_cos(degrees: f64) -> Option<(f64, f64)> {
    if degrees == 0.0 {
        Some((0.0, 1.0))
    } else if degrees == 90.0 {
        Some((1.0, 0.0))
    } else if degrees == 180.0 {
        Some((0.0, -1.0))
    } else if degrees == 270.0 {
        Some((-1.0, 0.0))
    } else {
        None
    }
}

/// Placement of a rotated source on its safe-area canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// Source image width.
    pub source_width: u32,
    /// Source image height.
    pub source_height: u32,
    /// Canvas side in pixels (`ceil(safe_area)`).
    pub side: u32,
    /// Top-left of the unrotated source on the canvas.
    pub draw_x: i64,
    pub draw_y: i64,
    /// Rotation in degrees, normalised to `[0, 360)`, clockwise.
    pub degrees: f64,
    cos: f64,
    sin: f64,
}

impl CanvasLayout {
    /// Lay out a `width × height` source rotated by `angle_degrees`.
    pub fn new(width: u32, height: u32, angle_degrees: f64) -> Self {
        let side = safe_area(width, height).ceil() as u32;
        let draw_x = (side as i64 - width as i64).div_euclid(2);
        let draw_y = (side as i64 - height as i64).div_euclid(2);

        let degrees = normalize_degrees(angle_degrees);
        let (sin, cos) = quarter_turn_sin_cos(degrees)
            .unwrap_or_else(|| degrees.to_radians().sin_cos());

        Self {
            source_width: width,
            source_height: height,
            side,
            draw_x,
            draw_y,
            degrees,
            cos,
            sin,
        }
    }

    /// True when no rotation is applied.
    pub fn is_unrotated(&self) -> bool {
        self.degrees == 0.0
    }

    /// Pivot of the rotation in canvas coordinates.
    pub fn pivot(&self) -> (f64, f64) {
        (
            self.draw_x as f64 + self.source_width as f64 / 2.0,
            self.draw_y as f64 + self.source_height as f64 / 2.0,
        )
    }

    /// Offset at which the baked canvas lands on an output surface whose
    /// origin is `(rect_x, rect_y)` in source-pixel space.
    ///
    /// Saturates for rectangles near the `i64` limits; such offsets miss the
    /// surface entirely either way.
    pub fn placement_offset(&self, rect_x: i64, rect_y: i64) -> (i64, i64) {
        (
            (-self.draw_x).saturating_sub(rect_x),
            (-self.draw_y).saturating_sub(rect_y),
        )
    }

    /// Map the centre of canvas pixel `(u, v)` back into continuous source
    /// coordinates (origin at the source's top-left corner).
    ///
    /// The forward transform rotates clockwise on a y-down grid, so the
    /// inverse applies the transposed rotation matrix.
    #[inline]
    pub fn canvas_to_source(&self, u: i64, v: i64) -> (f64, f64) {
        let (px, py) = self.pivot();
        let dx = u as f64 + 0.5 - px;
        let dy = v as f64 + 0.5 - py;

        let sx = dx * self.cos + dy * self.sin;
        let sy = -dx * self.sin + dy * self.cos;

        (
            sx + self.source_width as f64 / 2.0,
            sy + self.source_height as f64 / 2.0,
        )
    }

    /// True when `(u, v)` lies on the canvas.
    #[inline]
    pub fn contains(&self, u: i64, v: i64) -> bool {
        let side = self.side as i64;
        (0..side).contains(&u) && (0..side).contains(&v)
    }
}
