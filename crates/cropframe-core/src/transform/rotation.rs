//! Rotation baking with nearest, bilinear and Lanczos3 interpolation.
//!
//! Baking draws the source, rotated about its own centre, onto a transparent
//! safe-area canvas and reads the result back as plain RGBA pixels. Later
//! stages never need to know about the rotation.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each canvas pixel we compute the
//! source position its centre came from and interpolate there.
//!
//! ```text
//! src_x =  dx * cos(θ) + dy * sin(θ) + w / 2
//! src_y = -dx * sin(θ) + dy * cos(θ) + h / 2
//! ```
//!
//! where `(dx, dy)` is the pixel centre relative to the pivot. Positions
//! outside `[0, w) × [0, h)` are transparent. Inside the image, kernel taps
//! that fall past an edge are clamped to it, so borders do not fade.
//! Interpolation is done on premultiplied alpha so transparent source pixels
//! never bleed their color into opaque neighbours.

use serde::{Deserialize, Serialize};

use super::geometry::CanvasLayout;
use crate::decode::SourceImage;

/// Fully transparent pixel.
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest neighbour - hard edges, no new colors.
    Nearest,
    /// Fast bilinear interpolation - good for preview rendering.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation - good for export.
    Lanczos3,
}

impl InterpolationFilter {
    /// Convert from the numeric code used by the JS bindings.
    ///
    /// Values: 0 = Nearest, 2 = Lanczos3, anything else = Bilinear.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => InterpolationFilter::Nearest,
            2 => InterpolationFilter::Lanczos3,
            _ => InterpolationFilter::Bilinear,
        }
    }
}

/// Bake the rotated source onto a full safe-area canvas.
///
/// Returns a `side × side` raster (see [`CanvasLayout`]) with the rotated
/// image centred on it and transparent pixels everywhere else.
///
/// # Example
///
/// ```ignore
/// use cropframe_core::transform::{bake_rotation, InterpolationFilter};
///
/// let baked = bake_rotation(&image, 15.0, InterpolationFilter::Bilinear);
/// assert_eq!(baked.width, baked.height);
/// ```
pub fn bake_rotation(
    image: &SourceImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> SourceImage {
    let layout = CanvasLayout::new(image.width, image.height, angle_degrees);
    bake_layout(image, &layout, filter)
}

pub(crate) fn bake_layout(
    image: &SourceImage,
    layout: &CanvasLayout,
    filter: InterpolationFilter,
) -> SourceImage {
    let side = layout.side;
    let mut output = vec![0u8; side as usize * side as usize * 4];

    for (v, row) in output.chunks_exact_mut(side as usize * 4).enumerate() {
        for (u, px) in row.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&sample_canvas(image, layout, u as i64, v as i64, filter));
        }
    }

    SourceImage {
        width: side,
        height: side,
        pixels: output,
    }
}

/// Value of canvas pixel `(u, v)` after the rotated draw.
#[inline]
pub(crate) fn sample_canvas(
    image: &SourceImage,
    layout: &CanvasLayout,
    u: i64,
    v: i64,
    filter: InterpolationFilter,
) -> [u8; 4] {
    if !layout.contains(u, v) {
        return TRANSPARENT;
    }

    if layout.is_unrotated() {
        let x = u - layout.draw_x;
        let y = v - layout.draw_y;
        if x < 0 || y < 0 || x >= image.width as i64 || y >= image.height as i64 {
            return TRANSPARENT;
        }
        return image.pixel(x as u32, y as u32);
    }

    let (sx, sy) = layout.canvas_to_source(u, v);
    if sx < 0.0 || sy < 0.0 || sx >= image.width as f64 || sy >= image.height as f64 {
        return TRANSPARENT;
    }

    match filter {
        InterpolationFilter::Nearest => image.pixel(sx.floor() as u32, sy.floor() as u32),
        InterpolationFilter::Bilinear => sample_bilinear(image, sx - 0.5, sy - 0.5),
        InterpolationFilter::Lanczos3 => sample_lanczos3(image, sx - 0.5, sy - 0.5),
    }
}

/// Get a premultiplied pixel `[r*a, g*a, b*a, a]` with edge clamping.
#[inline]
fn premultiplied(image: &SourceImage, px: i64, py: i64) -> [f64; 4] {
    let x = px.clamp(0, image.width as i64 - 1) as u32;
    let y = py.clamp(0, image.height as i64 - 1) as u32;
    let p = image.pixel(x, y);
    let a = p[3] as f64;
    [p[0] as f64 * a, p[1] as f64 * a, p[2] as f64 * a, a]
}

/// Convert an accumulated premultiplied sample back to straight RGBA.
#[inline]
fn unpremultiply(acc: [f64; 4]) -> [u8; 4] {
    let a = acc[3].clamp(0.0, 255.0);
    if a < 0.5 {
        return TRANSPARENT;
    }
    [
        (acc[0] / acc[3]).clamp(0.0, 255.0).round() as u8,
        (acc[1] / acc[3]).clamp(0.0, 255.0).round() as u8,
        (acc[2] / acc[3]).clamp(0.0, 255.0).round() as u8,
        a.round() as u8,
    ]
}

/// Sample a pixel using bilinear interpolation.
///
/// `x` and `y` are in pixel-index space (pixel centres at integers).
fn sample_bilinear(image: &SourceImage, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = premultiplied(image, x0, y0);
    let p10 = premultiplied(image, x0 + 1, y0);
    let p01 = premultiplied(image, x0, y0 + 1);
    let p11 = premultiplied(image, x0 + 1, y0 + 1);

    let mut acc = [0.0f64; 4];
    for i in 0..4 {
        acc[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    unpremultiply(acc)
}

/// Sample a pixel using Lanczos3 interpolation over a 6x6 neighbourhood.
fn sample_lanczos3(image: &SourceImage, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut acc = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        let py = y0 + ky;
        let wy = lanczos_weight(y - py as f64, 3.0);
        for kx in -2..=3 {
            let px = x0 + kx;
            let weight = lanczos_weight(x - px as f64, 3.0) * wy;

            let p = premultiplied(image, px, py);
            for i in 0..4 {
                acc[i] += p[i] * weight;
            }
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return sample_bilinear(image, x, y);
    }
    for v in acc.iter_mut() {
        *v /= weight_sum;
    }
    // Lanczos lobes can overshoot; keep alpha and colors consistent.
    acc[3] = acc[3].clamp(0.0, 255.0);
    for i in 0..3 {
        acc[i] = acc[i].clamp(0.0, 255.0 * acc[3]);
    }

    unpremultiply(acc)
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
