//! Region placement: the second stage of the two-pass extraction.
//!
//! A baked canvas is copied onto a fresh, transparent output surface at an
//! integer offset. Canvas pixels that land outside the surface are dropped;
//! surface pixels the canvas does not cover stay transparent.
//!
//! # Coordinate System
//!
//! - Offsets may be negative (the canvas starts left of / above the output)
//! - Output pixel `(i, j)` receives canvas pixel `(i - dx, j - dy)`
//! - Origin is top-left corner

use crate::decode::SourceImage;

/// Place `canvas` on a `width × height` transparent surface at `(dx, dy)`.
///
/// # Example
///
/// ```
/// use cropframe_core::decode::SourceImage;
/// use cropframe_core::transform::place_region;
///
/// let canvas = SourceImage::filled(10, 10, [255, 0, 0, 255]);
/// let out = place_region(&canvas, -2, -2, 4, 4);
/// assert_eq!(out.width, 4);
/// assert_eq!(out.pixel(3, 3), [255, 0, 0, 255]);
/// ```
pub fn place_region(
    canvas: &SourceImage,
    dx: i64,
    dy: i64,
    width: u32,
    height: u32,
) -> SourceImage {
    let mut output = vec![0u8; width as usize * height as usize * 4];

    // Output columns covered by the canvas: i - dx in [0, canvas.width).
    let col_start = dx.clamp(0, width as i64);
    let col_end = dx.saturating_add(canvas.width as i64).clamp(0, width as i64);
    let row_start = dy.clamp(0, height as i64);
    let row_end = dy.saturating_add(canvas.height as i64).clamp(0, height as i64);

    if col_start < col_end {
        let span = (col_end - col_start) as usize * 4;
        for j in row_start..row_end {
            let src_y = (j - dy) as usize;
            let src_x = (col_start - dx) as usize;
            let src_idx = (src_y * canvas.width as usize + src_x) * 4;
            let dst_idx = (j as usize * width as usize + col_start as usize) * 4;

            output[dst_idx..dst_idx + span]
                .copy_from_slice(&canvas.pixels[src_idx..src_idx + span]);
        }
    }

    SourceImage {
        width,
        height,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 251) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        SourceImage::new(width, height, pixels)
    }

    proptest! {
        /// Property: Output dimensions always match the requested surface.
        #[test]
        fn prop_output_dimensions_exact(
            (cw, ch) in (1u32..=30, 1u32..=30),
            (dx, dy) in (-40i64..=40, -40i64..=40),
            (w, h) in (1u32..=30, 1u32..=30),
        ) {
            let canvas = create_test_image(cw, ch);
            let out = place_region(&canvas, dx, dy, w, h);
            prop_assert_eq!((out.width, out.height), (w, h));
            prop_assert_eq!(out.pixels.len(), (w * h * 4) as usize);
        }

        /// Property: Every output pixel is either the matching canvas pixel or blank.
        #[test]
        fn prop_pixels_follow_offset(
            (cw, ch) in (1u32..=20, 1u32..=20),
            (dx, dy) in (-25i64..=25, -25i64..=25),
            (w, h) in (1u32..=20, 1u32..=20),
        ) {
            let canvas = create_test_image(cw, ch);
            let out = place_region(&canvas, dx, dy, w, h);

            for j in 0..h {
                for i in 0..w {
                    let cx = i as i64 - dx;
                    let cy = j as i64 - dy;
                    let expected = if cx >= 0 && cy >= 0 && cx < cw as i64 && cy < ch as i64 {
                        canvas.pixel(cx as u32, cy as u32)
                    } else {
                        [0, 0, 0, 0]
                    };
                    prop_assert_eq!(out.pixel(i, j), expected);
                }
            }
        }
    }
}
