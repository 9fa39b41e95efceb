//! PNG encoding for export.
//!
//! PNG is the default payload format because it is lossless and keeps the
//! transparent pixels that surround a rotated crop.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

/// Errors that can occur while encoding an output payload.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Check an RGBA8 buffer against its declared dimensions.
pub(super) fn check_rgba(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Example
///
/// ```
/// use cropframe_core::encode::encode_png;
///
/// let pixels = vec![255u8; 10 * 10 * 4];
/// let png = encode_png(&pixels, 10, 10).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    check_rgba(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_basic() {
        let pixels = vec![128u8; 20 * 10 * 4];
        let png = encode_png(&pixels, 20, 10).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_preserves_pixels() {
        let mut pixels = vec![0u8; 3 * 2 * 4];
        pixels[0..4].copy_from_slice(&[255, 0, 0, 255]);
        pixels[20..24].copy_from_slice(&[0, 0, 255, 128]);

        let png = encode_png(&pixels, 3, 2).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().into_rgba8();

        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn test_encode_png_invalid_pixel_data() {
        let pixels = vec![0u8; 10 * 10 * 3];
        let result = encode_png(&pixels, 10, 10);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 400,
                actual: 300
            })
        ));
    }

    #[test]
    fn test_encode_png_zero_dimensions() {
        assert!(matches!(
            encode_png(&[], 0, 10),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_png(&[], 10, 0),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_png_single_pixel() {
        let png = encode_png(&[1, 2, 3, 4], 1, 1).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=40, 1u32..=40)
    }

    proptest! {
        /// Property: PNG encoding is lossless for arbitrary RGBA content.
        #[test]
        fn prop_png_is_lossless(
            (width, height) in dimensions_strategy(),
            seed in any::<u8>(),
        ) {
            let size = (width as usize) * (height as usize) * 4;
            let pixels: Vec<u8> = (0..size)
                .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
                .collect();

            let png = encode_png(&pixels, width, height).unwrap();
            let decoded = image::load_from_memory(&png).unwrap().into_rgba8();

            prop_assert_eq!(decoded.dimensions(), (width, height));
            prop_assert_eq!(decoded.into_raw(), pixels);
        }

        /// Property: Mismatched buffer lengths are always rejected.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            (width, height) in dimensions_strategy(),
            delta in 1usize..=7,
        ) {
            let expected = (width as usize) * (height as usize) * 4;
            let pixels = vec![0u8; expected + delta];
            let result = encode_png(&pixels, width, height);
            let rejected = matches!(result, Err(EncodeError::InvalidPixelData { .. }));
            prop_assert!(rejected, "expected InvalidPixelData, got {:?}", result);
        }
    }
}
