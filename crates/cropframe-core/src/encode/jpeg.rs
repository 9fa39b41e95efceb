//! JPEG encoding for export.
//!
//! JPEG has no alpha channel, so RGBA input is composited over a white
//! background before encoding. Quality is clamped to 1-100.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::png::check_rgba;
use super::EncodeError;

/// Background used where the crop has transparent pixels.
const MATTE: [u8; 3] = [255, 255, 255];

/// Encode RGBA pixel data to JPEG bytes.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_rgba(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let rgb = flatten(pixels);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Composite RGBA over the matte color, dropping alpha.
fn flatten(pixels: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
    for px in pixels.chunks_exact(4) {
        let a = px[3] as u32;
        for c in 0..3 {
            let v = (px[c] as u32 * a + MATTE[c] as u32 * (255 - a) + 127) / 255;
            rgb.push(v as u8);
        }
    }
    rgb
}
