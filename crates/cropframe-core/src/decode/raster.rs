//! Raster decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;
use log::debug;

use super::{DecodeError, Orientation, SourceImage};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is sniffed from the leading bytes, so the caller does not need
/// to know whether it holds a PNG, JPEG, GIF, WebP or BMP file. The result is
/// always RGBA8 so transparent sources keep their alpha through cropping.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if the data fails to decode.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    if orientation.swaps_dimensions() {
        debug!(
            "EXIF {:?} swaps {}x{} to {}x{}",
            orientation,
            img.width(),
            img.height(),
            img.height(),
            img.width()
        );
    }
    let oriented = apply_orientation(img, orientation);
    Ok(SourceImage::from_rgba_image(oriented.into_rgba8()))
}

/// Decode an image from bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let img = decode_dynamic(bytes)?;
    Ok(SourceImage::from_rgba_image(img.into_rgba8()))
}

/// Extract EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if image::guess_format(bytes).is_err() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }
    Ok(img)
}

/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
