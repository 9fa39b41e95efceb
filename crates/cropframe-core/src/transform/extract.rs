//! Region extraction: rotate a source about its centre, then cut out a
//! rectangle given in source-pixel space.
//!
//! Two strategies produce bit-identical output:
//!
//! - **TwoPass** bakes the whole safe-area canvas, then places it on the
//!   output surface at the crop offset.
//! - **Direct** (default) composes both steps and samples only the canvas
//!   pixels that the output surface needs, skipping the oversized
//!   intermediate.
//!
//! Rectangles that overlap the rotated image only partially, or not at all,
//! are valid; uncovered output pixels are transparent.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::crop::place_region;
use super::geometry::CanvasLayout;
use super::rotation::{bake_layout, sample_canvas, InterpolationFilter};
use crate::decode::{DecodeError, SourceImage};
use crate::encode::{to_data_url, EncodeError, OutputFormat};
use crate::CropRect;

/// Default cap on output pixels (100 megapixels).
pub const DEFAULT_MAX_OUTPUT_PIXELS: u64 = 100_000_000;

/// Errors returned by region extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Width or height of the crop rectangle is not positive.
    #[error("Invalid crop region: width ({width}) and height ({height}) must be positive")]
    InvalidRegion { width: i64, height: i64 },

    /// The crop rectangle would allocate more pixels than allowed.
    #[error("Crop region {width}x{height} exceeds the {max_pixels} pixel limit")]
    RegionTooLarge {
        width: i64,
        height: i64,
        max_pixels: u64,
    },

    /// Rotation angle is NaN or infinite.
    #[error("Rotation angle must be finite, got {0}")]
    InvalidAngle(f64),

    /// The source raster is unusable.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The output payload could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl ExtractError {
    /// True for errors caused by the crop rectangle itself.
    pub fn is_invalid_region(&self) -> bool {
        matches!(
            self,
            ExtractError::InvalidRegion { .. } | ExtractError::RegionTooLarge { .. }
        )
    }
}

/// How the rotated canvas is turned into the output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractStrategy {
    /// Sample straight into the output buffer.
    #[default]
    Direct,
    /// Bake the full safe-area canvas, then slice it.
    TwoPass,
}

/// Tunables for region extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Interpolation used for rotated sampling.
    pub filter: InterpolationFilter,
    /// Direct or two-pass evaluation.
    pub strategy: ExtractStrategy,
    /// Encoded payload format.
    pub format: OutputFormat,
    /// Largest allowed `width * height` of the output.
    pub max_output_pixels: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            filter: InterpolationFilter::default(),
            strategy: ExtractStrategy::default(),
            format: OutputFormat::default(),
            max_output_pixels: DEFAULT_MAX_OUTPUT_PIXELS,
        }
    }
}

/// An extracted region encoded as a portable image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedImage {
    /// Output width; always the crop rectangle's width.
    pub width: u32,
    /// Output height; always the crop rectangle's height.
    pub height: u32,
    /// Payload format of `bytes`.
    pub format: OutputFormat,
    /// Encoded image file.
    pub bytes: Vec<u8>,
}

impl CroppedImage {
    /// MIME type of the payload.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// The payload as a base64 `data:` URL.
    pub fn to_data_url(&self) -> String {
        to_data_url(&self.bytes, self.mime_type())
    }
}

/// Extract and encode a region with default options (bilinear, PNG).
///
/// # Example
///
/// ```ignore
/// use cropframe_core::{transform::extract, CropRect};
///
/// let cropped = extract(&image, CropRect::new(10, 20, 400, 300), 15.0)?;
/// assert_eq!((cropped.width, cropped.height), (400, 300));
/// let url = cropped.to_data_url();
/// ```
pub fn extract(
    source: &SourceImage,
    rect: CropRect,
    rotation_degrees: f64,
) -> Result<CroppedImage, ExtractError> {
    extract_with(source, rect, rotation_degrees, &ExtractOptions::default())
}

/// Extract and encode a region with explicit options.
pub fn extract_with(
    source: &SourceImage,
    rect: CropRect,
    rotation_degrees: f64,
    options: &ExtractOptions,
) -> Result<CroppedImage, ExtractError> {
    let region = extract_region(source, rect, rotation_degrees, options)?;
    let bytes = options
        .format
        .encode(&region.pixels, region.width, region.height)?;

    Ok(CroppedImage {
        width: region.width,
        height: region.height,
        format: options.format,
        bytes,
    })
}

/// Extract a region as raw RGBA pixels.
///
/// The returned raster is exactly `rect.width × rect.height`. Pixel `(i, j)`
/// holds the rotated source at `(rect.x + i, rect.y + j)` measured from the
/// unrotated image's top-left corner, or transparent where the rotated
/// image does not reach.
pub fn extract_region(
    source: &SourceImage,
    rect: CropRect,
    rotation_degrees: f64,
    options: &ExtractOptions,
) -> Result<SourceImage, ExtractError> {
    let (width, height) = validate_rect(rect, options.max_output_pixels)?;
    if !rotation_degrees.is_finite() {
        return Err(ExtractError::InvalidAngle(rotation_degrees));
    }
    source.validate()?;

    let layout = CanvasLayout::new(source.width, source.height, rotation_degrees);
    let (dx, dy) = layout.placement_offset(rect.x, rect.y);

    debug!(
        "extract {}x{} at ({}, {}) from {}x{} rotated {}° (canvas {}, offset {}, {}, {:?})",
        width,
        height,
        rect.x,
        rect.y,
        source.width,
        source.height,
        layout.degrees,
        layout.side,
        dx,
        dy,
        options.strategy
    );

    let region = match options.strategy {
        ExtractStrategy::TwoPass => {
            let baked = bake_layout(source, &layout, options.filter);
            place_region(&baked, dx, dy, width, height)
        }
        ExtractStrategy::Direct => {
            sample_region(source, &layout, dx, dy, width, height, options.filter)
        }
    };

    Ok(region)
}

/// Check the rectangle and convert its size to output dimensions.
fn validate_rect(rect: CropRect, max_pixels: u64) -> Result<(u32, u32), ExtractError> {
    if rect.is_empty() {
        return Err(ExtractError::InvalidRegion {
            width: rect.width,
            height: rect.height,
        });
    }

    let too_large = ExtractError::RegionTooLarge {
        width: rect.width,
        height: rect.height,
        max_pixels,
    };
    let (Ok(width), Ok(height)) = (u32::try_from(rect.width), u32::try_from(rect.height)) else {
        return Err(too_large);
    };
    if width as u64 * height as u64 > max_pixels {
        return Err(too_large);
    }

    Ok((width, height))
}

/// Single-pass evaluation: output pixel `(i, j)` reads canvas pixel
/// `(i - dx, j - dy)` straight from the rotated source.
fn sample_region(
    source: &SourceImage,
    layout: &CanvasLayout,
    dx: i64,
    dy: i64,
    width: u32,
    height: u32,
    filter: InterpolationFilter,
) -> SourceImage {
    let mut output = vec![0u8; width as usize * height as usize * 4];

    for (j, row) in output.chunks_exact_mut(width as usize * 4).enumerate() {
        let v = (j as i64).saturating_sub(dy);
        for (i, px) in row.chunks_exact_mut(4).enumerate() {
            let u = (i as i64).saturating_sub(dx);
            px.copy_from_slice(&sample_canvas(source, layout, u, v, filter));
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
