//! Image encoding pipeline for Cropframe.
//!
//! This module provides functionality for:
//! - Encoding RGBA crops to PNG (default, lossless, keeps transparency)
//! - Encoding RGBA crops to JPEG with configurable quality
//! - Wrapping encoded bytes in a `data:` URL for direct display or download
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::encode::{encode_png, to_data_url, OutputFormat};
//!
//! let pixels = vec![255u8; 100 * 100 * 4];
//! let png = encode_png(&pixels, 100, 100).unwrap();
//! let url = to_data_url(&png, OutputFormat::Png.mime_type());
//! ```

mod jpeg;
mod png;

pub use jpeg::encode_jpeg;
pub use png::{encode_png, EncodeError};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Payload format for exported crops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless PNG with alpha.
    #[default]
    Png,
    /// JPEG flattened over white.
    Jpeg { quality: u8 },
}

impl OutputFormat {
    /// MIME type of the encoded payload.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg { .. } => "image/jpeg",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg { .. } => "jpg",
        }
    }

    /// Encode RGBA pixels in this format.
    pub fn encode(self, pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
        match self {
            OutputFormat::Png => encode_png(pixels, width, height),
            OutputFormat::Jpeg { quality } => encode_jpeg(pixels, width, height, quality),
        }
    }
}

/// Build a base64 `data:` URL for an encoded payload.
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_prefix() {
        let url = to_data_url(b"abc", "image/png");
        assert_eq!(url, "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_output_format_mime() {
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
        assert_eq!(OutputFormat::Jpeg { quality: 90 }.mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::default(), OutputFormat::Png);
    }

    #[test]
    fn test_output_format_dispatch() {
        let pixels = vec![200u8; 4 * 4 * 4];
        let png = OutputFormat::Png.encode(&pixels, 4, 4).unwrap();
        let jpeg = OutputFormat::Jpeg { quality: 80 }.encode(&pixels, 4, 4).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_output_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Jpeg { quality: 85 }).unwrap();
        assert_eq!(json, r#"{"type":"jpeg","quality":85}"#);
        let back: OutputFormat = serde_json::from_str(r#"{"type":"png"}"#).unwrap();
        assert_eq!(back, OutputFormat::Png);
    }
}
