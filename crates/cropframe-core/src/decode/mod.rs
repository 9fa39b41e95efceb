//! Image decoding pipeline for Cropframe.
//!
//! This module provides functionality for:
//! - Validating the declared content type of a user-selected file
//! - Decoding PNG, JPEG, GIF, WebP and BMP bytes into an RGBA `SourceImage`
//! - Applying EXIF orientation the same way browsers do when displaying
//!
//! # Architecture
//!
//! Decoding is delegated to the `image` crate. All operations are synchronous
//! and single-threaded; callers finish decoding before handing a
//! `SourceImage` to the region extractor.
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::decode::{decode_image, validate_file_type};
//!
//! validate_file_type("image/png")?;
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes)?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod mime;
mod raster;
mod types;

pub use mime::{is_image_mime, validate_file_type, FileTypeError};
pub use raster::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, Orientation, SourceImage};
