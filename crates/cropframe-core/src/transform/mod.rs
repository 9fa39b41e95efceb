//! Region extraction: rotation baking, placement and cropping.
//!
//! # Pipeline
//!
//! 1. Size a square safe-area canvas that holds the source at any rotation
//! 2. Draw the source centred on it, rotated clockwise about its own centre
//! 3. Read the canvas back as plain pixels ("bake" the rotation)
//! 4. Place the baked canvas on a `rect.width × rect.height` surface so that
//!    `(rect.x, rect.y)` lands on the origin
//! 5. Encode the surface as PNG (or JPEG)
//!
//! Steps 2-4 can also be evaluated in a single pass; see [`ExtractStrategy`].
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise, any finite value
//! - Crop coordinates are integer source pixels relative to the unrotated
//!   image's top-left corner; they may be negative or out of bounds
//! - Origin is top-left corner, y grows downwards

mod crop;
mod extract;
mod geometry;
mod rotation;

pub use crop::place_region;
pub use extract::{
    extract, extract_region, extract_with, CroppedImage, ExtractError, ExtractOptions,
    ExtractStrategy, DEFAULT_MAX_OUTPUT_PIXELS,
};
pub use geometry::{compute_rotated_bounds, normalize_degrees, safe_area, CanvasLayout};
pub use rotation::{bake_rotation, InterpolationFilter, TRANSPARENT};
