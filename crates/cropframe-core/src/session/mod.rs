//! Headless state for an interactive crop session.
//!
//! A [`CropSession`] is an immutable snapshot of everything the UI renders:
//! the loaded image, the crop widget's position/zoom/rotation, the pixel
//! crop area it last reported, and the committed result. Every transition
//! borrows the current snapshot and returns a new one, so a failed
//! transition leaves the previous state untouched.
//!
//! ## Stages
//!
//! - **Empty**: no image; the file picker is shown
//! - **Editing**: an image is loaded and the crop widget is live
//! - **Cropped**: the extracted result is shown with save/crop-again actions

mod area;
mod config;

pub use area::default_crop_area;
pub use config::{SessionConfig, DEFAULT_ASPECT_RATIO, DEFAULT_DOWNLOAD_FILENAME};

use std::sync::Arc;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_image, validate_file_type, DecodeError, SourceImage};
use crate::encode::OutputFormat;
use crate::transform::{extract_with, CroppedImage, ExtractError};
use crate::CropRect;

/// Errors returned by session transitions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The transition needs a loaded image.
    #[error("No image loaded")]
    NoImage,

    /// The transition needs a committed crop.
    #[error("No cropped image available")]
    NotCropped,

    /// The selected file could not be decoded.
    #[error("Failed to load image: {0}")]
    Decode(#[from] DecodeError),

    /// The region extractor rejected the crop.
    #[error("Failed to crop image: {0}")]
    Extract(#[from] ExtractError),
}

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStage {
    Empty,
    Editing,
    Cropped,
}

/// Pan offset of the media inside the crop widget, in display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CropPosition {
    pub x: f64,
    pub y: f64,
}

/// A user action or widget callback, in message form.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A file was picked.
    LoadFile { mime: String, bytes: Vec<u8> },
    /// The widget's pan offset changed.
    SetCropPosition { x: f64, y: f64 },
    /// The zoom slider moved.
    SetZoom(f64),
    /// The rotation slider moved.
    SetRotation(i32),
    /// The widget finished a gesture and reports the pixel crop area.
    CropComplete(CropRect),
    /// "Crop Image".
    CommitCrop,
    /// "Crop Again".
    CropAgain,
    /// "Cancel" / "Select new image".
    StartOver,
}

/// Immutable snapshot of an interactive crop session.
#[derive(Debug, Clone)]
pub struct CropSession {
    config: Arc<SessionConfig>,
    image: Option<Arc<SourceImage>>,
    crop_position: CropPosition,
    zoom: f64,
    rotation: u16,
    crop_area: Option<CropRect>,
    cropped: Option<Arc<CroppedImage>>,
    image_error: Option<String>,
}

impl Default for CropSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl CropSession {
    /// Start an empty session. The config is sanitized first.
    pub fn new(mut config: SessionConfig) -> Self {
        for warning in config.sanitize() {
            warn!("session config: {}", warning);
        }
        Self::empty(Arc::new(config))
    }

    fn empty(config: Arc<SessionConfig>) -> Self {
        Self {
            zoom: config.zoom_min,
            config,
            image: None,
            crop_position: CropPosition::default(),
            rotation: 0,
            crop_area: None,
            cropped: None,
            image_error: None,
        }
    }

    // ---------------------------------------------------------------------
    // Getters
    // ---------------------------------------------------------------------

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn stage(&self) -> SessionStage {
        match (&self.image, &self.cropped) {
            (None, _) => SessionStage::Empty,
            (Some(_), None) => SessionStage::Editing,
            (Some(_), Some(_)) => SessionStage::Cropped,
        }
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_deref()
    }

    pub fn crop_position(&self) -> CropPosition {
        self.crop_position
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    pub fn crop_area(&self) -> Option<CropRect> {
        self.crop_area
    }

    pub fn cropped(&self) -> Option<&CroppedImage> {
        self.cropped.as_deref()
    }

    /// Inline message for a rejected file, if any.
    pub fn image_error(&self) -> Option<&str> {
        self.image_error.as_deref()
    }

    /// The crop area a commit would use right now.
    pub fn effective_crop_area(&self) -> Option<CropRect> {
        let image = self.image.as_deref()?;
        Some(self.crop_area.unwrap_or_else(|| {
            default_crop_area(
                image.width,
                image.height,
                self.config.aspect_ratio,
                self.zoom,
                self.rotation as f64,
            )
        }))
    }

    // ---------------------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------------------

    /// Dispatch an event to the matching transition.
    pub fn apply(&self, event: SessionEvent) -> Result<Self, SessionError> {
        match event {
            SessionEvent::LoadFile { mime, bytes } => self.load_file(&mime, &bytes),
            SessionEvent::SetCropPosition { x, y } => Ok(self.set_crop_position(x, y)),
            SessionEvent::SetZoom(zoom) => Ok(self.set_zoom(zoom)),
            SessionEvent::SetRotation(degrees) => Ok(self.set_rotation(degrees)),
            SessionEvent::CropComplete(rect) => Ok(self.crop_complete(rect)),
            SessionEvent::CommitCrop => self.commit_crop(),
            SessionEvent::CropAgain => Ok(self.crop_again()),
            SessionEvent::StartOver => Ok(self.start_over()),
        }
    }

    /// Accept a picked file.
    ///
    /// A non-image MIME type is not an error: the session keeps its state
    /// and records an inline message instead. Undecodable bytes are
    /// returned as `SessionError::Decode`.
    pub fn load_file(&self, mime: &str, bytes: &[u8]) -> Result<Self, SessionError> {
        if let Err(e) = validate_file_type(mime) {
            warn!("rejected file of type {:?}", mime);
            return Ok(Self {
                image_error: Some(e.to_string()),
                ..self.clone()
            });
        }

        let image = decode_image(bytes).map_err(|e| {
            error!("failed to decode {:?}: {}", mime, e);
            e
        })?;
        Ok(self.with_image(image))
    }

    /// Install an already decoded image.
    pub fn with_image(&self, image: SourceImage) -> Self {
        info!("loaded {}x{} image", image.width, image.height);
        Self {
            image: Some(Arc::new(image)),
            image_error: None,
            crop_area: None,
            cropped: None,
            ..self.clone()
        }
    }

    pub fn set_crop_position(&self, x: f64, y: f64) -> Self {
        if !(x.is_finite() && y.is_finite()) {
            return self.clone();
        }
        Self {
            crop_position: CropPosition { x, y },
            ..self.clone()
        }
    }

    /// Clamp to the configured range and snap to the slider step.
    /// Non-finite input leaves the zoom unchanged.
    pub fn set_zoom(&self, zoom: f64) -> Self {
        if !zoom.is_finite() {
            return self.clone();
        }
        let min = self.config.zoom_min;
        let max = self.config.zoom_max;
        let step = self.config.zoom_step;

        let steps = ((zoom.clamp(min, max) - min) / step).round();
        let snapped = (min + steps * step).clamp(min, max);
        // Drop binary noise from repeated step additions (1.2000000000000002).
        let snapped = (snapped * 1e9).round() / 1e9;

        Self {
            zoom: snapped,
            ..self.clone()
        }
    }

    /// Whole degrees, clamped to `[0, rotation_max]`.
    pub fn set_rotation(&self, degrees: i32) -> Self {
        let rotation = degrees.clamp(0, self.config.rotation_max as i32) as u16;
        Self {
            rotation,
            ..self.clone()
        }
    }

    pub fn crop_complete(&self, rect: CropRect) -> Self {
        Self {
            crop_area: Some(rect),
            ..self.clone()
        }
    }

    /// Run the region extractor once on the current area and rotation.
    ///
    /// On failure the error is logged and returned; `self` is unchanged.
    pub fn commit_crop(&self) -> Result<Self, SessionError> {
        let image = self.image.as_deref().ok_or(SessionError::NoImage)?;
        let rect = self.effective_crop_area().ok_or(SessionError::NoImage)?;

        let cropped = extract_with(image, rect, self.rotation as f64, &self.config.extract)
            .map_err(|e| {
                error!("Error creating cropped image: {}", e);
                e
            })?;

        info!(
            "cropped {}x{} at ({}, {}) with rotation {}°",
            cropped.width, cropped.height, rect.x, rect.y, self.rotation
        );
        Ok(Self {
            cropped: Some(Arc::new(cropped)),
            ..self.clone()
        })
    }

    /// Discard the result and return to editing.
    pub fn crop_again(&self) -> Self {
        Self {
            cropped: None,
            ..self.clone()
        }
    }

    /// Discard everything and return to the empty stage.
    pub fn start_over(&self) -> Self {
        info!("session reset");
        Self::empty(Arc::clone(&self.config))
    }

    /// File name and payload for the save action.
    pub fn download(&self) -> Result<(String, Vec<u8>), SessionError> {
        let cropped = self.cropped.as_deref().ok_or(SessionError::NotCropped)?;
        Ok((self.download_filename(), cropped.bytes.clone()))
    }

    /// Configured download name with its extension matched to the output
    /// format (the committed crop's, else the configured one).
    pub fn download_filename(&self) -> String {
        let format = self
            .cropped
            .as_deref()
            .map_or(self.config.extract.format, |cropped| cropped.format);
        with_extension(&self.config.download_filename, format)
    }
}

/// Replace or append the file extension for `format`. A name that already
/// carries a matching extension (including `.jpeg` for JPEG) is kept.
fn with_extension(name: &str, format: OutputFormat) -> String {
    let ext = format.extension();
    match name.rsplit_once('.') {
        Some((stem, current)) if !stem.is_empty() => {
            let matches = current.eq_ignore_ascii_case(ext)
                || (ext == "jpg" && current.eq_ignore_ascii_case("jpeg"));
            if matches {
                name.to_string()
            } else {
                format!("{}.{}", stem, ext)
            }
        }
        _ => format!("{}.{}", name, ext),
    }
}
