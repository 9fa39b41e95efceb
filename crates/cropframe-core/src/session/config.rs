//! Session configuration and its validation/sanitization.

use serde::{Deserialize, Serialize};

use crate::transform::ExtractOptions;

/// Default crop aspect ratio (width / height).
pub const DEFAULT_ASPECT_RATIO: f64 = 4.0 / 3.0;
/// Default file name offered for the download action.
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "cropped-image.png";

/// Tunables for an interactive crop session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Crop aspect ratio, fixed for the session.
    pub aspect_ratio: f64,
    /// Smallest zoom factor.
    pub zoom_min: f64,
    /// Largest zoom factor.
    pub zoom_max: f64,
    /// Zoom slider granularity.
    pub zoom_step: f64,
    /// Largest rotation in whole degrees (the slider runs from 0).
    pub rotation_max: u16,
    /// Name offered when saving the cropped result.
    pub download_filename: String,
    /// Options passed to the region extractor on commit.
    pub extract: ExtractOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            zoom_min: 1.0,
            zoom_max: 3.0,
            zoom_step: 0.1,
            rotation_max: 360,
            download_filename: DEFAULT_DOWNLOAD_FILENAME.to_string(),
            extract: ExtractOptions::default(),
        }
    }
}

impl SessionConfig {
    /// Replace out-of-range values with defaults, returning a warning for
    /// each repaired field.
    pub fn sanitize(&mut self) -> Vec<String> {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            warnings.push(format!(
                "aspect_ratio {} is not positive; using {:.4}",
                self.aspect_ratio, defaults.aspect_ratio
            ));
            self.aspect_ratio = defaults.aspect_ratio;
        }

        let zoom_ok = self.zoom_min.is_finite()
            && self.zoom_max.is_finite()
            && self.zoom_min > 0.0
            && self.zoom_min <= self.zoom_max;
        if !zoom_ok {
            warnings.push(format!(
                "zoom range [{}, {}] is invalid; using [{}, {}]",
                self.zoom_min, self.zoom_max, defaults.zoom_min, defaults.zoom_max
            ));
            self.zoom_min = defaults.zoom_min;
            self.zoom_max = defaults.zoom_max;
        }

        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            warnings.push(format!(
                "zoom_step {} is not positive; using {}",
                self.zoom_step, defaults.zoom_step
            ));
            self.zoom_step = defaults.zoom_step;
        }

        if self.download_filename.trim().is_empty() {
            warnings.push("download_filename is empty; using default".to_string());
            self.download_filename = defaults.download_filename;
        }

        if self.extract.max_output_pixels == 0 {
            warnings.push("extract.max_output_pixels is 0; using default".to_string());
            self.extract.max_output_pixels = defaults.extract.max_output_pixels;
        }

        warnings
    }

    /// Sanitized copy of `self`.
    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }
}
