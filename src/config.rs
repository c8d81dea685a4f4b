//! Canvas configuration.
//!
//! Every field has a default, so a host can supply a partial JSON document
//! and only override what it cares about.

use crate::constants::{FIT_MARGIN, HANDLE_SIZE, MAX_SCALE, MIN_SCALE, MIN_SCALE_RESOLUTION, ZOOM_STEP};
use crate::error::{ConfigError, ConfigResult};
use crate::types::{ClassId, Color};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How the pan offset is adjusted when zooming at a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomAnchor {
    /// Shift the pan by `(point - old_image_center) * (factor - 1)`.
    ///
    /// Matches the historical behavior; drifts slightly under repeated zooms.
    #[default]
    Approximate,
    /// Keep the image point under the pointer fixed on screen.
    Exact,
}

/// Modifier that turns a primary-button press into a pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanModifier {
    #[default]
    Control,
    Shift,
    Alt,
}

/// Tunable behavior of an [`AnnotationCanvas`](crate::AnnotationCanvas).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Zoom multiplier per wheel notch
    pub zoom_step: f32,
    /// Fraction of the widget used by fit-to-window
    pub fit_margin: f32,
    /// Resize handle side length in display pixels
    pub handle_size: f32,
    pub zoom_anchor: ZoomAnchor,
    pub pan_modifier: PanModifier,
    pub show_labels: bool,
    pub show_ids: bool,
    pub show_classes: bool,
    /// Class colors merged over the built-in palette
    pub class_colors: BTreeMap<ClassId, Color>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
            fit_margin: FIT_MARGIN,
            handle_size: HANDLE_SIZE,
            zoom_anchor: ZoomAnchor::default(),
            pan_modifier: PanModifier::default(),
            show_labels: true,
            show_ids: true,
            show_classes: true,
            class_colors: BTreeMap::new(),
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: CanvasConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all numeric fields are inside their usable ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(ConfigError::Invalid(format!(
                "scale range [{}, {}] must be positive and ordered",
                self.min_scale, self.max_scale
            )));
        }
        if self.min_scale < MIN_SCALE_RESOLUTION {
            return Err(ConfigError::Invalid(format!(
                "min_scale must be at least {MIN_SCALE_RESOLUTION}, got {}",
                self.min_scale
            )));
        }
        if !(self.zoom_step > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "zoom_step must be greater than 1, got {}",
                self.zoom_step
            )));
        }
        if !(self.fit_margin > 0.0 && self.fit_margin <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "fit_margin must be in (0, 1], got {}",
                self.fit_margin
            )));
        }
        if !(self.handle_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "handle_size must be positive, got {}",
                self.handle_size
            )));
        }
        Ok(())
    }
}
