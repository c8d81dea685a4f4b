//! Viewport transform between image space and display space.
//!
//! The image is centered in the widget and then shifted by the pan offset:
//!
//! ```text
//! origin = (widget_size - image_size * scale) / 2 + pan
//! display = image * scale + origin
//! ```
//!
//! Because the image center does not depend on `scale`, zooming without a pan
//! adjustment always pivots around the image center.

use crate::config::{CanvasConfig, ZoomAnchor};
use crate::constants::{DEFAULT_SCALE, SCALE_STEPS_PER_UNIT};
use crate::geometry::{DisplayPoint, DisplayRect, DisplaySize, ImagePoint, ImageRect, ImageSize};
use tracing::trace;

/// Snap a scale onto the fixed grid so inverse zoom steps cancel exactly.
#[inline]
fn quantize(scale: f32) -> f32 {
    (scale * SCALE_STEPS_PER_UNIT).round() / SCALE_STEPS_PER_UNIT
}

/// Zoom and pan state of one canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f32,
    pan: DisplayPoint,
    image_size: ImageSize,
    widget_size: DisplaySize,
    min_scale: f32,
    max_scale: f32,
    fit_margin: f32,
    anchor: ZoomAnchor,
}

impl Viewport {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            scale: DEFAULT_SCALE,
            pan: DisplayPoint::default(),
            image_size: ImageSize::default(),
            widget_size: DisplaySize::default(),
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            fit_margin: config.fit_margin,
            anchor: config.zoom_anchor,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Scale as a whole percentage for status display.
    pub fn scale_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    pub fn pan(&self) -> DisplayPoint {
        self.pan
    }

    pub fn image_size(&self) -> ImageSize {
        self.image_size
    }

    pub fn widget_size(&self) -> DisplaySize {
        self.widget_size
    }

    pub fn zoom_anchor(&self) -> ZoomAnchor {
        self.anchor
    }

    pub fn set_image_size(&mut self, size: ImageSize) {
        self.image_size = size;
    }

    /// Update the widget extent. Scale and pan are kept, so the image stays centered.
    pub fn resize(&mut self, size: DisplaySize) {
        self.widget_size = size;
    }

    /// Snap onto the grid, then clamp, so the result never leaves the range
    /// even when the bounds themselves are off the grid.
    fn clamp_scale(&self, scale: f32) -> f32 {
        quantize(scale).max(self.min_scale).min(self.max_scale)
    }

    /// Top-left corner of the image in display space.
    pub fn origin(&self) -> DisplayPoint {
        let w = self.image_size.width as f32 * self.scale;
        let h = self.image_size.height as f32 * self.scale;
        DisplayPoint::new(
            (self.widget_size.width - w) / 2.0 + self.pan.x,
            (self.widget_size.height - h) / 2.0 + self.pan.y,
        )
    }

    /// Display-space rectangle currently covered by the image.
    pub fn image_display_rect(&self) -> DisplayRect {
        let origin = self.origin();
        DisplayRect::new(
            origin.x,
            origin.y,
            self.image_size.width as f32 * self.scale,
            self.image_size.height as f32 * self.scale,
        )
    }

    /// Map a widget point into image pixels.
    ///
    /// Returns `None` when the point is outside the rendered image.
    pub fn widget_to_image(&self, p: DisplayPoint) -> Option<ImagePoint> {
        if self.image_size.is_empty() || !self.image_display_rect().contains(p) {
            return None;
        }
        let ip = self.widget_to_image_unbounded(p);
        // Float error at the far edge can land one past the last pixel
        Some(ImagePoint::new(
            ip.x.min(self.image_size.width as i32 - 1),
            ip.y.min(self.image_size.height as i32 - 1),
        ))
    }

    /// Map a widget point into image pixels without the in-image check.
    pub fn widget_to_image_unbounded(&self, p: DisplayPoint) -> ImagePoint {
        let origin = self.origin();
        ImagePoint::new(
            ((p.x - origin.x) / self.scale).floor() as i32,
            ((p.y - origin.y) / self.scale).floor() as i32,
        )
    }

    pub fn image_to_widget(&self, p: ImagePoint) -> DisplayPoint {
        let origin = self.origin();
        DisplayPoint::new(
            p.x as f32 * self.scale + origin.x,
            p.y as f32 * self.scale + origin.y,
        )
    }

    pub fn rect_to_widget(&self, r: ImageRect) -> DisplayRect {
        let tl = self.image_to_widget(ImagePoint::new(r.x, r.y));
        DisplayRect::new(tl.x, tl.y, r.w as f32 * self.scale, r.h as f32 * self.scale)
    }

    /// Scale the image to fill the widget minus the margin and center it.
    ///
    /// Falls back to scale 1.0 when the widget or the image has no extent.
    pub fn fit_to_window(&mut self) {
        self.pan = DisplayPoint::default();
        if self.widget_size.is_empty() || self.image_size.is_empty() {
            self.scale = DEFAULT_SCALE;
            return;
        }
        let sx = self.widget_size.width / self.image_size.width as f32;
        let sy = self.widget_size.height / self.image_size.height as f32;
        self.scale = self.clamp_scale(sx.min(sy) * self.fit_margin);
        trace!(scale = self.scale, "fit to window");
    }

    /// Show the image at 1:1 and recenter it.
    pub fn actual_size(&mut self) {
        self.scale = self.clamp_scale(DEFAULT_SCALE);
        self.pan = DisplayPoint::default();
    }

    /// Set an explicit scale, pivoting around the image center.
    ///
    /// Returns true if the scale changed.
    pub fn set_scale(&mut self, scale: f32) -> bool {
        let new_scale = self.clamp_scale(scale);
        let changed = new_scale != self.scale;
        self.scale = new_scale;
        changed
    }

    /// Multiply the scale by `factor`, keeping `point` roughly in place.
    ///
    /// Returns true if the scale changed. The pan is left alone when the
    /// clamped scale did not move.
    pub fn zoom_at(&mut self, point: DisplayPoint, factor: f32) -> bool {
        let old_scale = self.scale;
        let mut target = quantize(old_scale * factor);
        if target == quantize(old_scale) && factor != 1.0 {
            // Tiny scales round back onto themselves; step one grid unit instead
            let step = 1.0 / SCALE_STEPS_PER_UNIT;
            target += if factor > 1.0 { step } else { -step };
        }
        let new_scale = self.clamp_scale(target);
        if new_scale == old_scale {
            return false;
        }

        match self.anchor {
            ZoomAnchor::Approximate => {
                let old_center = self.image_display_rect().center();
                let effective = new_scale / old_scale - 1.0;
                self.scale = new_scale;
                self.pan.x -= ((point.x - old_center.x) * effective).trunc();
                self.pan.y -= ((point.y - old_center.y) * effective).trunc();
            }
            ZoomAnchor::Exact => {
                let origin = self.origin();
                let ix = (point.x - origin.x) / old_scale;
                let iy = (point.y - origin.y) / old_scale;
                self.scale = new_scale;
                let base_x = (self.widget_size.width - self.image_size.width as f32 * new_scale) / 2.0;
                let base_y = (self.widget_size.height - self.image_size.height as f32 * new_scale) / 2.0;
                self.pan = DisplayPoint::new(point.x - ix * new_scale - base_x, point.y - iy * new_scale - base_y);
            }
        }
        trace!(old_scale, new_scale, pan_x = self.pan.x, pan_y = self.pan.y, "zoom");
        true
    }

    /// Translate the pan offset by a display-space delta.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan = self.pan.offset(dx, dy);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}
