//! Canvas transformations - wheel zoom and focus handling.

use super::event::ScrollWheelEvent;
use crate::canvas::AnnotationCanvas;

impl AnnotationCanvas {
    /// Zoom one step per wheel event around the pointer.
    ///
    /// Ignored while a gesture is in progress.
    pub fn handle_scroll(&mut self, event: &ScrollWheelEvent) {
        if self.image.is_none() || !self.state.is_idle() || event.delta_y == 0.0 {
            return;
        }

        let factor = if event.delta_y > 0.0 {
            self.config.zoom_step
        } else {
            1.0 / self.config.zoom_step
        };
        if self.viewport.zoom_at(event.position, factor) {
            self.request_repaint();
        }
    }

    /// The widget lost pointer or keyboard focus; treat it as a cancel.
    pub fn handle_focus_lost(&mut self) {
        self.abort_gesture(true);
        if self.store.set_hovered(None) {
            self.request_repaint();
        }
    }
}
