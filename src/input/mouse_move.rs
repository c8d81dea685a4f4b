//! Mouse move handling - draft, edit, pan and hover updates.

use super::event::MouseMoveEvent;
use super::state::InteractionState;
use crate::canvas::AnnotationCanvas;
use crate::edit::apply_edit;
use crate::geometry::DisplayPoint;
use crate::hit_testing::{cursor_for, hit_test};
use crate::profile_scope;

impl AnnotationCanvas {
    pub fn handle_mouse_move(&mut self, event: &MouseMoveEvent) {
        profile_scope!("handle_mouse_move");

        if self.image.is_none() {
            return;
        }
        let position = event.position;

        match self.state {
            InteractionState::Panning { last_point, .. } => {
                self.viewport.pan_by(position.x - last_point.x, position.y - last_point.y);
                self.state.update_last_point(position);
                self.request_repaint();
            }
            InteractionState::Editing {
                id,
                mode,
                anchor,
                original_rect,
            } => {
                // Unbounded so drags past the image edge still clamp instead of stalling
                let current = self.viewport.widget_to_image_unbounded(position);
                let bounds = self.viewport.image_size().bounds();
                let rect = apply_edit(
                    mode,
                    original_rect,
                    current.x.saturating_sub(anchor.x),
                    current.y.saturating_sub(anchor.y),
                    bounds,
                );
                if self.store.update_rect(id, rect) {
                    self.request_repaint();
                }
            }
            InteractionState::Drawing { end, .. } => {
                let point = self
                    .viewport
                    .widget_to_image_unbounded(position)
                    .clamp_to(self.viewport.image_size());
                if point != end {
                    self.state.set_drawing_end(point);
                    self.request_repaint();
                }
            }
            InteractionState::Idle => self.update_hover(position),
        }
    }

    fn update_hover(&mut self, position: DisplayPoint) {
        let hit = hit_test(position, &self.viewport, &self.store, self.config.handle_size);
        self.cursor = cursor_for(hit);
        if self.store.set_hovered(hit.annotation_id()) {
            self.request_repaint();
        }
    }
}
