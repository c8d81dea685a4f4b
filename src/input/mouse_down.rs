//! Mouse down handling - selection, edit/draw/pan initiation.

use super::event::{MouseButton, MouseDownEvent};
use crate::canvas::{AnnotationCanvas, CanvasEvent};
use crate::hit_testing::{CursorShape, HitTarget, hit_test};
use crate::profile_scope;
use tracing::trace;

impl AnnotationCanvas {
    pub fn handle_mouse_down(&mut self, event: &MouseDownEvent) {
        profile_scope!("handle_mouse_down");

        if self.image.is_none() {
            return;
        }
        let position = event.position;

        match event.button {
            MouseButton::Right => {
                self.abort_gesture(false);
                return;
            }
            MouseButton::Middle => {
                if self.state.is_idle() {
                    self.begin_pan(event);
                }
                return;
            }
            MouseButton::Left => {}
        }

        if !self.state.is_idle() {
            return;
        }
        if event.modifiers.has(self.config.pan_modifier) {
            self.begin_pan(event);
            return;
        }

        match hit_test(position, &self.viewport, &self.store, self.config.handle_size) {
            HitTarget::Edit { id, mode } => {
                let Some(original) = self.store.get(id).map(|a| a.rect) else {
                    return;
                };
                let anchor = self.viewport.widget_to_image_unbounded(position);
                self.state.start_editing(id, mode, anchor, original);
                self.cursor = mode.into();
                trace!(id, ?mode, "editing started");
            }
            HitTarget::Annotation(id) => {
                if self.store.set_selected(Some(id)) {
                    self.notify(CanvasEvent::SelectionChanged(Some(id)));
                }
            }
            HitTarget::Empty => {
                let Some(start) = self.viewport.widget_to_image(position) else {
                    return;
                };
                self.state.start_drawing(start);
                if self.store.set_selected(None) {
                    self.notify(CanvasEvent::SelectionChanged(None));
                }
                trace!(?start, "drawing started");
            }
        }
        self.request_repaint();
    }

    fn begin_pan(&mut self, event: &MouseDownEvent) {
        self.state.start_panning(event.position, event.button);
        self.cursor = CursorShape::Grabbing;
        trace!(button = ?event.button, "panning started");
    }
}
