//! Mouse up handling - finalize drafts, edits and pans.

use super::event::{MouseButton, MouseUpEvent};
use super::state::InteractionState;
use crate::canvas::{AnnotationCanvas, CanvasEvent};
use crate::geometry::ImageRect;
use crate::hit_testing::CursorShape;
use crate::profile_scope;
use tracing::debug;

impl AnnotationCanvas {
    pub fn handle_mouse_up(&mut self, event: &MouseUpEvent) {
        profile_scope!("handle_mouse_up");

        match self.state {
            InteractionState::Panning { button, .. } if button == event.button => {
                self.state.reset();
                self.cursor = CursorShape::Default;
            }
            InteractionState::Editing { id, original_rect, .. } if event.button == MouseButton::Left => {
                self.state.reset();
                self.cursor = CursorShape::Default;
                let committed = self.store.get(id).map(|a| a.rect);
                if committed.is_some_and(|rect| rect != original_rect) {
                    debug!(id, rect = ?committed, "edit committed");
                    self.notify(CanvasEvent::AnnotationsChanged);
                }
                self.request_repaint();
            }
            InteractionState::Drawing { start, end } if event.button == MouseButton::Left => {
                self.state.reset();
                self.commit_draft(ImageRect::from_corners(start, end));
                self.request_repaint();
            }
            _ => {}
        }
    }

    fn commit_draft(&mut self, rect: ImageRect) {
        let class_id = self.active_class.class_id;
        let Some(id) = self.store.add(rect, class_id, &self.active_class.class_name) else {
            return;
        };
        self.store.set_selected(Some(id));
        self.notify(CanvasEvent::AnnotationsChanged);
        self.notify(CanvasEvent::SelectionChanged(Some(id)));
    }
}
