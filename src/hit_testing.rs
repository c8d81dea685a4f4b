//! Hit testing for pointer positions.
//!
//! Resolution order for a display point:
//!
//! 1. The eight handles of the selected annotation (closed squares, display space)
//! 2. The body of the selected annotation, which starts a move
//! 3. Every annotation, topmost first, tested in image space
//!
//! Nothing here mutates state; the cursor is derived from the result.

use crate::edit::EditMode;
use crate::geometry::{DisplayPoint, DisplayRect};
use crate::store::AnnotationStore;
use crate::types::AnnotationId;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What lies under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A handle or the body of the selected annotation
    Edit { id: AnnotationId, mode: EditMode },
    /// An annotation that is not the one being edited
    Annotation(AnnotationId),
    /// Empty image area or outside the image
    Empty,
}

impl HitTarget {
    pub fn annotation_id(&self) -> Option<AnnotationId> {
        match self {
            HitTarget::Edit { id, .. } | HitTarget::Annotation(id) => Some(*id),
            HitTarget::Empty => None,
        }
    }
}

/// Handle squares of a display rectangle, in hit-test priority order.
pub fn handle_rects(rect: DisplayRect, size: f32) -> [(EditMode, DisplayRect); 8] {
    EditMode::HANDLES.map(|mode| {
        let (fx, fy) = mode.handle_anchor();
        let center = DisplayPoint::new(rect.x + rect.w * fx, rect.y + rect.h * fy);
        (mode, DisplayRect::centered_square(center, size))
    })
}

/// Which handle of `rect` contains `point`, if any.
pub fn handle_at(point: DisplayPoint, rect: DisplayRect, size: f32) -> Option<EditMode> {
    handle_rects(rect, size)
        .into_iter()
        .find(|(_, square)| square.contains_inclusive(point))
        .map(|(mode, _)| mode)
}

/// Classify a display point against the annotations in `store`.
pub fn hit_test(point: DisplayPoint, viewport: &Viewport, store: &AnnotationStore, handle_size: f32) -> HitTarget {
    if let Some(selected) = store.selected_annotation() {
        let rect = viewport.rect_to_widget(selected.rect);
        if let Some(mode) = handle_at(point, rect, handle_size) {
            trace!(id = selected.id, ?mode, "hit handle");
            return HitTarget::Edit { id: selected.id, mode };
        }
        if rect.contains(point) {
            return HitTarget::Edit {
                id: selected.id,
                mode: EditMode::Move,
            };
        }
    }

    let hit = viewport
        .widget_to_image(point)
        .and_then(|p| store.topmost_at(p))
        .map_or(HitTarget::Empty, HitTarget::Annotation);
    trace!(?hit, "hit test");
    hit
}

/// Pointer cursor shapes a host should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorShape {
    #[default]
    Default,
    Pointer,
    /// Diagonal from top-left to bottom-right
    ResizeNwse,
    /// Diagonal from top-right to bottom-left
    ResizeNesw,
    ResizeVertical,
    ResizeHorizontal,
    Move,
    Grabbing,
}

impl From<EditMode> for CursorShape {
    fn from(mode: EditMode) -> Self {
        match mode {
            EditMode::Move => CursorShape::Move,
            EditMode::ResizeTopLeft | EditMode::ResizeBottomRight => CursorShape::ResizeNwse,
            EditMode::ResizeTopRight | EditMode::ResizeBottomLeft => CursorShape::ResizeNesw,
            EditMode::ResizeTop | EditMode::ResizeBottom => CursorShape::ResizeVertical,
            EditMode::ResizeLeft | EditMode::ResizeRight => CursorShape::ResizeHorizontal,
        }
    }
}

/// Cursor for a hovered target.
pub fn cursor_for(target: HitTarget) -> CursorShape {
    match target {
        HitTarget::Edit { mode, .. } => mode.into(),
        HitTarget::Annotation(_) => CursorShape::Pointer,
        HitTarget::Empty => CursorShape::Default,
    }
}
