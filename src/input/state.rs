//! Interaction state machine for pointer gestures on the canvas.
//!
//! A single enum holds whichever gesture is in progress, so a canvas can never
//! be drawing and editing at the same time.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Drawing     (left down on empty image area)
//! Idle -> Editing     (left down on a handle or body of the selected box)
//! Idle -> Panning     (middle down, or left down + pan modifier)
//!
//! Drawing -> Idle     (left up commits, right down or focus loss discards)
//! Editing -> Idle     (left up commits, right down or focus loss restores)
//! Panning -> Idle     (matching button up, or focus loss)
//! ```

use super::event::MouseButton;
use crate::edit::EditMode;
use crate::geometry::{DisplayPoint, ImagePoint, ImageRect};
use crate::types::AnnotationId;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress
    #[default]
    Idle,

    /// Dragging out a new rectangle
    Drawing {
        /// Press position in image space
        start: ImagePoint,
        /// Latest pointer position, clamped to the image
        end: ImagePoint,
    },

    /// Dragging the view
    Panning {
        /// Last pointer position for delta calculation
        last_point: DisplayPoint,
        /// Button whose release ends the pan
        button: MouseButton,
    },

    /// Moving or resizing the selected annotation
    Editing {
        id: AnnotationId,
        mode: EditMode,
        /// Press position in image space, not clamped to the image
        anchor: ImagePoint,
        /// Rectangle at press time, restored on abort
        original_rect: ImageRect,
    },
}

impl InteractionState {
    /// Returns true if the state is Idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn start_drawing(&mut self, start: ImagePoint) {
        *self = Self::Drawing { start, end: start };
    }

    pub fn start_panning(&mut self, last_point: DisplayPoint, button: MouseButton) {
        *self = Self::Panning { last_point, button };
    }

    pub fn start_editing(&mut self, id: AnnotationId, mode: EditMode, anchor: ImagePoint, original_rect: ImageRect) {
        *self = Self::Editing {
            id,
            mode,
            anchor,
            original_rect,
        };
    }

    /// Update the drawing end point
    pub fn set_drawing_end(&mut self, point: ImagePoint) {
        if let Self::Drawing { end, .. } = self {
            *end = point;
        }
    }

    /// Normalized rectangle of the draw gesture, if drawing
    pub fn draft_rect(&self) -> Option<ImageRect> {
        match self {
            Self::Drawing { start, end } => Some(ImageRect::from_corners(*start, *end)),
            _ => None,
        }
    }

    /// Annotation id being edited, if any
    pub fn editing_id(&self) -> Option<AnnotationId> {
        match self {
            Self::Editing { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn edit_mode(&self) -> Option<EditMode> {
        match self {
            Self::Editing { mode, .. } => Some(*mode),
            _ => None,
        }
    }

    /// Last pointer position (for panning)
    pub fn last_point(&self) -> Option<DisplayPoint> {
        match self {
            Self::Panning { last_point, .. } => Some(*last_point),
            _ => None,
        }
    }

    /// Update last pointer position (for panning)
    pub fn update_last_point(&mut self, point: DisplayPoint) {
        if let Self::Panning { last_point, .. } = self {
            *last_point = point;
        }
    }
}
