//! Move and resize geometry for a selected annotation.
//!
//! Every edit is recomputed from the rectangle captured at press time plus the
//! total pointer delta, so intermediate clamping never accumulates.

use crate::constants::MIN_BOX_SIZE;
use crate::geometry::ImageRect;
use serde::{Deserialize, Serialize};

/// What a drag on the selected annotation changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    Move,
    ResizeTopLeft,
    ResizeTopRight,
    ResizeBottomLeft,
    ResizeBottomRight,
    ResizeTop,
    ResizeBottom,
    ResizeLeft,
    ResizeRight,
}

/// Which edges of a rectangle follow the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edges {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl Edges {
    const fn new(left: bool, top: bool, right: bool, bottom: bool) -> Self {
        Self { left, top, right, bottom }
    }
}

impl EditMode {
    /// The eight resize modes in handle hit-test priority order.
    pub const HANDLES: [EditMode; 8] = [
        EditMode::ResizeTopLeft,
        EditMode::ResizeTopRight,
        EditMode::ResizeBottomLeft,
        EditMode::ResizeBottomRight,
        EditMode::ResizeTop,
        EditMode::ResizeBottom,
        EditMode::ResizeLeft,
        EditMode::ResizeRight,
    ];

    pub const fn edges(self) -> Edges {
        match self {
            EditMode::Move => Edges::new(true, true, true, true),
            EditMode::ResizeTopLeft => Edges::new(true, true, false, false),
            EditMode::ResizeTopRight => Edges::new(false, true, true, false),
            EditMode::ResizeBottomLeft => Edges::new(true, false, false, true),
            EditMode::ResizeBottomRight => Edges::new(false, false, true, true),
            EditMode::ResizeTop => Edges::new(false, true, false, false),
            EditMode::ResizeBottom => Edges::new(false, false, false, true),
            EditMode::ResizeLeft => Edges::new(true, false, false, false),
            EditMode::ResizeRight => Edges::new(false, false, true, false),
        }
    }

    pub fn is_resize(self) -> bool {
        self != EditMode::Move
    }

    /// Handle anchor as fractions of the rectangle's width and height.
    pub const fn handle_anchor(self) -> (f32, f32) {
        match self {
            EditMode::Move => (0.5, 0.5),
            EditMode::ResizeTopLeft => (0.0, 0.0),
            EditMode::ResizeTopRight => (1.0, 0.0),
            EditMode::ResizeBottomLeft => (0.0, 1.0),
            EditMode::ResizeBottomRight => (1.0, 1.0),
            EditMode::ResizeTop => (0.5, 0.0),
            EditMode::ResizeBottom => (0.5, 1.0),
            EditMode::ResizeLeft => (0.0, 0.5),
            EditMode::ResizeRight => (1.0, 0.5),
        }
    }
}

/// Compute the rectangle produced by dragging `original` by `(dx, dy)`.
///
/// Moves keep their size and are shifted back inside `bounds`. Resizes
/// first hold the minimum size against the dragged side, then are clipped
/// to `bounds` and normalized.
pub fn apply_edit(mode: EditMode, original: ImageRect, dx: i32, dy: i32, bounds: ImageRect) -> ImageRect {
    if mode == EditMode::Move {
        return original.translated(dx, dy).shifted_inside(bounds);
    }

    let edges = mode.edges();
    let mut left = original.left();
    let mut top = original.top();
    let mut right = original.right();
    let mut bottom = original.bottom();

    if edges.left {
        left = left.saturating_add(dx);
    }
    if edges.right {
        right = right.saturating_add(dx);
    }
    if edges.top {
        top = top.saturating_add(dy);
    }
    if edges.bottom {
        bottom = bottom.saturating_add(dy);
    }

    if right.saturating_sub(left) < MIN_BOX_SIZE {
        if edges.left {
            left = right.saturating_sub(MIN_BOX_SIZE);
        } else {
            right = left.saturating_add(MIN_BOX_SIZE);
        }
    }
    if bottom.saturating_sub(top) < MIN_BOX_SIZE {
        if edges.top {
            top = bottom.saturating_sub(MIN_BOX_SIZE);
        } else {
            bottom = top.saturating_add(MIN_BOX_SIZE);
        }
    }

    // Clipping edge by edge keeps far-off drags from saturating the extent
    let clip_x = |v: i32| v.clamp(bounds.left(), bounds.right());
    let clip_y = |v: i32| v.clamp(bounds.top(), bounds.bottom());
    ImageRect::from_edges(clip_x(left), clip_y(top), clip_x(right), clip_y(bottom)).normalized()
}
