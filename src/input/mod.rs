//! Pointer and wheel input handling for the canvas.
//!
//! The host forwards raw events to the `handle_*` methods on
//! [`AnnotationCanvas`](crate::AnnotationCanvas). Each handler runs
//! synchronously and leaves the canvas in a consistent state.
//!
//! ## Modules
//!
//! - `state` - Interaction state machine enum and helper methods
//! - `event` - Host event types
//! - `mouse_down` - Press handling (selection, edit/draw/pan start)
//! - `mouse_move` - Motion handling (draw, edit, pan, hover)
//! - `mouse_up` - Release handling (commit drafts and edits)
//! - `transform` - Wheel zoom and focus loss

mod event;
mod mouse_down;
mod mouse_move;
mod mouse_up;
mod state;
mod transform;

pub use event::{Modifiers, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, ScrollWheelEvent};
pub use state::InteractionState;
