//! Interactive bounding-box annotation canvas.
//!
//! `boxboard` is the UI-independent core of an image annotation widget. It
//! owns the zoom/pan viewport, the annotation list, hit testing with eight
//! resize handles, and the pointer state machine that draws, selects, moves
//! and resizes boxes. Hosts forward pointer events and paint the
//! [`DrawCommand`]s it produces.
//!
//! ```ignore
//! let mut canvas = AnnotationCanvas::default();
//! canvas.resize(DisplaySize::new(800.0, 600.0));
//! canvas.set_image(CanvasImage::from_bytes(&bytes)?, None)?;
//! canvas.handle_mouse_down(&MouseDownEvent::new(MouseButton::Left, DisplayPoint::new(10.0, 10.0)));
//! for command in canvas.render() { /* paint */ }
//! ```

pub mod canvas;
pub mod config;
pub mod constants;
pub mod edit;
pub mod error;
pub mod geometry;
pub mod hit_testing;
pub mod input;
pub mod perf;
pub mod render;
pub mod replay;
pub mod spatial_index;
pub mod store;
pub mod types;
pub mod viewport;

pub use canvas::{AnnotationCanvas, CanvasEvent, CanvasImage};
pub use config::{CanvasConfig, PanModifier, ZoomAnchor};
pub use edit::EditMode;
pub use error::{CanvasError, CanvasResult, ConfigError, ImageLoadError};
pub use geometry::{DisplayPoint, DisplayRect, DisplaySize, ImagePoint, ImageRect, ImageSize};
pub use hit_testing::{CursorShape, HitTarget};
pub use input::{
    InteractionState, Modifiers, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, ScrollWheelEvent,
};
pub use render::{DisplayFlags, DrawCommand, TextMetrics};
pub use replay::{ReplayEvent, ReplayOutcome, ReplayScript};
pub use types::{Annotation, AnnotationId, ClassId, ClassPalette, Color};
