//! Integration tests for boxboard.
//!
//! These drive a loaded canvas through host events and check the
//! resulting annotations, selection, viewport and notifications.

mod drawing_tests;
mod image_lifecycle_tests;

use boxboard::{AnnotationCanvas, CanvasEvent};
use std::cell::RefCell;
use std::rc::Rc;

/// Record every event the canvas emits from now on.
pub fn record_events(canvas: &mut AnnotationCanvas) -> Rc<RefCell<Vec<CanvasEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    canvas.subscribe(move |event| sink.borrow_mut().push(*event));
    events
}
