//! Drawing Integration Tests

use super::record_events;
use crate::helpers::{
    TestCanvasBuilder, assert_annotation_count, drag, empty_canvas, move_to, press, press_button, release,
};
use boxboard::{CanvasEvent, ImageRect, MouseButton};

#[test]
fn test_draw_commits_and_selects() {
    let mut canvas = empty_canvas();
    let events = record_events(&mut canvas);

    drag(&mut canvas, (100.0, 100.0), (200.0, 180.0));

    assert_annotation_count(&canvas, 1);
    let ann = &canvas.annotations()[0];
    assert_eq!(ann.id, 1);
    assert_eq!(ann.rect, ImageRect::new(100, 100, 100, 80));
    assert_eq!(ann.class_id, 0);
    assert_eq!(ann.class_name, "object");
    assert_eq!(canvas.selected_id(), Some(1));
    assert_eq!(canvas.next_id(), 2);
    assert_eq!(
        *events.borrow(),
        vec![CanvasEvent::AnnotationsChanged, CanvasEvent::SelectionChanged(Some(1))]
    );
}

#[test]
fn test_draw_in_any_direction() {
    let mut canvas = empty_canvas();
    drag(&mut canvas, (200.0, 180.0), (100.0, 100.0));
    assert_eq!(canvas.annotations()[0].rect, ImageRect::new(100, 100, 100, 80));
}

#[test]
fn test_tiny_draw_is_discarded() {
    let mut canvas = empty_canvas();
    let events = record_events(&mut canvas);

    drag(&mut canvas, (10.0, 10.0), (5.0, 5.0));

    assert_annotation_count(&canvas, 0);
    assert_eq!(canvas.next_id(), 1);
    assert!(events.borrow().is_empty());
    assert!(canvas.interaction().is_idle());
}

#[test]
fn test_draw_exactly_min_size() {
    let mut canvas = empty_canvas();
    drag(&mut canvas, (100.0, 100.0), (110.0, 110.0));
    assert_eq!(canvas.annotations()[0].rect, ImageRect::new(100, 100, 10, 10));

    drag(&mut canvas, (300.0, 300.0), (309.0, 340.0));
    assert_annotation_count(&canvas, 1);
}

#[test]
fn test_draw_past_edge_is_clamped() {
    let mut canvas = empty_canvas();
    drag(&mut canvas, (700.0, 500.0), (950.0, 720.0));
    assert_eq!(canvas.annotations()[0].rect, ImageRect::new(700, 500, 100, 100));

    drag(&mut canvas, (50.0, 50.0), (-40.0, -30.0));
    assert_eq!(canvas.annotations()[1].rect, ImageRect::new(0, 0, 50, 50));
}

#[test]
fn test_press_outside_image_does_not_draw() {
    // 800x600 image centered at 1:1 in a 1000x800 widget starts at (100, 100)
    let mut canvas = TestCanvasBuilder::new().with_widget_size(1000.0, 800.0).build();
    press(&mut canvas, 50.0, 50.0);
    assert!(canvas.interaction().is_idle());
    move_to(&mut canvas, 300.0, 300.0);
    release(&mut canvas, 300.0, 300.0);
    assert_annotation_count(&canvas, 0);

    drag(&mut canvas, (150.0, 150.0), (250.0, 250.0));
    assert_eq!(canvas.annotations()[0].rect, ImageRect::new(50, 50, 100, 100));
}

#[test]
fn test_active_class_applies_to_new_boxes_only() {
    let mut canvas = empty_canvas();
    drag(&mut canvas, (10.0, 10.0), (60.0, 60.0));
    canvas.set_active_class(2, "car");
    drag(&mut canvas, (100.0, 100.0), (160.0, 160.0));

    let anns = canvas.annotations();
    assert_eq!((anns[0].class_id, anns[0].class_name.as_str()), (0, "object"));
    assert_eq!((anns[1].class_id, anns[1].class_name.as_str()), (2, "car"));
}

#[test]
fn test_draw_on_empty_area_clears_selection() {
    let mut canvas = TestCanvasBuilder::new().with_box(100, 100, 100, 80).build();
    canvas.select(Some(1));
    let events = record_events(&mut canvas);

    press(&mut canvas, 400.0, 400.0);
    assert!(canvas.interaction().is_drawing());
    assert_eq!(canvas.selected_id(), None);
    assert_eq!(*events.borrow(), vec![CanvasEvent::SelectionChanged(None)]);
}

#[test]
fn test_draft_follows_pointer() {
    let mut canvas = empty_canvas();
    press(&mut canvas, 100.0, 100.0);
    move_to(&mut canvas, 150.0, 130.0);
    assert_eq!(canvas.interaction().draft_rect(), Some(ImageRect::new(100, 100, 50, 30)));
    move_to(&mut canvas, 80.0, 90.0);
    assert_eq!(canvas.interaction().draft_rect(), Some(ImageRect::new(80, 90, 20, 10)));
}

#[test]
fn test_right_press_cancels_draw() {
    let mut canvas = empty_canvas();
    press(&mut canvas, 100.0, 100.0);
    move_to(&mut canvas, 200.0, 200.0);
    press_button(&mut canvas, MouseButton::Right, 200.0, 200.0);
    assert!(canvas.interaction().is_idle());

    release(&mut canvas, 200.0, 200.0);
    assert_annotation_count(&canvas, 0);
}

#[test]
fn test_focus_loss_discards_draft() {
    let mut canvas = empty_canvas();
    let events = record_events(&mut canvas);

    press(&mut canvas, 100.0, 100.0);
    move_to(&mut canvas, 200.0, 200.0);
    assert!(canvas.interaction().draft_rect().is_some());

    canvas.handle_focus_lost();
    assert!(canvas.interaction().is_idle());
    assert_eq!(canvas.interaction().draft_rect(), None);

    release(&mut canvas, 200.0, 200.0);
    assert_annotation_count(&canvas, 0);
    assert_eq!(canvas.selected_id(), None);
    assert!(canvas.interaction().is_idle());
    assert!(events.borrow().is_empty());
}

#[test]
fn test_click_on_box_selects_without_drawing() {
    let mut canvas = TestCanvasBuilder::new()
        .with_box(100, 100, 100, 80)
        .with_box(150, 150, 100, 80)
        .build();
    let events = record_events(&mut canvas);

    press(&mut canvas, 170.0, 170.0);
    release(&mut canvas, 170.0, 170.0);

    // Overlap picks the later box
    assert_eq!(canvas.selected_id(), Some(2));
    assert_annotation_count(&canvas, 2);
    assert_eq!(*events.borrow(), vec![CanvasEvent::SelectionChanged(Some(2))]);
}
