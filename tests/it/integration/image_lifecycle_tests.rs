//! Image Lifecycle Integration Tests
//!
//! Loading images, restoring saved annotations and host-side mutations.

use super::record_events;
use crate::helpers::{TestCanvasBuilder, assert_annotation_count, drag, empty_canvas, move_to, press};
use boxboard::{
    Annotation, AnnotationCanvas, CanvasConfig, CanvasError, CanvasEvent, CanvasImage, DisplaySize, ImageLoadError,
    ImageRect,
};
use image::RgbaImage;

fn saved_annotations() -> Vec<Annotation> {
    vec![
        Annotation::new(4, ImageRect::new(10, 10, 50, 50), 1, "person"),
        Annotation::new(9, ImageRect::new(200, 200, 40, 40), 2, "car"),
    ]
}

#[test]
fn test_set_image_fits_and_emits() {
    let mut canvas = AnnotationCanvas::new(CanvasConfig::default());
    canvas.resize(DisplaySize::new(400.0, 300.0));
    let events = record_events(&mut canvas);

    canvas.set_image(RgbaImage::new(800, 600), None).unwrap();

    assert!(canvas.has_image());
    assert_eq!(canvas.scale(), 0.475);
    assert_eq!(*events.borrow(), vec![CanvasEvent::AnnotationsChanged]);
    assert_eq!(canvas.revision(), 1);
}

#[test]
fn test_set_image_restores_with_ids() {
    let mut canvas = empty_canvas();
    canvas
        .set_image(RgbaImage::new(800, 600), Some(saved_annotations()))
        .unwrap();

    let ids: Vec<_> = canvas.annotations().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![4, 9]);
    assert_eq!(canvas.next_id(), 10);

    canvas.actual_size();
    drag(&mut canvas, (400.0, 400.0), (450.0, 450.0));
    assert_eq!(canvas.annotations()[2].id, 10);
}

#[test]
fn test_set_image_resets_session() {
    let mut canvas = TestCanvasBuilder::new().with_box(100, 100, 100, 80).build();
    canvas.select(Some(1));
    press(&mut canvas, 400.0, 400.0);
    move_to(&mut canvas, 500.0, 500.0);
    assert!(canvas.interaction().is_drawing());

    canvas.set_image(RgbaImage::new(640, 480), None).unwrap();

    assert!(canvas.interaction().is_idle());
    assert_annotation_count(&canvas, 0);
    assert_eq!(canvas.selected_id(), None);
    assert_eq!(canvas.next_id(), 1);
    assert_eq!(canvas.viewport().image_size().width, 640);
}

#[test]
fn test_replacing_contents_clears_host_selection() {
    let replacements: [fn(&mut AnnotationCanvas); 3] = [
        |canvas| canvas.set_image(RgbaImage::new(640, 480), None).unwrap(),
        |canvas| canvas.clear_all(),
        |canvas| {
            canvas.restore_annotations(saved_annotations(), true);
        },
    ];
    for replace in replacements {
        let mut canvas = TestCanvasBuilder::new().with_box(100, 100, 100, 80).build();
        canvas.select(Some(1));
        let events = record_events(&mut canvas);

        replace(&mut canvas);

        assert_eq!(canvas.selected_id(), None);
        assert_eq!(
            *events.borrow(),
            vec![CanvasEvent::SelectionChanged(None), CanvasEvent::AnnotationsChanged]
        );
    }
}

#[test]
fn test_replacing_contents_without_selection_emits_once() {
    let mut canvas = TestCanvasBuilder::new().with_box(100, 100, 100, 80).build();
    let events = record_events(&mut canvas);

    canvas.set_image(RgbaImage::new(640, 480), Some(saved_annotations())).unwrap();

    assert_eq!(*events.borrow(), vec![CanvasEvent::AnnotationsChanged]);
}

#[test]
fn test_restored_boxes_are_clipped_to_new_image() {
    let mut canvas = empty_canvas();
    let list = vec![
        Annotation::new(1, ImageRect::new(280, 180, 100, 100), 0, "object"),
        Annotation::new(2, ImageRect::new(295, 10, 40, 40), 0, "object"),
    ];
    canvas.set_image(RgbaImage::new(300, 200), Some(list)).unwrap();

    assert_annotation_count(&canvas, 1);
    assert_eq!(canvas.annotations()[0].rect, ImageRect::new(280, 180, 20, 20));
}

#[test]
fn test_empty_image_is_rejected() {
    let mut canvas = TestCanvasBuilder::new().with_box(100, 100, 100, 80).build();
    let err = canvas.set_image(RgbaImage::new(0, 10), None).unwrap_err();

    assert!(matches!(
        err,
        CanvasError::ImageLoad(ImageLoadError::EmptyImage { width: 0, height: 10 })
    ));
    assert_annotation_count(&canvas, 1);
    assert_eq!(canvas.viewport().image_size().width, 800);
}

#[test]
fn test_undecodable_bytes() {
    let err = CanvasImage::from_bytes(b"not an image").unwrap_err();
    assert!(matches!(err, ImageLoadError::Decode(_)));
}

#[test]
fn test_input_without_image_is_ignored() {
    let mut canvas = AnnotationCanvas::default();
    canvas.resize(DisplaySize::new(800.0, 600.0));
    drag(&mut canvas, (100.0, 100.0), (200.0, 200.0));
    assert!(canvas.interaction().is_idle());
    assert_annotation_count(&canvas, 0);
    assert!(canvas.render().is_empty());
}

#[test]
fn test_add_annotation_is_clipped() {
    let mut canvas = empty_canvas();
    let events = record_events(&mut canvas);

    let id = canvas.add_annotation(ImageRect::new(750, 550, 100, 100), 3, "sign");
    assert_eq!(id, Some(1));
    assert_eq!(canvas.annotations()[0].rect, ImageRect::new(750, 550, 50, 50));

    assert_eq!(canvas.add_annotation(ImageRect::new(795, 0, 20, 20), 3, "sign"), None);
    assert_eq!(canvas.add_annotation(ImageRect::new(0, 0, -20, -20), 3, "sign"), None);
    // Added boxes are not selected
    assert_eq!(canvas.selected_id(), None);
    assert_eq!(*events.borrow(), vec![CanvasEvent::AnnotationsChanged]);
}

#[test]
fn test_add_annotation_normalizes() {
    let mut canvas = empty_canvas();
    canvas.add_annotation(ImageRect::new(200, 200, -50, -40), 0, "object");
    assert_eq!(canvas.annotations()[0].rect, ImageRect::new(150, 160, 50, 40));
}

#[test]
fn test_delete_selected_clears_selection() {
    let mut canvas = TestCanvasBuilder::new()
        .with_box(100, 100, 100, 80)
        .with_box(300, 300, 50, 50)
        .build();
    canvas.select(Some(2));
    let events = record_events(&mut canvas);

    assert!(canvas.delete_selected());
    assert_annotation_count(&canvas, 1);
    assert_eq!(canvas.selected_id(), None);
    assert_eq!(
        *events.borrow(),
        vec![CanvasEvent::SelectionChanged(None), CanvasEvent::AnnotationsChanged]
    );

    assert!(!canvas.delete_selected());
    assert!(!canvas.delete_by_id(42));
    assert_eq!(events.borrow().len(), 2);
}

#[test]
fn test_delete_does_not_reuse_ids() {
    let mut canvas = TestCanvasBuilder::new()
        .with_box(100, 100, 100, 80)
        .with_box(300, 300, 50, 50)
        .build();
    canvas.delete_by_id(2);
    drag(&mut canvas, (400.0, 400.0), (450.0, 450.0));
    assert_eq!(canvas.annotations()[1].id, 3);
}

#[test]
fn test_clear_all_restarts_ids() {
    let mut canvas = TestCanvasBuilder::new().with_box(100, 100, 100, 80).build();
    canvas.clear_all();
    assert_annotation_count(&canvas, 0);
    assert_eq!(canvas.next_id(), 1);
    drag(&mut canvas, (400.0, 400.0), (450.0, 450.0));
    assert_eq!(canvas.annotations()[0].id, 1);
}

#[test]
fn test_restore_without_preserving_ids() {
    let mut canvas = empty_canvas();
    let count = canvas.restore_annotations(saved_annotations(), false);
    assert_eq!(count, 2);
    let ids: Vec<_> = canvas.annotations().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(canvas.next_id(), 3);
}

#[test]
fn test_host_select_unknown_id_clears() {
    let mut canvas = TestCanvasBuilder::new().with_box(100, 100, 100, 80).build();
    canvas.select(Some(1));
    canvas.select(Some(99));
    assert_eq!(canvas.selected_id(), None);
}

#[test]
fn test_class_color_update_repaints() {
    let mut canvas = empty_canvas();
    canvas.update_class_color_map([(5, "#102030".parse().unwrap())]);
    assert!(canvas.take_repaint());
    assert_eq!(canvas.palette().color(5).to_hex(), "#102030");
}
