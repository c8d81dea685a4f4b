//! Annotation store tests.

use boxboard::store::AnnotationStore;
use boxboard::{Annotation, ImagePoint, ImageRect, ImageSize};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn store() -> AnnotationStore {
    let mut store = AnnotationStore::new();
    store.set_bounds(Some(ImageSize::new(800, 600)));
    store
}

#[test]
fn test_ids_unique_and_monotonic_under_random_ops() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut store = store();
    let mut max_issued = 0;

    for _ in 0..2000 {
        if rng.gen_bool(0.6) || store.is_empty() {
            let rect = ImageRect::new(
                rng.gen_range(-20..800),
                rng.gen_range(-20..600),
                rng.gen_range(-60..120),
                rng.gen_range(-60..120),
            );
            if let Some(id) = store.add(rect, 0, "object") {
                assert!(id > max_issued, "id {} not above {}", id, max_issued);
                max_issued = id;
            }
        } else {
            let victim = store.annotations()[rng.gen_range(0..store.len())].id;
            assert!(store.delete(victim));
        }

        let ids: HashSet<_> = store.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), store.len());
    }
}

#[test]
fn test_added_boxes_respect_floor_and_bounds() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut store = store();
    let bounds = ImageRect::new(0, 0, 800, 600);
    for _ in 0..1000 {
        let rect = ImageRect::new(
            rng.gen_range(-100..900),
            rng.gen_range(-100..700),
            rng.gen_range(-200..200),
            rng.gen_range(-200..200),
        );
        store.add(rect, 1, "car");
    }
    for ann in store.iter() {
        assert!(ann.rect.meets_min_size(10));
        assert!(bounds.contains_rect(&ann.rect));
    }
}

#[test]
fn test_delete_missing_id_is_noop() {
    let mut store = store();
    store.add(ImageRect::new(0, 0, 20, 20), 0, "a");
    assert!(!store.delete(42));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_delete_keeps_order_of_rest() {
    let mut store = store();
    for i in 0..4 {
        store.add(ImageRect::new(i * 30, 0, 20, 20), 0, "a");
    }
    store.delete(2);
    let ids: Vec<_> = store.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 3, 4]);
}

#[test]
fn test_unbounded_store_keeps_rect() {
    let mut store = AnnotationStore::new();
    let id = store.add(ImageRect::new(5000, 5000, 20, 20), 0, "a").unwrap();
    assert_eq!(store.get(id).unwrap().rect, ImageRect::new(5000, 5000, 20, 20));
}

#[test]
fn test_restore_clips_to_new_bounds() {
    let mut store = AnnotationStore::new();
    store.set_bounds(Some(ImageSize::new(100, 100)));
    let list = vec![
        Annotation::new(1, ImageRect::new(80, 80, 50, 50), 0, "a"),
        Annotation::new(2, ImageRect::new(95, 95, 50, 50), 0, "a"),
    ];
    assert_eq!(store.restore(list, true), 1);
    assert_eq!(store.get(1).unwrap().rect, ImageRect::new(80, 80, 20, 20));
    assert_eq!(store.next_id(), 2);
}

#[test]
fn test_restore_empty_list_resets_counter() {
    let mut store = store();
    store.add(ImageRect::new(0, 0, 20, 20), 0, "a");
    assert_eq!(store.restore(Vec::new(), true), 0);
    assert_eq!(store.next_id(), 1);
}

#[test]
fn test_restore_clears_selection() {
    let mut store = store();
    let id = store.add(ImageRect::new(0, 0, 20, 20), 0, "a").unwrap();
    store.set_selected(Some(id));
    store.restore(vec![Annotation::new(id, ImageRect::new(0, 0, 20, 20), 0, "a")], true);
    assert_eq!(store.selected(), None);
}

#[test]
fn test_topmost_after_restore_uses_index() {
    let mut store = store();
    store.restore(
        vec![
            Annotation::new(3, ImageRect::new(0, 0, 100, 100), 0, "a"),
            Annotation::new(8, ImageRect::new(10, 10, 30, 30), 0, "b"),
        ],
        true,
    );
    assert_eq!(store.topmost_at(ImagePoint::new(20, 20)), Some(8));
    assert_eq!(store.topmost_at(ImagePoint::new(90, 90)), Some(3));
}
