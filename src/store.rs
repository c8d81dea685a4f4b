//! Annotation store.
//!
//! Owns the ordered annotation list, the id counter, the spatial index and
//! the selection and hover ids. Later entries are drawn on top and win
//! hit tests. All outside references go through [`AnnotationId`], so a delete
//! can never leave a dangling handle behind.

use crate::constants::MIN_BOX_SIZE;
use crate::geometry::{ImagePoint, ImageRect, ImageSize};
use crate::spatial_index::{Layer, SpatialEntry, SpatialIndex};
use crate::types::{Annotation, AnnotationId, ClassId};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    next_id: AnnotationId,
    index: SpatialIndex,
    /// Layer handed to the next appended annotation
    next_layer: Layer,
    selected: Option<AnnotationId>,
    hovered: Option<AnnotationId>,
    /// Image extent used to clip incoming rectangles, if an image is loaded
    bounds: Option<ImageSize>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            next_id: 1,
            index: SpatialIndex::new(),
            next_layer: 0,
            selected: None,
            hovered: None,
            bounds: None,
        }
    }

    pub fn bounds(&self) -> Option<ImageSize> {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Option<ImageSize>) {
        self.bounds = bounds;
    }

    /// Normalize, clip to the image and apply the minimum-size floor.
    fn sanitize(&self, rect: ImageRect) -> Option<ImageRect> {
        let rect = rect.normalized();
        let rect = match self.bounds {
            Some(size) => rect.intersected(size.bounds()),
            None => rect,
        };
        rect.meets_min_size(MIN_BOX_SIZE).then_some(rect)
    }

    /// Append a new annotation and return its id.
    ///
    /// Returns `None` if the rectangle is below the minimum size once clipped.
    pub fn add(&mut self, rect: ImageRect, class_id: ClassId, class_name: &str) -> Option<AnnotationId> {
        let Some(rect) = self.sanitize(rect) else {
            debug!(?rect, "discarding undersized annotation");
            return None;
        };
        let id = self.next_id;
        self.next_id += 1;
        self.index.insert(id, rect, self.next_layer);
        self.next_layer += 1;
        self.annotations.push(Annotation::new(id, rect, class_id, class_name));
        debug!(id, ?rect, class_id, "annotation added");
        Some(id)
    }

    /// Remove an annotation. Absent ids are a no-op.
    ///
    /// Returns true if something was removed.
    pub fn delete(&mut self, id: AnnotationId) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        self.annotations.remove(pos);
        self.index.remove(id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        debug!(id, "annotation deleted");
        true
    }

    /// Empty the store and reset the id counter to 1.
    pub fn clear(&mut self) {
        self.annotations.clear();
        self.index.clear();
        self.next_layer = 0;
        self.next_id = 1;
        self.selected = None;
        self.hovered = None;
    }

    /// Replace all contents with `list`.
    ///
    /// With `preserve_ids` the incoming ids are kept and the counter continues
    /// after the largest one; duplicate or zero ids get fresh ids. Otherwise
    /// the entries are renumbered from 1. Entries failing the size floor are
    /// dropped. Returns how many annotations were restored.
    pub fn restore(&mut self, list: Vec<Annotation>, preserve_ids: bool) -> usize {
        self.clear();

        let mut seen = HashSet::new();
        let mut needs_id = Vec::new();
        for mut ann in list {
            let Some(rect) = self.sanitize(ann.rect) else {
                continue;
            };
            ann.rect = rect;
            if preserve_ids && ann.id != 0 && seen.insert(ann.id) {
                self.annotations.push(ann);
            } else {
                needs_id.push(self.annotations.len());
                self.annotations.push(ann);
            }
        }

        self.next_id = if preserve_ids {
            self.annotations
                .iter()
                .enumerate()
                .filter(|(i, _)| !needs_id.contains(i))
                .map(|(_, a)| a.id)
                .max()
                .map_or(1, |max| max + 1)
        } else {
            1
        };
        for i in needs_id {
            self.annotations[i].id = self.next_id;
            self.next_id += 1;
        }

        self.index.rebuild(
            self.annotations
                .iter()
                .zip(0..)
                .map(|(a, layer)| SpatialEntry::new(a.id, a.rect, layer)),
        );
        self.next_layer = self.annotations.len() as Layer;
        debug!(count = self.annotations.len(), next_id = self.next_id, preserve_ids, "annotations restored");
        self.annotations.len()
    }

    /// Replace the rectangle of an existing annotation.
    ///
    /// The caller is responsible for bounds and size clamping.
    pub fn update_rect(&mut self, id: AnnotationId, rect: ImageRect) -> bool {
        let Some(ann) = self.annotations.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        if ann.rect == rect {
            return false;
        }
        ann.rect = rect;
        self.index.update(id, rect);
        true
    }

    fn position(&self, id: AnnotationId) -> Option<usize> {
        self.annotations.iter().position(|a| a.id == id)
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        self.get(id).is_some()
    }

    /// Annotations in insertion order (bottom to top).
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Id the next added annotation will receive.
    pub fn next_id(&self) -> AnnotationId {
        self.next_id
    }

    /// Topmost annotation containing an image-space point.
    pub fn topmost_at(&self, p: ImagePoint) -> Option<AnnotationId> {
        self.index.topmost_at(p)
    }

    // ------------------------------------------------------------------
    // Selection & hover
    // ------------------------------------------------------------------

    pub fn selected(&self) -> Option<AnnotationId> {
        self.selected
    }

    pub fn selected_annotation(&self) -> Option<&Annotation> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Select an annotation. Unknown ids clear the selection.
    ///
    /// Returns true if the selection changed.
    pub fn set_selected(&mut self, id: Option<AnnotationId>) -> bool {
        let id = id.filter(|id| self.contains(*id));
        let changed = self.selected != id;
        self.selected = id;
        changed
    }

    pub fn hovered(&self) -> Option<AnnotationId> {
        self.hovered
    }

    /// Returns true if the hover id changed.
    pub fn set_hovered(&mut self, id: Option<AnnotationId>) -> bool {
        let id = id.filter(|id| self.contains(*id));
        let changed = self.hovered != id;
        self.hovered = id;
        changed
    }
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}
