//! Spatial Index Module
//!
//! R-tree over annotation rectangles in image space. Each entry carries a
//! stacking layer, so a point query resolves the topmost annotation from the
//! tree candidates alone.

use crate::geometry::{ImagePoint, ImageRect};
use crate::types::AnnotationId;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// Stacking position; larger layers are drawn later and win hit tests.
pub type Layer = u64;

/// An annotation's bounding box as stored in the tree.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub id: AnnotationId,
    pub rect: ImageRect,
    pub layer: Layer,
}

impl SpatialEntry {
    pub fn new(id: AnnotationId, rect: ImageRect, layer: Layer) -> Self {
        Self { id, rect, layer }
    }

    #[inline]
    pub fn contains_point(&self, p: ImagePoint) -> bool {
        self.rect.contains(p)
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[i32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.rect.left(), self.rect.top()], [self.rect.right(), self.rect.bottom()])
    }
}

// Identity is the annotation id; the envelope locates the entry on removal.
impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    by_id: HashMap<AnnotationId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `id`.
    pub fn insert(&mut self, id: AnnotationId, rect: ImageRect, layer: Layer) {
        self.remove(id);
        let entry = SpatialEntry::new(id, rect, layer);
        self.tree.insert(entry);
        self.by_id.insert(id, entry);
    }

    pub fn remove(&mut self, id: AnnotationId) -> bool {
        match self.by_id.remove(&id) {
            Some(entry) => self.tree.remove(&entry).is_some(),
            None => false,
        }
    }

    /// Move an existing entry, keeping its layer. Unknown ids are ignored.
    pub fn update(&mut self, id: AnnotationId, rect: ImageRect) -> bool {
        let Some(layer) = self.by_id.get(&id).map(|e| e.layer) else {
            return false;
        };
        self.insert(id, rect, layer);
        true
    }

    /// Highest-layer annotation whose half-open rectangle contains `p`.
    pub fn topmost_at(&self, p: ImagePoint) -> Option<AnnotationId> {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([p.x, p.y]))
            .filter(|entry| entry.contains_point(p))
            .max_by_key(|entry| entry.layer)
            .map(|entry| entry.id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Replace the whole index in one bulk load.
    pub fn rebuild<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = SpatialEntry>,
    {
        let entries: Vec<SpatialEntry> = items.into_iter().collect();
        self.by_id = entries.iter().map(|e| (e.id, *e)).collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.by_id.clear();
    }
}
