//! The annotation canvas: host-facing API tying the components together.
//!
//! A host owns one [`AnnotationCanvas`] per widget. It forwards pointer and
//! wheel events (see the `input` module), calls [`AnnotationCanvas::render`]
//! when [`AnnotationCanvas::take_repaint`] reports a change, and listens for
//! [`CanvasEvent`]s to refresh its annotation list.

use crate::config::CanvasConfig;
use crate::error::{CanvasResult, ImageLoadError};
use crate::geometry::{DisplayPoint, DisplaySize, ImageRect, ImageSize};
use crate::hit_testing::{CursorShape, HitTarget, hit_test};
use crate::input::InteractionState;
use crate::render::{ApproxTextMetrics, DisplayFlags, Draft, DrawCommand, Scene, TextMetrics, render_scene};
use crate::store::AnnotationStore;
use crate::types::{ActiveClass, Annotation, AnnotationId, ClassId, ClassPalette, Color};
use crate::viewport::Viewport;
use image::{DynamicImage, RgbaImage};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Decoded raster shown underneath the annotations.
///
/// Cheap to clone; pixels are shared.
#[derive(Debug, Clone)]
pub struct CanvasImage {
    pixels: Arc<RgbaImage>,
}

impl CanvasImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    /// Decode an encoded image (PNG, JPEG, ...) from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageLoadError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from(decoded))
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.pixels.width(), self.pixels.height())
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl From<RgbaImage> for CanvasImage {
    fn from(pixels: RgbaImage) -> Self {
        Self::new(pixels)
    }
}

impl From<DynamicImage> for CanvasImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image.into_rgba8())
    }
}

/// Notifications emitted to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    /// Annotations were added, edited, deleted or replaced.
    /// Consumers re-read them via [`AnnotationCanvas::annotations`].
    AnnotationsChanged,
    /// The selected annotation changed
    SelectionChanged(Option<AnnotationId>),
}

type Listener = Box<dyn FnMut(&CanvasEvent)>;

pub struct AnnotationCanvas {
    pub(crate) config: CanvasConfig,
    pub(crate) viewport: Viewport,
    pub(crate) store: AnnotationStore,
    pub(crate) state: InteractionState,
    pub(crate) active_class: ActiveClass,
    pub(crate) palette: ClassPalette,
    pub(crate) flags: DisplayFlags,
    pub(crate) image: Option<CanvasImage>,
    pub(crate) cursor: CursorShape,
    listeners: Vec<Listener>,
    revision: u64,
    needs_repaint: bool,
}

impl fmt::Debug for AnnotationCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationCanvas")
            .field("image", &self.image.as_ref().map(CanvasImage::size))
            .field("viewport", &self.viewport)
            .field("annotations", &self.store.len())
            .field("state", &self.state)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl AnnotationCanvas {
    pub fn new(config: CanvasConfig) -> Self {
        let mut palette = ClassPalette::new();
        palette.merge(config.class_colors.iter().map(|(id, color)| (*id, *color)));
        Self {
            viewport: Viewport::new(&config),
            flags: DisplayFlags::from(&config),
            store: AnnotationStore::new(),
            state: InteractionState::Idle,
            active_class: ActiveClass::default(),
            palette,
            image: None,
            cursor: CursorShape::Default,
            listeners: Vec::new(),
            revision: 0,
            needs_repaint: true,
            config,
        }
    }

    /// Build a canvas from a JSON configuration document.
    pub fn from_config_json(json: &str) -> CanvasResult<Self> {
        let config = CanvasConfig::from_json_str(json).inspect_err(|e| warn!("rejected canvas config: {e}"))?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Image lifecycle
    // ------------------------------------------------------------------

    /// Load a new image, resetting the viewport, annotations and selection.
    ///
    /// `restored` annotations keep their ids and the id counter continues
    /// after the largest one. On error the canvas is left untouched.
    pub fn set_image(&mut self, image: impl Into<CanvasImage>, restored: Option<Vec<Annotation>>) -> CanvasResult<()> {
        let image = image.into();
        let size = image.size();
        if size.is_empty() {
            warn!(width = size.width, height = size.height, "rejecting empty image");
            return Err(ImageLoadError::EmptyImage {
                width: size.width,
                height: size.height,
            }
            .into());
        }

        let had_selection = self.store.selected().is_some();
        self.state.reset();
        self.image = Some(image);
        self.viewport.set_image_size(size);
        self.viewport.fit_to_window();
        self.store.set_bounds(Some(size));
        match restored {
            Some(list) => {
                self.store.restore(list, true);
            }
            None => self.store.clear(),
        }
        self.cursor = CursorShape::Default;
        info!(
            width = size.width,
            height = size.height,
            annotations = self.store.len(),
            scale = self.viewport.scale(),
            "image loaded"
        );
        self.notify_reset(had_selection);
        Ok(())
    }

    pub fn image(&self) -> Option<&CanvasImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    // ------------------------------------------------------------------
    // Annotations
    // ------------------------------------------------------------------

    /// Annotations in stacking order (bottom first).
    pub fn annotations(&self) -> &[Annotation] {
        self.store.annotations()
    }

    /// Owned copy of the annotations for hosts that keep their own list.
    pub fn get_annotations(&self) -> Vec<Annotation> {
        self.store.annotations().to_vec()
    }

    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.store.get(id)
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Add an annotation the same way a draw gesture would, without selecting it.
    ///
    /// Rectangles are normalized and clipped to the image; anything below the
    /// minimum size is discarded and `None` is returned.
    pub fn add_annotation(&mut self, rect: ImageRect, class_id: ClassId, class_name: &str) -> Option<AnnotationId> {
        let id = self.store.add(rect, class_id, class_name)?;
        self.notify(CanvasEvent::AnnotationsChanged);
        Some(id)
    }

    /// Replace all annotations. See [`AnnotationStore::restore`].
    pub fn restore_annotations(&mut self, list: Vec<Annotation>, preserve_ids: bool) -> usize {
        self.abort_gesture(true);
        let had_selection = self.store.selected().is_some();
        let count = self.store.restore(list, preserve_ids);
        self.notify_reset(had_selection);
        count
    }

    /// Delete one annotation. Unknown ids are ignored and emit nothing.
    pub fn delete_by_id(&mut self, id: AnnotationId) -> bool {
        if self.state.editing_id() == Some(id) {
            self.state.reset();
        }
        let had_selection = self.store.selected() == Some(id);
        if !self.store.delete(id) {
            return false;
        }
        if had_selection {
            self.notify(CanvasEvent::SelectionChanged(None));
        }
        self.notify(CanvasEvent::AnnotationsChanged);
        true
    }

    /// Delete the selected annotation, if any.
    pub fn delete_selected(&mut self) -> bool {
        match self.store.selected() {
            Some(id) => self.delete_by_id(id),
            None => false,
        }
    }

    /// Remove every annotation and restart ids at 1.
    pub fn clear_all(&mut self) {
        self.abort_gesture(true);
        let had_selection = self.store.selected().is_some();
        self.store.clear();
        debug!("annotations cleared");
        self.notify_reset(had_selection);
    }

    /// Id the next committed annotation will get.
    pub fn next_id(&self) -> AnnotationId {
        self.store.next_id()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selected_id(&self) -> Option<AnnotationId> {
        self.store.selected()
    }

    pub fn hovered_id(&self) -> Option<AnnotationId> {
        self.store.hovered()
    }

    /// Select an annotation from the host, e.g. from a list view.
    pub fn select(&mut self, id: Option<AnnotationId>) {
        if !self.state.is_idle() {
            return;
        }
        if self.store.set_selected(id) {
            let selected = self.store.selected();
            self.notify(CanvasEvent::SelectionChanged(selected));
        }
    }

    // ------------------------------------------------------------------
    // Classes & display
    // ------------------------------------------------------------------

    /// Class applied to the next drawn rectangle. Existing annotations keep theirs.
    pub fn set_active_class(&mut self, class_id: ClassId, class_name: impl Into<String>) {
        self.active_class = ActiveClass {
            class_id,
            class_name: class_name.into(),
        };
    }

    pub fn active_class(&self) -> &ActiveClass {
        &self.active_class
    }

    /// Merge class colors over the current palette.
    pub fn update_class_color_map<I>(&mut self, colors: I)
    where
        I: IntoIterator<Item = (ClassId, Color)>,
    {
        self.palette.merge(colors);
        self.request_repaint();
    }

    pub fn palette(&self) -> &ClassPalette {
        &self.palette
    }

    pub fn set_display_flags(&mut self, show_ids: bool, show_classes: bool) {
        self.flags.show_ids = show_ids;
        self.flags.show_classes = show_classes;
        self.request_repaint();
    }

    pub fn set_show_labels(&mut self, show: bool) {
        self.flags.show_labels = show;
        self.request_repaint();
    }

    pub fn set_annotations_visible(&mut self, visible: bool) {
        self.flags.annotations_visible = visible;
        self.request_repaint();
    }

    pub fn display_flags(&self) -> DisplayFlags {
        self.flags
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Tell the canvas its widget size changed.
    pub fn resize(&mut self, size: DisplaySize) {
        self.viewport.resize(size);
        self.request_repaint();
    }

    pub fn fit_to_window(&mut self) {
        self.viewport.fit_to_window();
        self.request_repaint();
    }

    pub fn actual_size(&mut self) {
        self.viewport.actual_size();
        self.request_repaint();
    }

    pub fn set_scale(&mut self, scale: f32) {
        if self.viewport.set_scale(scale) {
            self.request_repaint();
        }
    }

    pub fn scale(&self) -> f32 {
        self.viewport.scale()
    }

    pub fn scale_percent(&self) -> u32 {
        self.viewport.scale_percent()
    }

    // ------------------------------------------------------------------
    // Interaction & feedback
    // ------------------------------------------------------------------

    pub fn interaction(&self) -> &InteractionState {
        &self.state
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// Classify a display point without changing any state.
    pub fn hit_test(&self, point: DisplayPoint) -> HitTarget {
        hit_test(point, &self.viewport, &self.store, self.config.handle_size)
    }

    /// Cancel the current gesture.
    ///
    /// Edits are rolled back to their press-time rectangle and drafts are
    /// discarded. Panning is only ended when `end_panning` is set.
    pub(crate) fn abort_gesture(&mut self, end_panning: bool) {
        match self.state {
            InteractionState::Editing { id, original_rect, .. } => {
                self.store.update_rect(id, original_rect);
                debug!(id, "edit aborted");
            }
            InteractionState::Drawing { .. } => debug!("draw discarded"),
            InteractionState::Panning { .. } if end_panning => {}
            InteractionState::Panning { .. } | InteractionState::Idle => return,
        }
        self.state.reset();
        self.cursor = CursorShape::Default;
        self.request_repaint();
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Borrowed view of everything the renderer needs.
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            viewport: &self.viewport,
            annotations: self.store.annotations(),
            selected: self.store.selected(),
            hovered: self.store.hovered(),
            palette: &self.palette,
            flags: self.flags,
            handle_size: self.config.handle_size,
            draft: self.state.draft_rect().map(|rect| Draft {
                rect,
                class_id: self.active_class.class_id,
            }),
            has_image: self.image.is_some(),
        }
    }

    pub fn render(&self) -> Vec<DrawCommand> {
        self.render_with(&ApproxTextMetrics)
    }

    pub fn render_with(&self, metrics: &dyn TextMetrics) -> Vec<DrawCommand> {
        render_scene(&self.scene(), metrics)
    }

    // ------------------------------------------------------------------
    // Change notification
    // ------------------------------------------------------------------

    /// Register a listener for [`CanvasEvent`]s.
    pub fn subscribe(&mut self, listener: impl FnMut(&CanvasEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Counter bumped on every annotations-changed event, for polling hosts.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns true once after any visible change.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }

    pub(crate) fn request_repaint(&mut self) {
        self.needs_repaint = true;
    }

    pub(crate) fn notify(&mut self, event: CanvasEvent) {
        if event == CanvasEvent::AnnotationsChanged {
            self.revision += 1;
        }
        self.needs_repaint = true;
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Announce a bulk replacement, clearing the host's selection first if one was dropped.
    fn notify_reset(&mut self, had_selection: bool) {
        if had_selection {
            self.notify(CanvasEvent::SelectionChanged(None));
        }
        self.notify(CanvasEvent::AnnotationsChanged);
    }
}

impl Default for AnnotationCanvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}
