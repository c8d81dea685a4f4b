//! Scripted pointer sessions for headless hosts.
//!
//! A [`ReplayScript`] describes the widget size, an optional configuration and
//! a list of host events. Running it against an image yields the final
//! annotation set, which makes whole interaction sessions reproducible from
//! a JSON file.

use crate::canvas::{AnnotationCanvas, CanvasImage};
use crate::config::CanvasConfig;
use crate::error::{CanvasResult, ConfigResult};
use crate::geometry::{DisplayPoint, DisplaySize, ImageRect};
use crate::input::{MouseDownEvent, MouseMoveEvent, MouseUpEvent, ScrollWheelEvent};
use crate::types::{ActiveClass, Annotation, AnnotationId, ClassId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One step of a scripted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    MouseDown(MouseDownEvent),
    MouseMove(MouseMoveEvent),
    MouseUp(MouseUpEvent),
    Scroll(ScrollWheelEvent),
    FocusLost,
    Resize { width: f32, height: f32 },
    FitToWindow,
    ActualSize,
    SetScale { scale: f32 },
    SetActiveClass { class_id: ClassId, class_name: String },
    SetDisplayFlags { show_ids: bool, show_classes: bool },
    SetShowLabels { show: bool },
    SetAnnotationsVisible { visible: bool },
    Select { id: Option<AnnotationId> },
    AddAnnotation { rect: ImageRect, class_id: ClassId, class_name: String },
    DeleteById { id: AnnotationId },
    DeleteSelected,
    ClearAll,
}

impl ReplayEvent {
    /// Deliver this event to `canvas`.
    pub fn apply(&self, canvas: &mut AnnotationCanvas) {
        match self {
            ReplayEvent::MouseDown(e) => canvas.handle_mouse_down(e),
            ReplayEvent::MouseMove(e) => canvas.handle_mouse_move(e),
            ReplayEvent::MouseUp(e) => canvas.handle_mouse_up(e),
            ReplayEvent::Scroll(e) => canvas.handle_scroll(e),
            ReplayEvent::FocusLost => canvas.handle_focus_lost(),
            ReplayEvent::Resize { width, height } => canvas.resize(DisplaySize::new(*width, *height)),
            ReplayEvent::FitToWindow => canvas.fit_to_window(),
            ReplayEvent::ActualSize => canvas.actual_size(),
            ReplayEvent::SetScale { scale } => canvas.set_scale(*scale),
            ReplayEvent::SetActiveClass { class_id, class_name } => {
                canvas.set_active_class(*class_id, class_name.clone())
            }
            ReplayEvent::SetDisplayFlags {
                show_ids,
                show_classes,
            } => canvas.set_display_flags(*show_ids, *show_classes),
            ReplayEvent::SetShowLabels { show } => canvas.set_show_labels(*show),
            ReplayEvent::SetAnnotationsVisible { visible } => canvas.set_annotations_visible(*visible),
            ReplayEvent::Select { id } => canvas.select(*id),
            ReplayEvent::AddAnnotation {
                rect,
                class_id,
                class_name,
            } => {
                canvas.add_annotation(*rect, *class_id, class_name);
            }
            ReplayEvent::DeleteById { id } => {
                canvas.delete_by_id(*id);
            }
            ReplayEvent::DeleteSelected => {
                canvas.delete_selected();
            }
            ReplayEvent::ClearAll => canvas.clear_all(),
        }
    }
}

/// A complete scripted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub widget: DisplaySize,
    #[serde(default)]
    pub config: CanvasConfig,
    #[serde(default)]
    pub active_class: ActiveClass,
    /// Annotations restored with the image, ids preserved
    #[serde(default)]
    pub restored: Option<Vec<Annotation>>,
    #[serde(default)]
    pub events: Vec<ReplayEvent>,
}

/// Final canvas state after a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    pub annotations: Vec<Annotation>,
    pub selected: Option<AnnotationId>,
    pub scale: f32,
    pub pan: DisplayPoint,
    pub revision: u64,
}

impl ReplayScript {
    /// Parse a script and validate its embedded configuration.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let script: ReplayScript = serde_json::from_str(json)?;
        script.config.validate()?;
        Ok(script)
    }

    /// Load `image` into a fresh canvas and play every event against it.
    pub fn run(&self, image: CanvasImage) -> CanvasResult<ReplayOutcome> {
        let mut canvas = AnnotationCanvas::new(self.config.clone());
        canvas.resize(self.widget);
        canvas.set_image(image, self.restored.clone())?;
        canvas.set_active_class(self.active_class.class_id, self.active_class.class_name.clone());

        for event in &self.events {
            event.apply(&mut canvas);
        }
        debug!(events = self.events.len(), annotations = canvas.annotations().len(), "replay finished");

        Ok(ReplayOutcome {
            annotations: canvas.get_annotations(),
            selected: canvas.selected_id(),
            scale: canvas.scale(),
            pan: canvas.viewport().pan(),
            revision: canvas.revision(),
        })
    }
}
