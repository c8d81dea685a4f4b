//! Render contract for the annotation canvas.
//!
//! Rendering is a pure function from a borrowed [`Scene`] to a list of
//! [`DrawCommand`]s in painter's order. The host owns the actual drawing
//! surface and only has to know how to stroke and fill rectangles and draw
//! text.
//!
//! ## Draw Order
//!
//! 1. The scaled image
//! 2. Per annotation, in store order: outline, then handles if selected, then label
//! 3. The dashed draft rectangle of an in-progress draw gesture

use crate::config::CanvasConfig;
use crate::constants::{
    APPROX_GLYPH_WIDTH, APPROX_LINE_HEIGHT, DRAFT_STROKE_WIDTH, HANDLE_STROKE_WIDTH, IDLE_STROKE_ALPHA,
    LABEL_FONT_SIZE, LABEL_PADDING_X, LABEL_PADDING_Y, MIN_LABEL_FONT_SIZE, SELECTED_STROKE_WIDTH, STROKE_WIDTH,
};
use crate::geometry::{DisplayPoint, DisplayRect, ImageRect};
use crate::hit_testing::handle_rects;
use crate::profile_scope;
use crate::types::{Annotation, AnnotationId, ClassId, ClassPalette, Color};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// Display toggles that only affect rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFlags {
    /// Master switch for labels
    pub show_labels: bool,
    pub show_ids: bool,
    pub show_classes: bool,
    /// When false, only the image is drawn
    pub annotations_visible: bool,
}

impl DisplayFlags {
    pub fn labels_enabled(&self) -> bool {
        self.show_labels && (self.show_ids || self.show_classes)
    }
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self::from(&CanvasConfig::default())
    }
}

impl From<&CanvasConfig> for DisplayFlags {
    fn from(config: &CanvasConfig) -> Self {
        Self {
            show_labels: config.show_labels,
            show_ids: config.show_ids,
            show_classes: config.show_classes,
            annotations_visible: true,
        }
    }
}

/// Text measurement supplied by the host's font system.
pub trait TextMetrics {
    /// Width and height of `text` at `font_size`, in display pixels.
    fn measure(&self, text: &str, font_size: f32) -> (f32, f32);
}

/// Fixed-advance estimate for hosts without a font system.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMetrics;

impl TextMetrics for ApproxTextMetrics {
    fn measure(&self, text: &str, font_size: f32) -> (f32, f32) {
        let chars = text.chars().count() as f32;
        (
            (chars * font_size * APPROX_GLYPH_WIDTH).round(),
            (font_size * APPROX_LINE_HEIGHT).round(),
        )
    }
}

/// A single drawing primitive in display space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Draw the whole image scaled into `dest`
    Image { dest: DisplayRect },
    /// Outline a rectangle without filling it
    StrokeRect {
        rect: DisplayRect,
        color: Color,
        width: f32,
        dashed: bool,
    },
    /// Filled resize handle with an outline
    Handle {
        rect: DisplayRect,
        fill: Color,
        stroke: Color,
        stroke_width: f32,
    },
    /// Opaque label chip with text
    Label {
        background: DisplayRect,
        fill: Color,
        text: String,
        /// Top-left of the text box
        text_origin: DisplayPoint,
        font_size: f32,
        text_color: Color,
    },
}

/// An in-progress draw gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draft {
    pub rect: ImageRect,
    pub class_id: ClassId,
}

/// Everything the renderer reads, borrowed from the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub viewport: &'a Viewport,
    pub annotations: &'a [Annotation],
    pub selected: Option<AnnotationId>,
    pub hovered: Option<AnnotationId>,
    pub palette: &'a ClassPalette,
    pub flags: DisplayFlags,
    pub handle_size: f32,
    pub draft: Option<Draft>,
    pub has_image: bool,
}

/// Label font size for the current zoom.
pub fn label_font_size(scale: f32) -> f32 {
    (LABEL_FONT_SIZE * scale).floor().max(MIN_LABEL_FONT_SIZE)
}

/// Produce the draw commands for `scene`. Returns nothing when no image is loaded.
pub fn render_scene(scene: &Scene<'_>, metrics: &dyn TextMetrics) -> Vec<DrawCommand> {
    profile_scope!("render_scene");

    let mut commands = Vec::new();
    if !scene.has_image {
        return commands;
    }

    commands.push(DrawCommand::Image {
        dest: scene.viewport.image_display_rect(),
    });

    if !scene.flags.annotations_visible {
        return commands;
    }

    let font_size = label_font_size(scene.viewport.scale());
    for ann in scene.annotations {
        let base = scene.palette.color(ann.class_id);
        let rect = scene.viewport.rect_to_widget(ann.rect);
        let is_selected = scene.selected == Some(ann.id);
        let is_hovered = scene.hovered == Some(ann.id);

        let (color, width) = if is_selected {
            (base, SELECTED_STROKE_WIDTH)
        } else if is_hovered {
            (base, STROKE_WIDTH)
        } else {
            (base.with_alpha(IDLE_STROKE_ALPHA), STROKE_WIDTH)
        };
        commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            width,
            dashed: false,
        });

        if is_selected {
            for (_, square) in handle_rects(rect, scene.handle_size) {
                commands.push(DrawCommand::Handle {
                    rect: square,
                    fill: base.with_alpha(255),
                    stroke: Color::WHITE,
                    stroke_width: HANDLE_STROKE_WIDTH,
                });
            }
        }

        if !scene.flags.labels_enabled() {
            continue;
        }
        if let Some(text) = ann.label_text(scene.flags.show_ids, scene.flags.show_classes) {
            let (text_w, text_h) = metrics.measure(&text, font_size);
            let background = DisplayRect::new(
                rect.x,
                rect.y - text_h - 2.0 * LABEL_PADDING_Y,
                text_w + 2.0 * LABEL_PADDING_X,
                text_h + 2.0 * LABEL_PADDING_Y,
            );
            commands.push(DrawCommand::Label {
                text_origin: DisplayPoint::new(background.x + LABEL_PADDING_X, background.y + LABEL_PADDING_Y),
                background,
                fill: base.with_alpha(255),
                text,
                font_size,
                text_color: Color::WHITE,
            });
        }
    }

    if let Some(draft) = scene.draft {
        commands.push(DrawCommand::StrokeRect {
            rect: scene.viewport.rect_to_widget(draft.rect),
            color: scene.palette.color(draft.class_id),
            width: DRAFT_STROKE_WIDTH,
            dashed: true,
        });
    }

    commands
}
