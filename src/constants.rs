//! Canvas-wide constants.
//!
//! Centralizes magic numbers so the viewport, hit testing and rendering
//! agree on the same values.

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_SCALE: f32 = 0.1;

/// Maximum zoom level
pub const MAX_SCALE: f32 = 5.0;

/// Default zoom level
pub const DEFAULT_SCALE: f32 = 1.0;

/// Zoom multiplier per wheel notch (forward zooms in, backward divides)
pub const ZOOM_STEP: f32 = 1.15;

/// Fraction of the widget the image occupies after fit-to-window
pub const FIT_MARGIN: f32 = 0.95;

/// Scale values are snapped to multiples of `1 / SCALE_STEPS_PER_UNIT`
pub const SCALE_STEPS_PER_UNIT: f32 = 10_000.0;

/// Smallest accepted `min_scale`: one grid step
pub const MIN_SCALE_RESOLUTION: f32 = 1.0 / SCALE_STEPS_PER_UNIT;

// ============================================================================
// Annotation Geometry
// ============================================================================

/// Minimum width and height of a committed bounding box, in image pixels
pub const MIN_BOX_SIZE: i32 = 10;

/// Side length of a resize handle square, in display pixels
pub const HANDLE_SIZE: f32 = 6.0;

// ============================================================================
// Stroke Styles
// ============================================================================

/// Border width of the selected annotation
pub const SELECTED_STROKE_WIDTH: f32 = 3.0;

/// Border width of hovered and idle annotations
pub const STROKE_WIDTH: f32 = 2.0;

/// Border alpha of annotations that are neither selected nor hovered
pub const IDLE_STROKE_ALPHA: u8 = 180;

/// Border width of the resize handle outline
pub const HANDLE_STROKE_WIDTH: f32 = 1.0;

/// Border width of the in-progress draft rectangle
pub const DRAFT_STROKE_WIDTH: f32 = 2.0;

// ============================================================================
// Labels
// ============================================================================

/// Label font size at scale 1.0
pub const LABEL_FONT_SIZE: f32 = 10.0;

/// Smallest label font size at any zoom
pub const MIN_LABEL_FONT_SIZE: f32 = 8.0;

/// Horizontal padding on each side of the label text
pub const LABEL_PADDING_X: f32 = 4.0;

/// Vertical padding on each side of the label text
pub const LABEL_PADDING_Y: f32 = 2.0;

/// Approximate glyph advance as a fraction of the font size
pub const APPROX_GLYPH_WIDTH: f32 = 0.6;

/// Approximate line height as a fraction of the font size
pub const APPROX_LINE_HEIGHT: f32 = 1.2;

// ============================================================================
// Colors
// ============================================================================

/// Fallback class color for ids missing from the palette (bright red)
pub const DEFAULT_CLASS_COLOR: (u8, u8, u8) = (255, 75, 75);

/// Built-in palette for the first four class ids
pub const DEFAULT_CLASS_COLORS: [(i32, (u8, u8, u8)); 4] = [
    (0, (255, 75, 75)),
    (1, (75, 255, 75)),
    (2, (75, 150, 255)),
    (3, (255, 215, 0)),
];
