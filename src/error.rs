//! Error types for canvas operations
//!
//! Geometry problems never surface here: out-of-bounds and undersized
//! rectangles are clamped or discarded silently. Only image loading and
//! configuration can fail.

use thiserror::Error;

/// Errors raised when an image handed to the canvas cannot be used
#[derive(Error, Debug)]
pub enum ImageLoadError {
    /// The raster has zero width or height
    #[error("image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// Decoding failed in the image crate
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

/// Errors raised while loading a canvas configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// JSON parsing error from serde_json
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is outside its allowed range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level error for the canvas API
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error(transparent)]
    ImageLoad(#[from] ImageLoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Result type alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
