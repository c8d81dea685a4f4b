//! Core types for the annotation canvas.
//!
//! This module defines the annotation record stored by the canvas and the
//! class color palette used when rendering it.

use crate::constants::{DEFAULT_CLASS_COLOR, DEFAULT_CLASS_COLORS};
use crate::geometry::ImageRect;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Stable identifier of an annotation within one canvas.
pub type AnnotationId = u32;

/// Opaque class identifier supplied by the host's class registry.
pub type ClassId = i32;

// ============================================================================
// Annotation
// ============================================================================

/// A rectangular annotation tagged with an opaque class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique within the owning store
    pub id: AnnotationId,
    /// Box in image pixels, always normalized
    pub rect: ImageRect,
    /// Class identifier from the host registry
    pub class_id: ClassId,
    /// Display name captured when the box was created
    pub class_name: String,
}

impl Annotation {
    pub fn new(id: AnnotationId, rect: ImageRect, class_id: ClassId, class_name: impl Into<String>) -> Self {
        Self {
            id,
            rect,
            class_id,
            class_name: class_name.into(),
        }
    }

    /// Label text for the enabled subset of `{id, class_name}`.
    ///
    /// Returns `None` when neither part is enabled.
    pub fn label_text(&self, show_id: bool, show_class: bool) -> Option<String> {
        match (show_id, show_class) {
            (true, true) => Some(format!("ID:{} {}", self.id, self.class_name)),
            (true, false) => Some(format!("ID:{}", self.id)),
            (false, true) => Some(self.class_name.clone()),
            (false, false) => None,
        }
    }
}

/// The class assigned to the next drawn rectangle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveClass {
    pub class_id: ClassId,
    pub class_name: String,
}

impl Default for ActiveClass {
    fn default() -> Self {
        Self {
            class_id: 0,
            class_name: "object".to_string(),
        }
    }
}

// ============================================================================
// Colors
// ============================================================================

/// An 8-bit RGBA color.
///
/// Serialized as a `#rrggbb` or `#rrggbbaa` hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?).with_alpha(channel(6)?)),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Class id to color mapping used for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassPalette {
    colors: HashMap<ClassId, Color>,
}

impl ClassPalette {
    /// Palette pre-filled with the built-in colors for classes 0..=3.
    pub fn new() -> Self {
        let colors = DEFAULT_CLASS_COLORS
            .iter()
            .map(|&(id, (r, g, b))| (id, Color::rgb(r, g, b)))
            .collect();
        Self { colors }
    }

    /// Color for `class_id`, falling back to the default red.
    pub fn color(&self, class_id: ClassId) -> Color {
        self.colors.get(&class_id).copied().unwrap_or_else(|| {
            let (r, g, b) = DEFAULT_CLASS_COLOR;
            Color::rgb(r, g, b)
        })
    }

    /// Merge `colors` over the current mapping. Existing ids not in the map are kept.
    pub fn merge<I>(&mut self, colors: I)
    where
        I: IntoIterator<Item = (ClassId, Color)>,
    {
        self.colors.extend(colors);
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ClassPalette {
    fn default() -> Self {
        Self::new()
    }
}
