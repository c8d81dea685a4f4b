//! Pointer and wheel events delivered by the host.
//!
//! Positions are in display space, relative to the canvas widget's top-left.

use crate::config::PanModifier;
use crate::geometry::DisplayPoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub control: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn control() -> Self {
        Self {
            control: true,
            ..Self::default()
        }
    }

    pub fn has(&self, modifier: PanModifier) -> bool {
        match modifier {
            PanModifier::Control => self.control,
            PanModifier::Shift => self.shift,
            PanModifier::Alt => self.alt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseDownEvent {
    pub button: MouseButton,
    pub position: DisplayPoint,
    #[serde(default)]
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseMoveEvent {
    pub position: DisplayPoint,
    #[serde(default)]
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseUpEvent {
    pub button: MouseButton,
    pub position: DisplayPoint,
    #[serde(default)]
    pub modifiers: Modifiers,
}

/// One wheel notch. Positive `delta_y` scrolls forward (zoom in).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollWheelEvent {
    pub position: DisplayPoint,
    pub delta_y: f32,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl MouseDownEvent {
    pub fn new(button: MouseButton, position: DisplayPoint) -> Self {
        Self {
            button,
            position,
            modifiers: Modifiers::none(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl MouseMoveEvent {
    pub fn new(position: DisplayPoint) -> Self {
        Self {
            position,
            modifiers: Modifiers::none(),
        }
    }
}

impl MouseUpEvent {
    pub fn new(button: MouseButton, position: DisplayPoint) -> Self {
        Self {
            button,
            position,
            modifiers: Modifiers::none(),
        }
    }
}

impl ScrollWheelEvent {
    pub fn new(position: DisplayPoint, delta_y: f32) -> Self {
        Self {
            position,
            delta_y,
            modifiers: Modifiers::none(),
        }
    }
}
