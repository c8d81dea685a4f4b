//! Geometry primitives for the two coordinate spaces of the canvas.
//!
//! Image space is integer pixels of the source image. Display space is the
//! host widget's own pixel grid, in floating point since pointer positions
//! and zoomed extents are fractional.

use serde::{Deserialize, Serialize};

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImagePoint {
    pub x: i32,
    pub y: i32,
}

impl ImagePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp into the closed range `[0, width] x [0, height]`.
    pub fn clamp_to(self, size: ImageSize) -> Self {
        Self {
            x: self.x.clamp(0, size.width as i32),
            y: self.y.clamp(0, size.height as i32),
        }
    }
}

/// A point in display (widget) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayPoint {
    pub x: f32,
    pub y: f32,
}

impl DisplayPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Pixel dimensions of the loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The full image as a rectangle anchored at the origin.
    pub fn bounds(&self) -> ImageRect {
        ImageRect::new(0, 0, self.width as i32, self.height as i32)
    }
}

/// Dimensions of the host widget in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
}

impl DisplaySize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle in image pixels.
///
/// `x`/`y` is the top-left corner, the right and bottom edges are exclusive.
/// Stored rectangles are always normalized (non-negative extent).
#[inline]
fn saturate(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl ImageRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a normalized rectangle spanning two drag points.
    pub fn from_corners(a: ImagePoint, b: ImagePoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            w: saturate(a.x.abs_diff(b.x)),
            h: saturate(a.y.abs_diff(b.y)),
        }
    }

    /// Build a rectangle from edge coordinates, without normalizing.
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            x: left,
            y: top,
            w: right.saturating_sub(left),
            h: bottom.saturating_sub(top),
        }
    }

    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Flip negative extents so that `w` and `h` are non-negative.
    ///
    /// Arithmetic saturates at the `i32` range, so extreme input yields a
    /// (possibly shrunken) valid rectangle instead of overflowing.
    pub fn normalized(self) -> Self {
        let (x, w) = if self.w < 0 {
            (self.x.saturating_add(self.w), self.w.saturating_neg())
        } else {
            (self.x, self.w)
        };
        let (y, h) = if self.h < 0 {
            (self.y.saturating_add(self.h), self.h.saturating_neg())
        } else {
            (self.y, self.h)
        };
        Self { x, y, w, h }
    }

    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    /// Overlap with `other`. Returns a zero-sized rectangle when disjoint.
    pub fn intersected(self, other: ImageRect) -> Self {
        let a = self.normalized();
        let b = other.normalized();
        let left = a.left().max(b.left());
        let top = a.top().max(b.top());
        let right = a.right().min(b.right());
        let bottom = a.bottom().min(b.bottom());
        if right <= left || bottom <= top {
            return Self::new(left, top, 0, 0);
        }
        Self::from_edges(left, top, right, bottom)
    }

    /// Shift the rectangle so it lies inside `bounds`, keeping its size.
    ///
    /// When the rectangle is larger than `bounds` along an axis it is pinned
    /// to the bounds origin on that axis and then cut to fit.
    pub fn shifted_inside(self, bounds: ImageRect) -> Self {
        let r = self.normalized();
        let x = r.x.min(bounds.right().saturating_sub(r.w)).max(bounds.left());
        let y = r.y.min(bounds.bottom().saturating_sub(r.h)).max(bounds.top());
        Self { x, y, ..r }.intersected(bounds)
    }

    /// Half-open containment test.
    pub fn contains(&self, p: ImagePoint) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// True when `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &ImageRect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn meets_min_size(&self, min: i32) -> bool {
        self.w >= min && self.h >= min
    }
}

/// An axis-aligned rectangle in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl DisplayRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// A square of side `size` centered on `center`.
    pub fn centered_square(center: DisplayPoint, size: f32) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> DisplayPoint {
        DisplayPoint::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Half-open containment test.
    pub fn contains(&self, p: DisplayPoint) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Closed containment test, used for handle squares so both borders count.
    pub fn contains_inclusive(&self, p: DisplayPoint) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}
