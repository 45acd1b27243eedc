//! Collision primitives
//!
//! Circles for projectile hits, axis-aligned boxes for the player. Both tests
//! are strict: shapes that only touch do not collide.

use glam::Vec2;

/// A collision circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrink toward the interior by fractions of the current size
    ///
    /// `offset` is the top-left displacement, `size` the remaining extent, both
    /// as fractions of width/height.
    pub fn inset(&self, offset: Vec2, size: Vec2) -> Rect {
        Rect {
            x: self.x + self.width * offset.x,
            y: self.y + self.height * offset.y,
            width: self.width * size.x,
            height: self.height * size.y,
        }
    }

    /// Inclusive point test (used for pointer hover/click)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Circle-circle overlap using squared distances (no square root)
#[inline]
pub fn circles_overlap(a: &Circle, b: &Circle) -> bool {
    let radius_sum = a.radius + b.radius;
    a.center.distance_squared(b.center) < radius_sum * radius_sum
}

/// Strict AABB overlap
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}
