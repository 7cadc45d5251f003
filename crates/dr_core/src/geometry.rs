//! World-space rectangles. Coordinates follow screen convention: +x right, +y down,
//! and a rectangle is anchored at its top-left corner.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn at(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Grow or shrink each edge independently (negative `dx1`/`dy1` move the
    /// left/top edges outward, positive `dx2`/`dy2` move the right/bottom edges outward).
    pub fn adjusted(&self, dx1: f32, dy1: f32, dx2: f32, dy2: f32) -> Rect {
        Rect::new(
            self.x + dx1,
            self.y + dy1,
            self.w - dx1 + dx2,
            self.h - dy1 + dy2,
        )
    }
}
