use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned integer rectangle in atlas pixel space.
///
/// `pos` is the top-left corner, `size` the extent. Y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntRect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl IntRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    pub const fn from_pos_size(pos: IVec2, size: IVec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> i32 {
        self.pos.x
    }

    pub fn top(&self) -> i32 {
        self.pos.y
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    /// Pixel area. Degenerate rectangles report zero.
    pub fn area(&self) -> i64 {
        self.size.x.max(0) as i64 * self.size.y.max(0) as i64
    }

    /// True when the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &IntRect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True when `other` lies fully inside `self`.
    pub fn contains_rect(&self, other: &IntRect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}
