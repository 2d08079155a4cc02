//! Axis-aligned bounding boxes
//!
//! Circles and rectangles both collide as their bounding boxes. Edges are
//! inclusive: boxes that merely touch count as intersecting, and zero-size
//! boxes still take part with zero extent.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A box anchored at its top-left corner (screen coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

/// Penetration depths of one box into another, one per push-out direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Push the box left by this much to separate
    pub left: f32,
    /// Push the box right by this much to separate
    pub right: f32,
    /// Push the box up by this much to separate
    pub top: f32,
    /// Push the box down by this much to separate
    pub bottom: f32,
}

/// Direction of the minimal push-out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOut {
    Left,
    Right,
    Up,
    Down,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Inclusive intersection test
    pub fn intersects(&self, other: &Aabb) -> bool {
        other.left() <= self.right()
            && other.right() >= self.left()
            && other.top() <= self.bottom()
            && other.bottom() >= self.top()
    }

    /// Overlap depths of `self` into `other`
    ///
    /// Only meaningful when the boxes intersect.
    pub fn overlap(&self, other: &Aabb) -> Overlap {
        Overlap {
            left: self.right() - other.left(),
            right: other.right() - self.left(),
            top: self.bottom() - other.top(),
            bottom: other.bottom() - self.top(),
        }
    }
}

impl Overlap {
    /// The strictly smallest depth and its direction
    ///
    /// Returns `None` when the minimum is shared by two or more directions.
    pub fn min_push(&self) -> Option<(PushOut, f32)> {
        let Overlap {
            left,
            right,
            top,
            bottom,
        } = *self;

        if left < right && left < top && left < bottom {
            Some((PushOut::Left, left))
        } else if right < left && right < top && right < bottom {
            Some((PushOut::Right, right))
        } else if top < left && top < right && top < bottom {
            Some((PushOut::Up, top))
        } else if bottom < left && bottom < right && bottom < top {
            Some((PushOut::Down, bottom))
        } else {
            None
        }
    }
}
