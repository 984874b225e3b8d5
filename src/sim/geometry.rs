//! Axis-aligned rectangles and direction helpers
//!
//! Hit boxes are integer rectangles built from an entity's float position,
//! truncated toward zero, so two entities collide only when their pixel
//! footprints share at least one pixel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer rectangle used for hit boxes and sprite sub-regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Hit box anchored at a float position (top-left corner)
    pub fn at(pos: Vec2, w: i32, h: i32) -> Self {
        Self::new(pos.x as i32, pos.y as i32, w, h)
    }

    /// Half-open overlap test on both axes
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(*self, *other)
    }

    /// Split a `w` x `h` sprite into its 2x2 quadrants, row by row.
    ///
    /// Regions are in sprite-local coordinates. Odd sizes drop the last
    /// pixel column/row, matching integer halving.
    pub fn quadrants(w: i32, h: i32) -> [Rect; 4] {
        let hw = w / 2;
        let hh = h / 2;
        [
            Rect::new(0, 0, hw, hh),
            Rect::new(hw, 0, hw, hh),
            Rect::new(0, hh, hw, hh),
            Rect::new(hw, hh, hw, hh),
        ]
    }
}

/// Axis-aligned overlap with half-open intervals: edges that merely touch
/// do not collide.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x.max(b.x) < (a.x + a.w).min(b.x + b.w) && a.y.max(b.y) < (a.y + a.h).min(b.y + b.h)
}

/// Unit vector pointing from `from` toward `to`; zero when the points coincide
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}
