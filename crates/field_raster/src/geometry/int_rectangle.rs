//! Integer pixel-space rectangles used to address render targets.
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pixel area `[x, x + width) x [y, y + height)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntRectangle {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl IntRectangle {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A `width` x `height` area anchored at pixel `(0, 0)`.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// `true` if the area covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of covered pixels.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exclusive right edge.
    pub fn end_x(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    pub fn end_y(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn contains_pixel(&self, px: i32, py: i32) -> bool {
        let (px, py) = (px as i64, py as i64);
        px >= self.x as i64 && px < self.end_x() && py >= self.y as i64 && py < self.end_y()
    }

    /// Overlap with `other`, or `None` if nothing is shared.
    pub fn intersection(&self, other: &IntRectangle) -> Option<IntRectangle> {
        let x0 = (self.x as i64).max(other.x as i64);
        let y0 = (self.y as i64).max(other.y as i64);
        let x1 = self.end_x().min(other.end_x());
        let y1 = self.end_y().min(other.end_y());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(IntRectangle::new(
            x0 as i32,
            y0 as i32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        ))
    }

    /// Row indices covered by the area, top to bottom.
    pub fn rows(&self) -> Range<i64> {
        self.y as i64..self.end_y()
    }

    /// Column indices covered by the area, left to right.
    pub fn columns(&self) -> Range<i64> {
        self.x as i64..self.end_x()
    }
}
