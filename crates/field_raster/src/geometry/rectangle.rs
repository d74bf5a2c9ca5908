//! Axis-aligned rectangles in continuous (source) space.
//!
//! [`Rectangle`] is an immutable value type. Read-only queries live on the [`Bounds`]
//! trait so the observable [`crate::geometry::MutableRectangle`] shares them.
use std::hash::{Hash, Hasher};

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read-only queries over an axis-aligned bounding region.
///
/// An empty region has no area: it contains nothing, is contained in nothing and
/// intersects nothing (not even another empty region). Its mapped and relative
/// coordinates degrade to `0.0`.
pub trait Bounds {
    fn min_x(&self) -> f64;
    fn min_y(&self) -> f64;
    fn max_x(&self) -> f64;
    fn max_y(&self) -> f64;
    fn is_empty(&self) -> bool;

    /// Extent along X, `0.0` when empty.
    fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x() - self.min_x()
        }
    }

    /// Extent along Y, `0.0` when empty.
    fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y() - self.min_y()
        }
    }

    /// Mean of width and height.
    fn size_average(&self) -> f64 {
        (self.width() + self.height()) * 0.5
    }

    fn center(&self) -> DVec2 {
        DVec2::new(self.mapped_x(0.5), self.mapped_y(0.5))
    }

    /// Maps `t` in `[0, 1]` onto `[min_x, max_x]`. Values outside `[0, 1]` extrapolate.
    fn mapped_x(&self, t: f64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.min_x() + t * (self.max_x() - self.min_x())
    }

    /// Maps `t` in `[0, 1]` onto `[min_y, max_y]`. Values outside `[0, 1]` extrapolate.
    fn mapped_y(&self, t: f64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.min_y() + t * (self.max_y() - self.min_y())
    }

    /// Inverse of [`Bounds::mapped_x`]. Returns `0.0` for empty or zero-width bounds.
    fn relative_x(&self, x: f64) -> f64 {
        let w = self.width();
        if w == 0.0 {
            return 0.0;
        }
        (x - self.min_x()) / w
    }

    /// Inverse of [`Bounds::mapped_y`]. Returns `0.0` for empty or zero-height bounds.
    fn relative_y(&self, y: f64) -> f64 {
        let h = self.height();
        if h == 0.0 {
            return 0.0;
        }
        (y - self.min_y()) / h
    }

    /// Whether the point lies inside or on the border.
    fn contains_point(&self, x: f64, y: f64) -> bool {
        !self.is_empty()
            && x >= self.min_x()
            && x <= self.max_x()
            && y >= self.min_y()
            && y <= self.max_y()
    }

    /// Whether `other` lies completely inside these bounds.
    fn contains(&self, other: &dyn Bounds) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        other.min_x() >= self.min_x()
            && other.max_x() <= self.max_x()
            && other.min_y() >= self.min_y()
            && other.max_y() <= self.max_y()
    }

    /// Whether the two regions overlap. Touching borders count as overlap.
    fn intersects(&self, other: &dyn Bounds) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min_x() <= other.max_x()
            && other.min_x() <= self.max_x()
            && self.min_y() <= other.max_y()
            && other.min_y() <= self.max_y()
    }

    /// Snapshot as an immutable [`Rectangle`].
    fn to_rectangle(&self) -> Rectangle {
        if self.is_empty() {
            Rectangle::EMPTY
        } else {
            Rectangle::new(self.min_x(), self.min_y(), self.max_x(), self.max_y())
        }
    }
}

/// Immutable axis-aligned rectangle.
///
/// Bounds are normalized on construction so `min <= max` on both axes. An empty
/// rectangle always stores zero bounds; two empty rectangles compare equal and an
/// empty rectangle never equals a non-empty one, even a zero-area one at the origin.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RectangleRepr", into = "RectangleRepr"))]
pub struct Rectangle {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    empty: bool,
}

impl Rectangle {
    /// The empty rectangle.
    pub const EMPTY: Self = Self {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
        empty: true,
    };

    /// The unit square `[0, 1] x [0, 1]`, the canonical source area.
    pub const UNIT: Self = Self {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 1.0,
        max_y: 1.0,
        empty: false,
    };

    /// Creates a rectangle from two corners given in any order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
            empty: false,
        }
    }

    /// Creates a `width` x `height` rectangle anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Creates a rectangle from two corner points (glam, mint or `[f64; 2]`).
    pub fn from_corners(a: impl Into<mint::Point2<f64>>, b: impl Into<mint::Point2<f64>>) -> Self {
        let a = a.into();
        let b = b.into();
        Self::new(a.x, a.y, b.x, b.y)
    }

    pub fn unit() -> Self {
        Self::UNIT
    }

    pub fn min(&self) -> DVec2 {
        DVec2::new(self.min_x, self.min_y)
    }

    pub fn max(&self) -> DVec2 {
        DVec2::new(self.max_x, self.max_y)
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width(), self.height())
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn including(&self, other: &dyn Bounds) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.empty {
            return other.to_rectangle();
        }
        if self.contains(other) {
            return *self;
        }
        Self::new(
            self.min_x.min(other.min_x()),
            self.min_y.min(other.min_y()),
            self.max_x.max(other.max_x()),
            self.max_y.max(other.max_y()),
        )
    }

    /// Overlap of `self` and `other`, or `None` when they do not overlap.
    pub fn intersection(&self, other: &dyn Bounds) -> Option<Self> {
        if self.empty || other.is_empty() {
            return None;
        }
        let min_x = self.min_x.max(other.min_x());
        let min_y = self.min_y.max(other.min_y());
        let max_x = self.max_x.min(other.max_x());
        let max_y = self.max_y.min(other.max_y());
        if max_x < min_x || max_y < min_y {
            return None;
        }
        Some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
            empty: false,
        })
    }

    /// Moves the rectangle by `offset`. Empty rectangles stay empty.
    pub fn translated(&self, offset: DVec2) -> Self {
        if self.empty {
            return *self;
        }
        Self::new(
            self.min_x + offset.x,
            self.min_y + offset.y,
            self.max_x + offset.x,
            self.max_y + offset.y,
        )
    }

    /// Scales both corners about the origin.
    pub fn scaled(&self, factor: DVec2) -> Self {
        if self.empty {
            return *self;
        }
        Self::new(
            self.min_x * factor.x,
            self.min_y * factor.y,
            self.max_x * factor.x,
            self.max_y * factor.y,
        )
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds for Rectangle {
    #[inline]
    fn min_x(&self) -> f64 {
        self.min_x
    }

    #[inline]
    fn min_y(&self) -> f64 {
        self.min_y
    }

    #[inline]
    fn max_x(&self) -> f64 {
        self.max_x
    }

    #[inline]
    fn max_y(&self) -> f64 {
        self.max_y
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.empty
    }

    fn to_rectangle(&self) -> Rectangle {
        *self
    }
}

impl PartialEq for Rectangle {
    fn eq(&self, other: &Self) -> bool {
        self.empty == other.empty
            && self.min_x == other.min_x
            && self.min_y == other.min_y
            && self.max_x == other.max_x
            && self.max_y == other.max_y
    }
}

impl Eq for Rectangle {}

impl Hash for Rectangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.empty.hash(state);
        // `+ 0.0` folds -0.0 into 0.0 so equal values hash equally.
        for v in [self.min_x, self.min_y, self.max_x, self.max_y] {
            (v + 0.0).to_bits().hash(state);
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RectangleRepr {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    #[serde(default)]
    empty: bool,
}

#[cfg(feature = "serde")]
impl From<RectangleRepr> for Rectangle {
    fn from(repr: RectangleRepr) -> Self {
        if repr.empty {
            Rectangle::EMPTY
        } else {
            Rectangle::new(repr.min_x, repr.min_y, repr.max_x, repr.max_y)
        }
    }
}

#[cfg(feature = "serde")]
impl From<Rectangle> for RectangleRepr {
    fn from(r: Rectangle) -> Self {
        Self {
            min_x: r.min_x,
            min_y: r.min_y,
            max_x: r.max_x,
            max_y: r.max_y,
            empty: r.empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    fn hash_of(r: &Rectangle) -> u64 {
        let mut h = DefaultHasher::new();
        r.hash(&mut h);
        h.finish()
    }

    #[test]
    fn constructor_normalizes_swapped_corners() {
        assert_eq!(
            Rectangle::new(4.0, 1.0, -2.0, 3.0),
            Rectangle::new(-2.0, 1.0, 4.0, 3.0)
        );
        let r = Rectangle::new(5.0, 7.0, 1.0, 2.0);
        assert_eq!((r.min_x(), r.min_y(), r.max_x(), r.max_y()), (1.0, 2.0, 5.0, 7.0));
    }

    #[test]
    fn mapped_and_relative_roundtrip() {
        let r = Rectangle::new(-3.0, 2.0, 5.0, 4.5);
        for t in [-0.5, 0.0, 0.25, 0.5, 1.0, 1.75] {
            approx_eq(r.relative_x(r.mapped_x(t)), t);
            approx_eq(r.relative_y(r.mapped_y(t)), t);
        }
        approx_eq(r.mapped_x(0.5), 1.0);
        approx_eq(r.mapped_y(1.0), 4.5);
    }

    #[test]
    fn empty_rectangle_degrades_to_zero() {
        let e = Rectangle::EMPTY;
        assert_eq!(e.mapped_x(0.7), 0.0);
        assert_eq!(e.mapped_y(0.7), 0.0);
        assert_eq!(e.relative_x(3.0), 0.0);
        assert_eq!(e.relative_y(3.0), 0.0);
        assert_eq!(e.width(), 0.0);
    }

    #[test]
    fn zero_width_rectangle_relative_is_zero_not_nan() {
        let r = Rectangle::new(2.0, 0.0, 2.0, 1.0);
        assert!(!r.is_empty());
        assert_eq!(r.relative_x(5.0), 0.0);
        approx_eq(r.relative_y(0.5), 0.5);
    }

    #[test]
    fn empty_contains_and_intersects_nothing() {
        let e = Rectangle::EMPTY;
        let r = Rectangle::from_size(10.0, 10.0);
        assert!(!e.contains(&r));
        assert!(!e.intersects(&r));
        assert!(!e.contains(&Rectangle::EMPTY));
        assert!(!e.intersects(&Rectangle::EMPTY));
        assert!(!r.contains(&e));
        assert!(!r.intersects(&e));
        assert!(!e.contains_point(0.0, 0.0));
    }

    #[test]
    fn contains_and_intersects_non_empty() {
        let outer = Rectangle::from_size(10.0, 10.0);
        let inner = Rectangle::new(2.0, 2.0, 3.0, 3.0);
        let crossing = Rectangle::new(8.0, 8.0, 12.0, 12.0);
        let apart = Rectangle::new(20.0, 20.0, 21.0, 21.0);
        assert!(outer.contains(&inner));
        assert!(!outer.contains(&crossing));
        assert!(outer.intersects(&crossing));
        assert!(!outer.intersects(&apart));
        assert!(outer.contains(&outer));
    }

    #[test]
    fn intersection_yields_overlap_or_none() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(5.0, 5.0, 15.0, 15.0);
        assert_eq!(a.intersection(&b), Some(Rectangle::new(5.0, 5.0, 10.0, 10.0)));
        assert_eq!(a.intersection(&Rectangle::new(11.0, 0.0, 12.0, 1.0)), None);
        assert_eq!(a.intersection(&Rectangle::EMPTY), None);
    }

    #[test]
    fn including_grows_to_union() {
        let a = Rectangle::new(0.0, 0.0, 1.0, 1.0);
        let b = Rectangle::new(2.0, -1.0, 3.0, 0.5);
        assert_eq!(a.including(&b), Rectangle::new(0.0, -1.0, 3.0, 1.0));
        assert_eq!(Rectangle::EMPTY.including(&b), b);
        assert_eq!(a.including(&Rectangle::EMPTY), a);
    }

    #[test]
    fn equality_distinguishes_empty_from_zero_area() {
        let point = Rectangle::new(0.0, 0.0, 0.0, 0.0);
        assert_ne!(point, Rectangle::EMPTY);
        assert_eq!(Rectangle::EMPTY, Rectangle::default());
        assert_eq!(
            hash_of(&Rectangle::new(-0.0, 0.0, 1.0, 1.0)),
            hash_of(&Rectangle::new(0.0, 0.0, 1.0, 1.0))
        );
    }

    #[test]
    fn from_corners_accepts_glam_points() {
        let r = Rectangle::from_corners(DVec2::new(3.0, 4.0), DVec2::new(1.0, 0.0));
        assert_eq!(r, Rectangle::new(1.0, 0.0, 3.0, 4.0));
        assert_eq!(r.center(), DVec2::new(2.0, 2.0));
        assert_eq!(r.size(), DVec2::new(2.0, 4.0));
    }
}
