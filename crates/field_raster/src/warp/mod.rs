//! Coordinate warping applied before a field is sampled.
//!
//! A [`Warping`] maps a coordinate from the space a caller renders in to the space a
//! field is defined in, together with the sample-size footprint. Warpings compose with
//! [`WarpingExt::then`]; a zero sample size stays zero through every warping shipped here.
use std::sync::Arc;

use glam::DVec2;

pub mod affine;
pub mod rectangle;

pub use affine::AffineWarping;
pub use rectangle::RectangleWarping;

/// Pure coordinate transform.
pub trait Warping: Send + Sync {
    fn warp_x(&self, x: f64, y: f64) -> f64;
    fn warp_y(&self, x: f64, y: f64) -> f64;

    /// Footprint at the warped location for a footprint of `sample_size` at `(x, y)`.
    fn warp_sample_size(&self, x: f64, y: f64, sample_size: f64) -> f64;

    fn warp(&self, p: DVec2) -> DVec2 {
        DVec2::new(self.warp_x(p.x, p.y), self.warp_y(p.x, p.y))
    }
}

impl<W: Warping + ?Sized> Warping for Box<W> {
    fn warp_x(&self, x: f64, y: f64) -> f64 {
        (**self).warp_x(x, y)
    }

    fn warp_y(&self, x: f64, y: f64) -> f64 {
        (**self).warp_y(x, y)
    }

    fn warp_sample_size(&self, x: f64, y: f64, sample_size: f64) -> f64 {
        (**self).warp_sample_size(x, y, sample_size)
    }

    fn warp(&self, p: DVec2) -> DVec2 {
        (**self).warp(p)
    }
}

impl<W: Warping + ?Sized> Warping for Arc<W> {
    fn warp_x(&self, x: f64, y: f64) -> f64 {
        (**self).warp_x(x, y)
    }

    fn warp_y(&self, x: f64, y: f64) -> f64 {
        (**self).warp_y(x, y)
    }

    fn warp_sample_size(&self, x: f64, y: f64, sample_size: f64) -> f64 {
        (**self).warp_sample_size(x, y, sample_size)
    }

    fn warp(&self, p: DVec2) -> DVec2 {
        (**self).warp(p)
    }
}

/// Leaves coordinates and sample sizes untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityWarping;

impl Warping for IdentityWarping {
    fn warp_x(&self, x: f64, _y: f64) -> f64 {
        x
    }

    fn warp_y(&self, _x: f64, y: f64) -> f64 {
        y
    }

    fn warp_sample_size(&self, _x: f64, _y: f64, sample_size: f64) -> f64 {
        sample_size
    }
}

/// Applies `first`, then `second`.
#[derive(Clone, Debug)]
pub struct ComposedWarping<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: Warping, B: Warping> Warping for ComposedWarping<A, B> {
    fn warp_x(&self, x: f64, y: f64) -> f64 {
        self.warp(DVec2::new(x, y)).x
    }

    fn warp_y(&self, x: f64, y: f64) -> f64 {
        self.warp(DVec2::new(x, y)).y
    }

    fn warp_sample_size(&self, x: f64, y: f64, sample_size: f64) -> f64 {
        let mid = self.first.warp(DVec2::new(x, y));
        let size = self.first.warp_sample_size(x, y, sample_size);
        self.second.warp_sample_size(mid.x, mid.y, size)
    }

    fn warp(&self, p: DVec2) -> DVec2 {
        self.second.warp(self.first.warp(p))
    }
}

/// Combinators available on every [`Warping`].
pub trait WarpingExt: Warping + Sized {
    /// Chains `next` after `self`.
    fn then<W: Warping>(self, next: W) -> ComposedWarping<Self, W> {
        ComposedWarping {
            first: self,
            second: next,
        }
    }
}

impl<W: Warping> WarpingExt for W {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;

    #[test]
    fn identity_is_a_no_op() {
        let w = IdentityWarping;
        assert_eq!(w.warp(DVec2::new(3.0, -2.0)), DVec2::new(3.0, -2.0));
        assert_eq!(w.warp_sample_size(0.0, 0.0, 0.25), 0.25);
    }

    #[test]
    fn composition_applies_in_order() {
        let zoom = RectangleWarping::new(Rectangle::new(0.0, 0.0, 0.5, 0.5));
        let world = RectangleWarping::new(Rectangle::new(10.0, 10.0, 30.0, 50.0));
        let w = zoom.then(world);

        let p = w.warp(DVec2::new(1.0, 1.0));
        assert_eq!(p, DVec2::new(20.0, 30.0));
        assert_eq!(w.warp_x(0.0, 0.0), 10.0);

        // 0.5 average extent, then 30 average extent.
        assert!((w.warp_sample_size(0.0, 0.0, 0.1) - 1.5).abs() < 1e-12);
        assert_eq!(w.warp_sample_size(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn boxed_and_shared_warpings_delegate() {
        let boxed: Box<dyn Warping> = Box::new(RectangleWarping::new(Rectangle::from_size(2.0, 2.0)));
        assert_eq!(boxed.warp(DVec2::new(0.5, 0.5)), DVec2::new(1.0, 1.0));
        let shared: Arc<dyn Warping> = Arc::new(IdentityWarping);
        assert_eq!(shared.warp_y(1.0, 4.0), 4.0);
    }
}
