//! Unit square to rectangle warping.
use crate::geometry::{Bounds, Rectangle};
use crate::warp::Warping;

/// Treats input as unit-square coordinates and maps them onto `target`.
///
/// Non-zero sample sizes are scaled by the target's average extent. An empty target
/// collapses every coordinate to `0.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangleWarping {
    target: Rectangle,
}

impl RectangleWarping {
    pub fn new(target: Rectangle) -> Self {
        Self { target }
    }

    /// Warping onto the current bounds of any rectangle flavor.
    pub fn from_bounds(target: &dyn Bounds) -> Self {
        Self::new(target.to_rectangle())
    }

    pub fn target(&self) -> &Rectangle {
        &self.target
    }
}

impl Warping for RectangleWarping {
    fn warp_x(&self, x: f64, _y: f64) -> f64 {
        self.target.mapped_x(x)
    }

    fn warp_y(&self, _x: f64, y: f64) -> f64 {
        self.target.mapped_y(y)
    }

    fn warp_sample_size(&self, _x: f64, _y: f64, sample_size: f64) -> f64 {
        if sample_size == 0.0 {
            return 0.0;
        }
        sample_size * self.target.size_average()
    }
}
