//! General affine warping backed by `glam`.
use glam::{DAffine2, DVec2};

use crate::warp::Warping;

/// Applies a 2D affine transform. Sample sizes scale by `sqrt(|det|)` of the linear part.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineWarping {
    transform: DAffine2,
    size_scale: f64,
}

impl AffineWarping {
    pub fn new(transform: DAffine2) -> Self {
        Self {
            transform,
            size_scale: transform.matrix2.determinant().abs().sqrt(),
        }
    }

    pub fn translation(offset: DVec2) -> Self {
        Self::new(DAffine2::from_translation(offset))
    }

    pub fn scale(factor: DVec2) -> Self {
        Self::new(DAffine2::from_scale(factor))
    }

    /// Rotation by `angle` radians about `center`.
    pub fn rotation_about(center: DVec2, angle: f64) -> Self {
        Self::new(
            DAffine2::from_translation(center)
                * DAffine2::from_angle(angle)
                * DAffine2::from_translation(-center),
        )
    }

    pub fn transform(&self) -> &DAffine2 {
        &self.transform
    }
}

impl Warping for AffineWarping {
    fn warp_x(&self, x: f64, y: f64) -> f64 {
        self.warp(DVec2::new(x, y)).x
    }

    fn warp_y(&self, x: f64, y: f64) -> f64 {
        self.warp(DVec2::new(x, y)).y
    }

    fn warp_sample_size(&self, _x: f64, _y: f64, sample_size: f64) -> f64 {
        sample_size * self.size_scale
    }

    fn warp(&self, p: DVec2) -> DVec2 {
        self.transform.transform_point2(p)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    fn approx(a: DVec2, b: DVec2) {
        assert!((a - b).length() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn scale_and_translation() {
        let w = AffineWarping::scale(DVec2::new(2.0, 8.0));
        approx(w.warp(DVec2::new(1.0, 1.0)), DVec2::new(2.0, 8.0));
        assert!((w.warp_sample_size(0.0, 0.0, 1.0) - 4.0).abs() < 1e-12);

        let t = AffineWarping::translation(DVec2::new(-1.0, 3.0));
        approx(t.warp(DVec2::ZERO), DVec2::new(-1.0, 3.0));
        assert_eq!(t.warp_sample_size(0.0, 0.0, 0.5), 0.5);
    }

    #[test]
    fn rotation_keeps_center_and_sample_size() {
        let c = DVec2::new(0.5, 0.5);
        let w = AffineWarping::rotation_about(c, FRAC_PI_2);
        approx(w.warp(c), c);
        approx(w.warp(DVec2::new(1.0, 0.5)), DVec2::new(0.5, 1.0));
        assert!((w.warp_sample_size(0.0, 0.0, 0.2) - 0.2).abs() < 1e-12);
        assert_eq!(w.warp_sample_size(0.0, 0.0, 0.0), 0.0);
    }
}
