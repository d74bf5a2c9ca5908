use crate::field::Field;
use crate::warp::Warping;

/// Samples `field` at warped coordinates with a warped footprint.
#[derive(Clone, Debug)]
pub struct WarpedField<F, W> {
    field: F,
    warping: W,
}

impl<F: Field, W: Warping> WarpedField<F, W> {
    pub fn new(field: F, warping: W) -> Self {
        Self { field, warping }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn warping(&self) -> &W {
        &self.warping
    }

    pub fn into_parts(self) -> (F, W) {
        (self.field, self.warping)
    }
}

impl<F: Field, W: Warping> Field for WarpedField<F, W> {
    fn sample(&self, x: f64, y: f64, sample_size: f64) -> f32 {
        let w = &self.warping;
        self.field.sample(
            w.warp_x(x, y),
            w.warp_y(x, y),
            w.warp_sample_size(x, y, sample_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldExt, FnField};
    use crate::geometry::Rectangle;
    use crate::raster::Raster;
    use crate::warp::RectangleWarping;

    #[test]
    fn samples_through_the_warping() {
        let f = FnField::new(|x, y, s| (x * 100.0 + y + s * 1000.0) as f32)
            .warped(RectangleWarping::new(Rectangle::new(2.0, 4.0, 6.0, 8.0)));
        assert_eq!(f.sample(0.0, 0.0, 0.0), 204.0);
        assert_eq!(f.sample(1.0, 1.0, 0.0), 608.0);
        // 0.25 * average extent 4.
        assert_eq!(f.sample(0.0, 0.0, 0.25), 1204.0);
    }

    #[test]
    fn renders_like_the_equivalent_area() {
        let inner = FnField::new(|x, y, _| (x * 3.0 - y) as f32);
        let area = Rectangle::new(-1.0, -1.0, 1.0, 3.0);
        let warped = (&inner).warped(RectangleWarping::new(area));

        let mut a = Raster::new(4, 3).unwrap();
        let mut b = Raster::new(4, 3).unwrap();
        warped.render_to_raster(&mut a).unwrap();
        inner.render_area_to_raster(&mut b, &area).unwrap();
        for (l, r) in a.data().iter().zip(b.data()) {
            assert!((l - r).abs() < 1e-5, "{l} vs {r}");
        }
    }
}
