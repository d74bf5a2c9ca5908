//! Continuous-domain samplers.
//!
//! A [`Field`] maps `(x, y, sample_size)` to one scalar. `sample_size` is the half-width
//! of the anti-aliasing footprint in the field's own coordinates; zero requests the
//! maximum-detail point sample. A [`MultiField`] groups fields by channel id and compiles
//! [`crate::render::Renderer`]s that fill several channels in one pass.
use std::sync::Arc;

use crate::error::Result;
use crate::geometry::Bounds;
use crate::raster::{Raster, RasterLayout};
use crate::render::strided::{render_strided, SourceGrid};
use crate::warp::Warping;

pub mod constant;
pub mod multi;
pub mod procedural;
pub mod raster;
pub mod sequence;
pub mod warped;

pub use constant::ConstantField;
pub use multi::{FieldSet, MultiField, RasterMultiField};
pub use procedural::{FnField, NoiseField};
pub use raster::{RasterChannelField, RasterField};
pub use sequence::{sample_line, sample_sequence, DomainRange};
pub use warped::WarpedField;

/// A scalar function of continuous 2D coordinates.
pub trait Field: Send + Sync {
    /// Value at `(x, y)` with a footprint of half-width `sample_size`.
    fn sample(&self, x: f64, y: f64, sample_size: f64) -> f32;

    /// Optional `[start, end]` range used by [`sample_sequence`]. Point sampling ignores it.
    fn domain_range(&self) -> Option<DomainRange> {
        None
    }
}

impl<F: Field + ?Sized> Field for &F {
    fn sample(&self, x: f64, y: f64, sample_size: f64) -> f32 {
        (**self).sample(x, y, sample_size)
    }

    fn domain_range(&self) -> Option<DomainRange> {
        (**self).domain_range()
    }
}

impl<F: Field + ?Sized> Field for Box<F> {
    fn sample(&self, x: f64, y: f64, sample_size: f64) -> f32 {
        (**self).sample(x, y, sample_size)
    }

    fn domain_range(&self) -> Option<DomainRange> {
        (**self).domain_range()
    }
}

impl<F: Field + ?Sized> Field for Arc<F> {
    fn sample(&self, x: f64, y: f64, sample_size: f64) -> f32 {
        (**self).sample(x, y, sample_size)
    }

    fn domain_range(&self) -> Option<DomainRange> {
        (**self).domain_range()
    }
}

/// Rendering and composition helpers available on every [`Field`].
pub trait FieldExt: Field {
    /// Fills `data` through `layout`, sampling the source grid described by `grid`.
    fn render_to_slice(
        &self,
        data: &mut [f32],
        layout: &RasterLayout,
        grid: &SourceGrid,
    ) -> Result<()> {
        render_strided(self, data, layout, grid)
    }

    /// Renders the unit square `[0, 1] x [0, 1]` into `raster`.
    fn render_to_raster<S>(&self, raster: &mut Raster<S>) -> Result<()>
    where
        S: AsRef<[f32]> + AsMut<[f32]>,
    {
        self.render_area_to_raster(raster, &crate::geometry::Rectangle::UNIT)
    }

    /// Renders `area` into `raster` with grid samples landing on the area corners.
    ///
    /// Fails with [`crate::error::Error::EmptyArea`] for an empty area.
    fn render_area_to_raster<S>(&self, raster: &mut Raster<S>, area: &dyn Bounds) -> Result<()>
    where
        S: AsRef<[f32]> + AsMut<[f32]>,
    {
        let grid = SourceGrid::for_area(area, raster.size_x(), raster.size_y())?;
        let (data, layout) = raster.parts_mut();
        render_strided(self, data, layout, &grid)
    }

    /// Samples this field through `warping`.
    fn warped<W: Warping>(self, warping: W) -> WarpedField<Self, W>
    where
        Self: Sized,
    {
        WarpedField::new(self, warping)
    }
}

impl<F: Field + ?Sized> FieldExt for F {}
