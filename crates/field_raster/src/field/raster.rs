//! Raster-backed fields.
//!
//! Both fields stretch the raster's cell centers over a domain rectangle: cell `(0, 0)`
//! sits on the domain minimum and cell `(size_x - 1, size_y - 1)` on the maximum. The
//! sample size is converted from domain units to cells before filtering.
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::field::Field;
use crate::geometry::{Bounds, Rectangle};
use crate::raster::{MultiRaster, Raster, RasterLayout};

#[derive(Clone, Copy, Debug, PartialEq)]
struct GridMapping {
    domain: Rectangle,
    cells_per_unit_x: f64,
    cells_per_unit_y: f64,
}

impl GridMapping {
    fn new(domain: Rectangle, size_x: usize, size_y: usize) -> Self {
        let per_unit = |cells: usize, extent: f64| {
            if extent > 0.0 {
                (cells - 1) as f64 / extent
            } else {
                0.0
            }
        };
        Self {
            domain,
            cells_per_unit_x: per_unit(size_x, domain.width()),
            cells_per_unit_y: per_unit(size_y, domain.height()),
        }
    }

    fn checked(domain: &dyn Bounds, size_x: usize, size_y: usize) -> Result<Self> {
        if domain.is_empty() {
            return Err(Error::EmptyArea);
        }
        Ok(Self::new(domain.to_rectangle(), size_x, size_y))
    }

    #[inline]
    fn to_grid(&self, x: f64, y: f64, sample_size: f64) -> (f64, f64, f64) {
        let gx = (x - self.domain.min_x()) * self.cells_per_unit_x;
        let gy = (y - self.domain.min_y()) * self.cells_per_unit_y;
        let scale = (self.cells_per_unit_x + self.cells_per_unit_y) * 0.5;
        (gx, gy, sample_size * scale)
    }
}

/// A single raster stretched over a domain rectangle.
#[derive(Clone, Debug)]
pub struct RasterField<S = Arc<[f32]>> {
    raster: Raster<S>,
    mapping: GridMapping,
}

impl<S: AsRef<[f32]>> RasterField<S> {
    /// Maps the raster onto the unit square.
    pub fn new(raster: Raster<S>) -> Self {
        let mapping = GridMapping::new(Rectangle::UNIT, raster.size_x(), raster.size_y());
        Self { raster, mapping }
    }

    /// Maps the raster onto `domain`. Fails with [`Error::EmptyArea`] for an empty domain.
    pub fn with_domain(raster: Raster<S>, domain: &dyn Bounds) -> Result<Self> {
        let mapping = GridMapping::checked(domain, raster.size_x(), raster.size_y())?;
        Ok(Self { raster, mapping })
    }

    pub fn raster(&self) -> &Raster<S> {
        &self.raster
    }

    pub fn domain(&self) -> &Rectangle {
        &self.mapping.domain
    }
}

impl<S: AsRef<[f32]> + Send + Sync> Field for RasterField<S> {
    fn sample(&self, x: f64, y: f64, sample_size: f64) -> f32 {
        let (gx, gy, gs) = self.mapping.to_grid(x, y, sample_size);
        self.raster.sample_value_with(gx, gy, gs)
    }
}

/// One channel of a shared [`MultiRaster`] stretched over a domain rectangle.
#[derive(Clone, Debug)]
pub struct RasterChannelField {
    source: Arc<MultiRaster>,
    layout: RasterLayout,
    mapping: GridMapping,
}

impl RasterChannelField {
    pub fn new(source: Arc<MultiRaster>, channel: &str, domain: &dyn Bounds) -> Result<Self> {
        let layout = source
            .channel_layout(channel)
            .ok_or_else(|| Error::UnknownChannel { id: channel.into() })?;
        let mapping = GridMapping::checked(domain, layout.size_x, layout.size_y)?;
        Ok(Self {
            source,
            layout,
            mapping,
        })
    }

    pub fn domain(&self) -> &Rectangle {
        &self.mapping.domain
    }
}

impl Field for RasterChannelField {
    fn sample(&self, x: f64, y: f64, sample_size: f64) -> f32 {
        let (gx, gy, gs) = self.mapping.to_grid(x, y, sample_size);
        Raster::from_validated(self.source.data(), self.layout).sample_value_with(gx, gy, gs)
    }
}
