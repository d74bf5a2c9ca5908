//! Single-channel raster views over flat `f32` buffers.
//!
//! A [`Raster`] is a [`RasterLayout`] plus a storage container. The container decides
//! ownership: `Vec<f32>` owns its samples, `&[f32]` and `&mut [f32]` borrow a buffer that
//! may be shared with other channel views, and `Arc<[f32]>` shares read-only samples
//! across threads. The layout is validated once, at construction.
use std::sync::Arc;

use super::filter;
use super::layout::RasterLayout;
use crate::error::{Error, Result};

/// A 2D grid of samples addressed through a strided layout.
#[derive(Clone, Debug)]
pub struct Raster<S = Vec<f32>> {
    data: S,
    layout: RasterLayout,
}

impl Raster<Vec<f32>> {
    /// Allocates a zeroed, densely packed raster.
    pub fn new(size_x: usize, size_y: usize) -> Result<Self> {
        Self::filled(size_x, size_y, 0.0)
    }

    /// Allocates a densely packed raster with every cell set to `value`.
    pub fn filled(size_x: usize, size_y: usize, value: f32) -> Result<Self> {
        let layout = RasterLayout::planar(size_x, size_y)?;
        Ok(Self {
            data: vec![value; layout.len()],
            layout,
        })
    }

    /// Wraps row-major samples. `data.len()` must equal `size_x * size_y`.
    pub fn from_vec(size_x: usize, size_y: usize, data: Vec<f32>) -> Result<Self> {
        let layout = RasterLayout::planar(size_x, size_y)?;
        if data.len() != layout.len() {
            return Err(Error::InvalidLayout(format!(
                "expected {} samples for a {size_x}x{size_y} raster, got {}",
                layout.len(),
                data.len()
            )));
        }
        Ok(Self { data, layout })
    }

    /// Converts into shared, read-only storage.
    pub fn into_shared(self) -> Raster<Arc<[f32]>> {
        Raster {
            data: Arc::from(self.data),
            layout: self.layout,
        }
    }
}

impl<S: AsRef<[f32]>> Raster<S> {
    /// Wraps an existing buffer, validating that `layout` stays inside it.
    pub fn from_parts(data: S, layout: RasterLayout) -> Result<Self> {
        layout.validate(data.as_ref().len())?;
        Ok(Self { data, layout })
    }

    /// For layouts already validated against this buffer length.
    pub(crate) fn from_validated(data: S, layout: RasterLayout) -> Self {
        debug_assert!(
            layout.validate(data.as_ref().len()).is_ok(),
            "layout must be validated against the buffer"
        );
        Self { data, layout }
    }

    pub fn layout(&self) -> &RasterLayout {
        &self.layout
    }

    pub fn size_x(&self) -> usize {
        self.layout.size_x
    }

    pub fn size_y(&self) -> usize {
        self.layout.size_y
    }

    /// `(size_x, size_y)`.
    pub fn size(&self) -> (usize, usize) {
        (self.layout.size_x, self.layout.size_y)
    }

    /// `true` if this view exclusively and densely covers its buffer prefix.
    pub fn is_data_interleaved(&self) -> bool {
        self.layout.is_data_interleaved()
    }

    /// The whole backing buffer, including cells of aliasing views.
    pub fn data(&self) -> &[f32] {
        self.data.as_ref()
    }

    pub fn into_inner(self) -> S {
        self.data
    }

    /// Reads cell `(x, y)`.
    pub fn get_value(&self, x: usize, y: usize) -> Result<f32> {
        self.check_cell(x, y)?;
        Ok(self.data.as_ref()[self.layout.index(x, y)])
    }

    /// Bilinear sample at grid coordinates, clamped to the grid.
    pub fn sample_value(&self, x: f64, y: f64) -> f32 {
        filter::bilinear(self.data.as_ref(), &self.layout, x, y)
    }

    /// Filtered sample with a footprint of half-width `sample_size` cells.
    ///
    /// A size of zero is the maximum-detail bilinear sample.
    pub fn sample_value_with(&self, x: f64, y: f64, sample_size: f64) -> f32 {
        filter::box_filtered(self.data.as_ref(), &self.layout, x, y, sample_size)
    }

    /// Value of the nearest cell, clamped to the grid.
    pub fn sample_nearest(&self, x: f64, y: f64) -> f32 {
        filter::nearest(self.data.as_ref(), &self.layout, x, y)
    }

    /// Borrowed read-only view with the same layout.
    pub fn as_view(&self) -> Raster<&[f32]> {
        Raster {
            data: self.data.as_ref(),
            layout: self.layout,
        }
    }

    /// Copies the cells into a dense row-major vector.
    pub fn to_vec(&self) -> Vec<f32> {
        let data = self.data.as_ref();
        let mut out = Vec::with_capacity(self.layout.len());
        for y in 0..self.layout.size_y {
            for x in 0..self.layout.size_x {
                out.push(data[self.layout.index(x, y)]);
            }
        }
        out
    }

    fn check_cell(&self, x: usize, y: usize) -> Result<()> {
        if self.layout.contains_cell(x, y) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                x,
                y,
                size_x: self.layout.size_x,
                size_y: self.layout.size_y,
            })
        }
    }
}

impl<S: AsRef<[f32]> + AsMut<[f32]>> Raster<S> {
    /// Writes cell `(x, y)`.
    pub fn set_value(&mut self, x: usize, y: usize, value: f32) -> Result<()> {
        self.check_cell(x, y)?;
        let idx = self.layout.index(x, y);
        self.data.as_mut()[idx] = value;
        Ok(())
    }

    /// Sets every cell of this view. Cells of aliasing views are left alone.
    pub fn fill(&mut self, value: f32) {
        let layout = self.layout;
        let data = self.data.as_mut();
        for y in 0..layout.size_y {
            for x in 0..layout.size_x {
                data[layout.index(x, y)] = value;
            }
        }
    }

    /// The whole backing buffer, mutably.
    pub fn data_mut(&mut self) -> &mut [f32] {
        self.data.as_mut()
    }

    /// Borrowed mutable view with the same layout.
    pub fn as_view_mut(&mut self) -> Raster<&mut [f32]> {
        Raster {
            data: self.data.as_mut(),
            layout: self.layout,
        }
    }

    /// Splits into the buffer and the layout, e.g. to hand both to a render loop.
    pub(crate) fn parts_mut(&mut self) -> (&mut [f32], &RasterLayout) {
        (self.data.as_mut(), &self.layout)
    }
}
