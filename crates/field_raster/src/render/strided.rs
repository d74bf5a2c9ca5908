//! The generic strided render loop.
//!
//! A [`SourceGrid`] places one sample point per target cell: the first cell samples
//! `start`, and each further column or row advances by `step`. Writes go through a
//! [`RasterLayout`], so the same loop fills dense, planar and interleaved buffers.
use glam::DVec2;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::field::Field;
use crate::geometry::Bounds;
use crate::raster::RasterLayout;

/// Source-space sampling lattice for a render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceGrid {
    /// Source coordinate of cell `(0, 0)`.
    pub start: DVec2,
    /// Source distance between neighbouring cells.
    pub step: DVec2,
    /// Footprint passed to every sample.
    pub sample_size: f64,
}

impl SourceGrid {
    pub fn new(start: DVec2, step: DVec2, sample_size: f64) -> Self {
        Self {
            start,
            step,
            sample_size,
        }
    }

    /// Lattice with corner samples on the corners of `area`.
    ///
    /// A single column or row gets a zero step on that axis. The footprint is the mean
    /// step times the area's average extent.
    pub fn for_area(area: &dyn Bounds, size_x: usize, size_y: usize) -> Result<Self> {
        if area.is_empty() {
            return Err(Error::EmptyArea);
        }
        if size_x == 0 || size_y == 0 {
            return Err(Error::InvalidArgument(format!(
                "target size must be > 0, got {size_x}x{size_y}"
            )));
        }
        let step_for = |extent: f64, cells: usize| {
            if cells > 1 {
                extent / (cells - 1) as f64
            } else {
                0.0
            }
        };
        let step = DVec2::new(
            step_for(area.width(), size_x),
            step_for(area.height(), size_y),
        );
        if !step.is_finite() || !area.min_x().is_finite() || !area.min_y().is_finite() {
            return Err(Error::InvalidArgument("source area must be finite".into()));
        }
        let sample_size = (step.x + step.y) * 0.5 * area.size_average();
        Ok(Self::new(
            DVec2::new(area.min_x(), area.min_y()),
            step,
            sample_size,
        ))
    }

    /// Source y coordinate of row `y`.
    #[inline]
    pub fn row_y(&self, y: usize) -> f64 {
        self.start.y + self.step.y * y as f64
    }

    /// Source coordinate of cell `(x, y)`.
    #[inline]
    pub fn point(&self, x: usize, y: usize) -> DVec2 {
        self.start + self.step * DVec2::new(x as f64, y as f64)
    }
}

/// Fills one row. `row[0]` is the row's first cell; cells follow every `x_step` elements.
#[inline]
pub(crate) fn render_row<F: Field + ?Sized>(
    field: &F,
    row: &mut [f32],
    layout: &RasterLayout,
    grid: &SourceGrid,
    y: usize,
) {
    let sy = grid.row_y(y);
    let mut sx = grid.start.x;
    for cell in row.iter_mut().step_by(layout.x_step).take(layout.size_x) {
        *cell = field.sample(sx, sy, grid.sample_size);
        sx += grid.step.x;
    }
}

/// Samples `field` at every cell of `layout` inside `data`.
///
/// Each cell is written exactly once, cells outside the layout are untouched.
pub fn render_strided<F: Field + ?Sized>(
    field: &F,
    data: &mut [f32],
    layout: &RasterLayout,
    grid: &SourceGrid,
) -> Result<()> {
    layout.validate(data.len())?;
    debug!(
        "Rendering {}x{} cells (x_step {}, y_skip {}).",
        layout.size_x, layout.size_y, layout.x_step, layout.y_skip
    );
    for y in 0..layout.size_y {
        let start = layout.index(0, y);
        render_row(field, &mut data[start..], layout, grid, y);
    }
    Ok(())
}

/// Parallel [`render_strided`]: rows are rendered concurrently on the rayon pool.
///
/// Produces the same values as the sequential loop.
#[cfg(feature = "parallel")]
pub fn render_strided_par<F: Field + ?Sized>(
    field: &F,
    data: &mut [f32],
    layout: &RasterLayout,
    grid: &SourceGrid,
) -> Result<()> {
    layout.validate(data.len())?;
    debug!(
        "Rendering {}x{} cells in parallel.",
        layout.size_x, layout.size_y
    );
    data[layout.offset..]
        .par_chunks_mut(layout.row_stride())
        .take(layout.size_y)
        .enumerate()
        .for_each(|(y, row)| render_row(field, row, layout, grid, y));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::field::{ConstantField, FnField};
    use crate::geometry::Rectangle;

    #[test]
    fn four_by_four_visits_every_index_once() {
        let layout = RasterLayout::planar(4, 4).unwrap();
        let grid = SourceGrid::for_area(&Rectangle::UNIT, 4, 4).unwrap();
        let counter = Mutex::new(0.0f32);
        let field = FnField::new(|_, _, _| {
            let mut c = counter.lock().unwrap();
            let v = *c;
            *c += 1.0;
            v
        });
        let mut data = vec![-1.0; 16];
        render_strided(&field, &mut data, &layout, &grid).unwrap();
        let expected: Vec<f32> = (0..16).map(|i| i as f32).collect();
        assert_eq!(data, expected);
    }

    #[test]
    fn grid_matches_area_and_size() {
        let grid = SourceGrid::for_area(&Rectangle::new(0.0, 0.0, 2.0, 1.0), 5, 3).unwrap();
        assert_eq!(grid.start, DVec2::ZERO);
        assert_eq!(grid.step, DVec2::new(0.5, 0.5));
        // mean step 0.5 times average extent 1.5
        assert!((grid.sample_size - 0.75).abs() < 1e-12);
        assert_eq!(grid.point(4, 2), DVec2::new(2.0, 1.0));
    }

    #[test]
    fn single_row_target_uses_zero_step() {
        let grid = SourceGrid::for_area(&Rectangle::new(1.0, 2.0, 3.0, 4.0), 3, 1).unwrap();
        assert_eq!(grid.step, DVec2::new(1.0, 0.0));
        assert!(grid.sample_size.is_finite());
    }

    #[test]
    fn rejects_empty_area_and_zero_size() {
        assert!(matches!(
            SourceGrid::for_area(&Rectangle::EMPTY, 4, 4),
            Err(Error::EmptyArea)
        ));
        assert!(matches!(
            SourceGrid::for_area(&Rectangle::UNIT, 0, 4),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn strided_layout_leaves_gaps_untouched() {
        // Interleaved pair: this view owns the odd slots.
        let layout = RasterLayout::with_strides(2, 2, 1, 2, 0).unwrap();
        let grid = SourceGrid::for_area(&Rectangle::UNIT, 2, 2).unwrap();
        let mut data = vec![-1.0; 8];
        render_strided(&ConstantField::new(3.0), &mut data, &layout, &grid).unwrap();
        assert_eq!(data, vec![-1.0, 3.0, -1.0, 3.0, -1.0, 3.0, -1.0, 3.0]);
    }

    #[test]
    fn y_skip_rows_are_skipped() {
        let layout = RasterLayout::with_strides(2, 2, 0, 1, 1).unwrap();
        let grid = SourceGrid::for_area(&Rectangle::UNIT, 2, 2).unwrap();
        let mut data = vec![-1.0; 5];
        let field = FnField::new(|x, y, _| (x + 2.0 * y) as f32);
        render_strided(&field, &mut data, &layout, &grid).unwrap();
        assert_eq!(data, vec![0.0, 1.0, -1.0, 2.0, 3.0]);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let layout = RasterLayout::planar(4, 4).unwrap();
        let grid = SourceGrid::for_area(&Rectangle::UNIT, 4, 4).unwrap();
        let mut data = vec![0.0; 15];
        assert!(matches!(
            render_strided(&ConstantField::new(1.0), &mut data, &layout, &grid),
            Err(Error::InvalidLayout(_))
        ));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let layout = RasterLayout::with_strides(37, 23, 2, 3, 5).unwrap();
        let grid = SourceGrid::for_area(&Rectangle::new(-3.0, 1.0, 4.0, 9.0), 37, 23).unwrap();
        let field = FnField::new(|x, y, s| (x.sin() * y.cos() + s) as f32);
        let len = layout.required_len().unwrap();
        let mut a = vec![-7.0; len];
        let mut b = vec![-7.0; len];
        render_strided(&field, &mut a, &layout, &grid).unwrap();
        render_strided_par(&field, &mut b, &layout, &grid).unwrap();
        assert_eq!(a, b);
    }
}
