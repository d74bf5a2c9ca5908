//! Strided addressing of a 2D grid inside a flat buffer.
//!
//! A [`RasterLayout`] maps cell `(x, y)` to
//! `offset + y * (size_x * x_step + y_skip) + x * x_step`. The same vocabulary is used
//! by rasters, by the render loop and by multi-raster channel views, so any of them can
//! address any other's backing buffer without copying.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Offset and strides of one grid inside a flat `f32` buffer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RasterLayout {
    /// Number of cells along X.
    pub size_x: usize,
    /// Number of cells along Y.
    pub size_y: usize,
    /// Buffer index of cell `(0, 0)`.
    pub offset: usize,
    /// Distance between horizontally adjacent cells, at least 1.
    pub x_step: usize,
    /// Extra elements skipped at the end of each row.
    pub y_skip: usize,
}

impl RasterLayout {
    /// Dense row-major layout: offset 0, x-step 1, no row padding.
    pub fn planar(size_x: usize, size_y: usize) -> Result<Self> {
        Self::with_strides(size_x, size_y, 0, 1, 0)
    }

    /// Layout with explicit strides. Checks sizes and x-step, not a buffer length.
    pub fn with_strides(
        size_x: usize,
        size_y: usize,
        offset: usize,
        x_step: usize,
        y_skip: usize,
    ) -> Result<Self> {
        let layout = Self {
            size_x,
            size_y,
            offset,
            x_step,
            y_skip,
        };
        layout.check_shape()?;
        Ok(layout)
    }

    /// Number of cells. Saturates for shapes that overflow `usize`, which a checked
    /// constructor never produces.
    pub fn len(&self) -> usize {
        self.size_x.saturating_mul(self.size_y)
    }

    /// Number of cells, or `None` on overflow.
    pub fn checked_len(&self) -> Option<usize> {
        self.size_x.checked_mul(self.size_y)
    }

    /// Always `false` for a validated layout.
    pub fn is_empty(&self) -> bool {
        self.size_x == 0 || self.size_y == 0
    }

    /// Distance in elements between the starts of two consecutive rows.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.size_x * self.x_step + self.y_skip
    }

    /// Buffer index of cell `(x, y)`. Does not check bounds.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        self.offset + y * self.row_stride() + x * self.x_step
    }

    pub fn contains_cell(&self, x: usize, y: usize) -> bool {
        x < self.size_x && y < self.size_y
    }

    /// Minimum buffer length that holds every addressed cell, or `None` on overflow.
    pub fn required_len(&self) -> Option<usize> {
        if self.is_empty() {
            return Some(self.offset);
        }
        let row_stride = self
            .size_x
            .checked_mul(self.x_step)?
            .checked_add(self.y_skip)?;
        let last_row = (self.size_y - 1).checked_mul(row_stride)?;
        let last_col = (self.size_x - 1).checked_mul(self.x_step)?;
        self.offset
            .checked_add(last_row)?
            .checked_add(last_col)?
            .checked_add(1)
    }

    /// Checks the layout against a backing buffer of `len` elements.
    pub fn validate(&self, len: usize) -> Result<()> {
        self.check_shape()?;
        match self.required_len() {
            Some(required) if required <= len => Ok(()),
            Some(required) => Err(Error::InvalidLayout(format!(
                "layout addresses {required} elements but the buffer holds {len}"
            ))),
            None => Err(Error::InvalidLayout(
                "layout addressing overflows usize".into(),
            )),
        }
    }

    /// `true` for the exclusive dense case: offset 0, x-step 1 and no row skip.
    pub fn is_data_interleaved(&self) -> bool {
        self.offset == 0 && self.x_step == 1 && self.y_skip == 0
    }

    fn check_shape(&self) -> Result<()> {
        if self.size_x == 0 || self.size_y == 0 {
            return Err(Error::InvalidArgument(format!(
                "raster size must be > 0, got {}x{}",
                self.size_x, self.size_y
            )));
        }
        if self.x_step == 0 {
            return Err(Error::InvalidArgument("x_step must be >= 1".into()));
        }
        if self.checked_len().is_none() || self.required_len().is_none() {
            return Err(Error::InvalidLayout(format!(
                "a {}x{} layout overflows usize addressing",
                self.size_x, self.size_y
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_layout_is_dense() {
        let layout = RasterLayout::planar(4, 3).unwrap();
        assert!(layout.is_data_interleaved());
        assert_eq!(layout.row_stride(), 4);
        assert_eq!(layout.index(3, 2), 11);
        assert_eq!(layout.required_len(), Some(12));
    }

    #[test]
    fn strided_layout_addresses_interleaved_channel() {
        let green = RasterLayout::with_strides(2, 2, 1, 3, 0).unwrap();
        assert_eq!(green.index(1, 0), 4);
        assert_eq!(green.index(0, 1), 7);
        assert_eq!(green.required_len(), Some(11));
        assert!(!green.is_data_interleaved());
    }

    #[test]
    fn y_skip_pads_rows() {
        let layout = RasterLayout::with_strides(3, 2, 2, 1, 5).unwrap();
        assert_eq!(layout.row_stride(), 8);
        assert_eq!(layout.index(0, 1), 10);
        assert_eq!(layout.required_len(), Some(13));
    }

    #[test]
    fn rejects_zero_size_and_zero_step() {
        assert!(matches!(
            RasterLayout::planar(0, 4),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            RasterLayout::with_strides(2, 2, 0, 0, 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn validate_checks_buffer_length() {
        let layout = RasterLayout::with_strides(2, 2, 1, 3, 0).unwrap();
        assert!(layout.validate(11).is_ok());
        assert!(matches!(layout.validate(10), Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn validate_reports_overflow() {
        let layout = RasterLayout {
            size_x: usize::MAX,
            size_y: 2,
            offset: 0,
            x_step: 2,
            y_skip: 0,
        };
        assert!(matches!(layout.validate(16), Err(Error::InvalidLayout(_))));
        assert_eq!(layout.len(), usize::MAX);
        assert_eq!(layout.checked_len(), None);
        assert!(!layout.is_empty());
    }

    #[test]
    fn constructors_reject_overflowing_shapes() {
        assert!(matches!(
            RasterLayout::planar(usize::MAX, 2),
            Err(Error::InvalidLayout(_))
        ));
        assert!(matches!(
            RasterLayout::with_strides(1 << 20, 1 << 20, 0, 1 << 30, 0),
            Err(Error::InvalidLayout(_))
        ));
    }
}
