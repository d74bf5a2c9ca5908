//! Extracting 1D sample sequences from fields.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::Field;

/// Closed `[start, end]` interval along x used by [`sample_sequence`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainRange {
    pub start: f64,
    pub end: f64,
}

impl DomainRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// Samples `count` evenly spaced points across the field's domain range at height `y`.
///
/// Both range ends are included when `count > 1`; a single sample lands on `start`.
pub fn sample_sequence<F>(field: &F, y: f64, count: usize, sample_size: f64) -> Result<Vec<f32>>
where
    F: Field + ?Sized,
{
    let range = field.domain_range().ok_or_else(|| {
        Error::InvalidArgument("field has no domain range to sample a sequence from".into())
    })?;
    sample_line(
        field,
        DVec2::new(range.start, y),
        DVec2::new(range.end, y),
        count,
        sample_size,
    )
}

/// Samples `count` evenly spaced points on the segment `from..=to`.
pub fn sample_line<F>(
    field: &F,
    from: DVec2,
    to: DVec2,
    count: usize,
    sample_size: f64,
) -> Result<Vec<f32>>
where
    F: Field + ?Sized,
{
    if count == 0 {
        return Err(Error::InvalidArgument("count must be > 0".into()));
    }
    let step = if count > 1 {
        (to - from) / (count - 1) as f64
    } else {
        DVec2::ZERO
    };
    Ok((0..count)
        .map(|i| {
            let p = from + step * i as f64;
            field.sample(p.x, p.y, sample_size)
        })
        .collect())
}
