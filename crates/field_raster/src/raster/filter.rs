//! Continuous reconstruction kernels over a strided grid.
//!
//! Grid coordinates put cell `(i, j)` exactly at `(i, j)`. Coordinates outside
//! `[0, size - 1]` are clamped to the border.
use super::layout::RasterLayout;

/// Wider footprints are evaluated at this half-width.
const MAX_HALF_WIDTH: f64 = 1.0e12;

#[inline]
fn clamp_coord(v: f64, size: usize) -> f64 {
    let max = (size - 1) as f64;
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, max)
    }
}

/// Value of the cell nearest to `(x, y)`.
#[inline]
pub(crate) fn nearest(data: &[f32], layout: &RasterLayout, x: f64, y: f64) -> f32 {
    let gx = clamp_coord(x, layout.size_x).round() as usize;
    let gy = clamp_coord(y, layout.size_y).round() as usize;
    data[layout.index(gx, gy)]
}

/// Bilinear interpolation between the four cells surrounding `(x, y)`.
#[inline]
pub(crate) fn bilinear(data: &[f32], layout: &RasterLayout, x: f64, y: f64) -> f32 {
    let gx = clamp_coord(x, layout.size_x);
    let gy = clamp_coord(y, layout.size_y);

    let x0 = gx.floor() as usize;
    let y0 = gy.floor() as usize;
    let x1 = (x0 + 1).min(layout.size_x - 1);
    let y1 = (y0 + 1).min(layout.size_y - 1);

    let fx = (gx - x0 as f64) as f32;
    let fy = (gy - y0 as f64) as f32;

    let v00 = data[layout.index(x0, y0)];
    let v10 = data[layout.index(x1, y0)];
    let v01 = data[layout.index(x0, y1)];
    let v11 = data[layout.index(x1, y1)];

    let top = v00 + (v10 - v00) * fx;
    let bottom = v01 + (v11 - v01) * fx;
    top + (bottom - top) * fy
}

/// Box average of the bilinear surface over `[x - sample_size, x + sample_size]` on
/// both axes (grid units).
///
/// The integral is exact: every cell under the footprint contributes, partially covered
/// cells with partial weight, and the footprint beyond the border takes the border
/// value. The result is continuous in `sample_size` and equals the bilinear sample at
/// size 0. Non-positive or NaN sizes fall back to a single bilinear tap.
pub(crate) fn box_filtered(
    data: &[f32],
    layout: &RasterLayout,
    x: f64,
    y: f64,
    sample_size: f64,
) -> f32 {
    if !(sample_size > 0.0) {
        return bilinear(data, layout, x, y);
    }

    let half = sample_size.min(MAX_HALF_WIDTH);
    let ax = Footprint::new(x, half, layout.size_x);
    let ay = Footprint::new(y, half, layout.size_y);

    let mut sum = 0.0f64;
    let mut weight_sum = 0.0f64;
    for gy in ay.first..=ay.last {
        let wy = ay.weight(gy);
        if wy == 0.0 {
            continue;
        }
        for gx in ax.first..=ax.last {
            let w = ax.weight(gx) * wy;
            if w != 0.0 {
                sum += w * data[layout.index(gx, gy)] as f64;
                weight_sum += w;
            }
        }
    }
    if weight_sum > 0.0 {
        (sum / weight_sum) as f32
    } else {
        bilinear(data, layout, x, y)
    }
}

/// One axis of a box footprint `[lo, hi]` over `size` cells.
struct Footprint {
    lo: f64,
    hi: f64,
    max: f64,
    last_cell: usize,
    first: usize,
    last: usize,
}

impl Footprint {
    fn new(centre: f64, half: f64, size: usize) -> Self {
        let centre = if centre.is_nan() { 0.0 } else { centre };
        let max = (size - 1) as f64;
        let (lo, hi) = (centre - half, centre + half);
        Self {
            lo,
            hi,
            max,
            last_cell: size - 1,
            first: lo.floor().clamp(0.0, max) as usize,
            last: hi.ceil().clamp(0.0, max) as usize,
        }
    }

    /// Integral over the footprint of cell `i`'s share of the clamped linear
    /// reconstruction. Weights over all cells sum to `hi - lo`.
    fn weight(&self, i: usize) -> f64 {
        let a = self.lo.clamp(0.0, self.max);
        let b = self.hi.clamp(0.0, self.max);
        let c = i as f64;
        let mut w = tent_integral(b - c) - tent_integral(a - c);
        if i == 0 {
            w += (self.hi.min(0.0) - self.lo).max(0.0);
        }
        if i == self.last_cell {
            w += (self.hi - self.lo.max(self.max)).max(0.0);
        }
        w
    }
}

/// Integral of the unit tent `max(0, 1 - |t|)` from `-inf` to `u`.
#[inline]
fn tent_integral(u: f64) -> f64 {
    if u <= -1.0 {
        0.0
    } else if u <= 0.0 {
        0.5 * (u + 1.0) * (u + 1.0)
    } else if u < 1.0 {
        1.0 - 0.5 * (1.0 - u) * (1.0 - u)
    } else {
        1.0
    }
}
