use std::f32::consts::PI;

use field_raster::prelude::*;
use field_raster_examples::{init_tracing, raster_to_png, GRAYSCALE_RANGE};

/// Coarse grid mixing a tilted gradient with low-frequency waves, so nearest sampling
/// looks blocky while bilinear looks smooth.
fn coarse_gradient_with_waves(width: usize, height: usize) -> anyhow::Result<Raster> {
    let mut raster = Raster::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let u = (x as f32 + 0.5) / width as f32;
            let v = (y as f32 + 0.5) / height as f32;
            let base = (0.75 * u + 0.25 * v).clamp(0.0, 1.0);
            let waves = 0.25 * ((2.0 * PI * 3.0 * u).sin() * (2.0 * PI * 2.0 * v).cos());
            raster.set_value(x, y, (base + waves).clamp(0.0, 1.0))?;
        }
    }
    Ok(raster)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let grid = coarse_gradient_with_waves(32, 32)?.into_shared();
    let cells = (grid.size_x() - 1) as f64;

    // Both map the unit square onto the grid; only the reconstruction differs.
    let bilinear = RasterField::new(grid.clone());
    let nearest = FnField::new(move |x, y, _| grid.sample_nearest(x * cells, y * cells));

    let mut out = Raster::new(1000, 1000)?;
    nearest.render_to_raster(&mut out)?;
    raster_to_png(&out, GRAYSCALE_RANGE, "grids-bilinear-vs-nearest-nearest.png")?;

    bilinear.render_to_raster(&mut out)?;
    raster_to_png(&out, GRAYSCALE_RANGE, "grids-bilinear-vs-nearest-bilinear.png")?;
    Ok(())
}
