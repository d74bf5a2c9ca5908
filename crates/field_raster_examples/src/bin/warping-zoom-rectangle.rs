use field_raster::prelude::*;
use field_raster_examples::{init_tracing, raster_to_png, GRAYSCALE_RANGE};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let noise = NoiseField::new(1234).with_frequency(6.0);

    // Full view of a 10x10 world, then a zoom into its upper-left quarter.
    let world = RectangleWarping::new(Rectangle::from_size(10.0, 10.0));
    let zoom = RectangleWarping::new(Rectangle::new(0.0, 0.0, 0.25, 0.25));

    let mut out = Raster::new(600, 600)?;
    (&noise).warped(world).render_to_raster(&mut out)?;
    raster_to_png(&out, GRAYSCALE_RANGE, "warping-world.png")?;

    (&noise).warped(zoom.then(world)).render_to_raster(&mut out)?;
    raster_to_png(&out, GRAYSCALE_RANGE, "warping-zoom.png")?;

    let swirl = AffineWarping::rotation_about(glam::DVec2::splat(5.0), 0.6);
    (&noise)
        .warped(world.then(swirl))
        .render_to_raster(&mut out)?;
    raster_to_png(&out, GRAYSCALE_RANGE, "warping-rotated.png")?;
    Ok(())
}
