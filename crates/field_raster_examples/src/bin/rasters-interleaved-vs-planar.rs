use field_raster::prelude::*;
use field_raster_examples::{init_tracing, raster_to_png, GRAYSCALE_RANGE};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let fields = FieldSet::new()
        .with("height", NoiseField::new(7).with_frequency(3.0))
        .with("moisture", FnField::new(|x, y, _| ((x + y) * 0.5) as f32))
        .with("mask", ConstantField::new(1.0));
    let renderer = fields.create_renderer(&["height", "moisture", "mask"])?;
    let area = Rectangle::UNIT;

    let channels = ["height", "moisture", "mask"];
    let mut interleaved = MultiRaster::interleaved(256, 256, channels)?;
    let mut planar = MultiRaster::planar(256, 256, channels)?;
    renderer.render_to_raster(&mut interleaved, &area, None)?;
    renderer.render_to_raster(&mut planar, &area, None)?;

    for id in channels {
        let (Some(a), Some(b)) = (interleaved.channel(id), planar.channel(id)) else {
            anyhow::bail!("channel '{id}' is missing");
        };
        let a_layout = a.layout();
        let b_layout = b.layout();
        info!(
            "{}: interleaved offset {} step {}, planar offset {} step {}, equal: {}.",
            id,
            a_layout.offset,
            a_layout.x_step,
            b_layout.offset,
            b_layout.x_step,
            a.to_vec() == b.to_vec()
        );
    }

    if let Some(height) = interleaved.channel("height") {
        raster_to_png(&height, GRAYSCALE_RANGE, "rasters-interleaved-height.png")?;
    }
    Ok(())
}
