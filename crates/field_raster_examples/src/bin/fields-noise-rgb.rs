use field_raster::prelude::*;
use field_raster_examples::{init_tracing, render_fields_to_png};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(42);

    // Three independent noise octaves, one per colour channel.
    let fields = FieldSet::new()
        .with("r", NoiseField::from_rng(&mut rng).with_frequency(2.0))
        .with("g", NoiseField::from_rng(&mut rng).with_frequency(5.0))
        .with("b", NoiseField::from_rng(&mut rng).with_frequency(11.0));

    let area = Rectangle::from_size(4.0, 4.0);
    render_fields_to_png(&fields, &["r", "g", "b"], &area, (800, 800), "fields-noise-rgb.png")?;
    Ok(())
}
