use std::thread;
use std::time::Duration;

use field_raster::prelude::*;
use field_raster_examples::{init_tracing, ImagePixels};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let fields = FieldSet::new()
        .with("r", NoiseField::new(1).with_frequency(40.0))
        .with("g", NoiseField::new(2).with_frequency(40.0))
        .with("b", NoiseField::new(3).with_frequency(40.0));

    // Stop from the listener itself once half of the rows are done.
    let renderer = fields.create_renderer(&["r", "g", "b"])?;
    let mut target = MultiRaster::interleaved(512, 512, ["r", "g", "b"])?;
    let mut listener = FnListener(|fraction: f32| {
        info!("{:.0}% done", fraction * 100.0);
        fraction < 0.5
    });
    let outcome = renderer.render_to_raster(&mut target, &Rectangle::UNIT, Some(&mut listener))?;
    info!("Listener-driven render: {:?}.", outcome);

    // Cancel a pixel render from another thread.
    let flag = CancelFlag::new();
    let remote = flag.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        remote.cancel();
    });

    let mut pixels = FieldPixelRenderer::new(renderer, &Rectangle::UNIT)?;
    let mut image = ImagePixels::new(2048, 2048);
    let area = image.bounds();
    let mut listener = flag.clone();
    let outcome = render_pixels(
        &mut pixels,
        &mut image,
        area,
        Some(&mut listener),
        &RenderOptions::default(),
    )?;
    info!("Cancellable pixel render: {:?}.", outcome);

    let _ = canceller.join();
    Ok(())
}
