//! Shared helpers for the example binaries: logging setup and PNG output.
use std::path::Path;

use anyhow::Context;
use field_raster::prelude::*;
use image::{Rgba, RgbaImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default value range mapped to black..white by [`raster_to_png`].
pub const GRAYSCALE_RANGE: (f32, f32) = (0.0, 1.0);

/// Installs a `fmt` subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// A [`PixelBuffer`] over an `image` crate RGBA image.
pub struct ImagePixels {
    image: RgbaImage,
}

impl ImagePixels {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn bounds(&self) -> IntRectangle {
        IntRectangle::from_size(self.image.width(), self.image.height())
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl PixelBuffer for ImagePixels {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel(&self, x: u32, y: u32) -> u32 {
        let [r, g, b, a] = self.image.get_pixel(x, y).0;
        pack_argb(a, r, g, b)
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: u32) {
        let [a, r, g, b] = unpack_argb(color);
        self.image.put_pixel(x, y, Rgba([r, g, b, a]));
    }
}

/// Writes `image` to `path` as PNG.
pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    image
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {}.", path.display());
    Ok(())
}

/// Writes one raster as a grayscale PNG, mapping `range` onto black..white.
pub fn raster_to_png<S: AsRef<[f32]>>(
    raster: &Raster<S>,
    range: (f32, f32),
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (lo, hi) = range;
    let span = if hi > lo { hi - lo } else { 1.0 };
    let (w, h) = raster.size();
    let mut image = RgbaImage::new(w as u32, h as u32);
    for (x, y, px) in image.enumerate_pixels_mut() {
        let v = raster.get_value(x as usize, y as usize)?;
        let g = (((v - lo) / span).clamp(0.0, 1.0) * 255.0).round() as u8;
        *px = Rgba([g, g, g, 255]);
    }
    save_png(&image, path)
}

/// Renders three or four channels of `fields` over `area` into a PNG of `size` pixels.
pub fn render_fields_to_png(
    fields: &dyn MultiField,
    channels: &[&str],
    area: &Rectangle,
    size: (u32, u32),
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let renderer = fields.create_renderer(channels)?;
    let mut pixels = FieldPixelRenderer::new(renderer, area)?;
    let mut target = ImagePixels::new(size.0, size.1);
    let bounds = target.bounds();
    render_pixels(
        &mut pixels,
        &mut target,
        bounds,
        None,
        &RenderOptions::default(),
    )?;
    save_png(&target.into_image(), path)
}
