//! Rendering multi-field colour channels straight into pixel buffers.
use crate::error::{Error, Result};
use crate::geometry::{Bounds, Rectangle};
use crate::render::pixel::{pack_unit_rgba, PixelBuffer, PixelRenderer};
use crate::render::renderer::Renderer;
use crate::render::strided::SourceGrid;

/// Colours each pixel from a renderer with 3 (RGB, opaque) or 4 (RGBA) channels.
///
/// Channel values are expected in `[0, 1]` and are clamped when packed. The source area
/// is stretched over the whole target so pixel corners land on the area corners.
#[derive(Debug, Clone)]
pub struct FieldPixelRenderer {
    renderer: Renderer,
    source: Rectangle,
    grid: SourceGrid,
}

impl FieldPixelRenderer {
    pub fn new(renderer: Renderer, source: &dyn Bounds) -> Result<Self> {
        if !matches!(renderer.channel_count(), 3 | 4) {
            return Err(Error::InvalidArgument(format!(
                "pixel rendering needs 3 or 4 channels, got {}",
                renderer.channel_count()
            )));
        }
        let grid = SourceGrid::for_area(source, 1, 1)?;
        Ok(Self {
            renderer,
            source: source.to_rectangle(),
            grid,
        })
    }

    pub fn source(&self) -> &Rectangle {
        &self.source
    }
}

impl PixelRenderer for FieldPixelRenderer {
    fn prepare(&mut self, _target: &mut dyn PixelBuffer, width: u32, height: u32) -> Result<()> {
        self.grid = SourceGrid::for_area(&self.source, width as usize, height as usize)?;
        Ok(())
    }

    fn pixel_color(&self, x: u32, y: u32, _total_width: u32, _total_height: u32) -> u32 {
        let p = self.grid.point(x as usize, y as usize);
        let mut rgba = [0.0, 0.0, 0.0, 1.0];
        self.renderer
            .sample_pixel(p.x, p.y, self.grid.sample_size, &mut rgba);
        pack_unit_rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ConstantField, FieldSet, FnField, MultiField};
    use crate::render::options::RenderOptions;
    use crate::render::pixel::{pack_argb, render_pixels, RgbaBuffer};

    #[test]
    fn rgb_renders_opaque_gradient() {
        let fields = FieldSet::new()
            .with("r", FnField::new(|x, _, _| x as f32))
            .with("g", FnField::new(|_, y, _| y as f32))
            .with("b", ConstantField::new(0.0));
        let renderer = fields.create_renderer(&["r", "g", "b"]).unwrap();
        let mut pixels = FieldPixelRenderer::new(renderer, &Rectangle::UNIT).unwrap();

        let mut buf = RgbaBuffer::new(3, 3).unwrap();
        let area = buf.bounds();
        render_pixels(&mut pixels, &mut buf, area, None, &RenderOptions::default()).unwrap();

        assert_eq!(buf.pixel(0, 0), pack_argb(255, 0, 0, 0));
        assert_eq!(buf.pixel(2, 0), pack_argb(255, 255, 0, 0));
        assert_eq!(buf.pixel(2, 2), pack_argb(255, 255, 255, 0));
        assert_eq!(buf.pixel(1, 1), pack_argb(255, 128, 128, 0));
    }

    #[test]
    fn fourth_channel_is_alpha() {
        let fields = FieldSet::new()
            .with("r", ConstantField::new(1.0))
            .with("g", ConstantField::new(1.0))
            .with("b", ConstantField::new(1.0))
            .with("a", ConstantField::new(0.0));
        let renderer = fields.create_renderer(&["r", "g", "b", "a"]).unwrap();
        let pixels = FieldPixelRenderer::new(renderer, &Rectangle::UNIT).unwrap();
        assert_eq!(pixels.pixel_color(0, 0, 1, 1), 0x00FF_FFFF);
    }

    #[test]
    fn wrong_channel_count_is_rejected() {
        let fields = FieldSet::new()
            .with("r", ConstantField::new(1.0))
            .with("g", ConstantField::new(1.0));
        let renderer = fields.create_renderer(&["r", "g"]).unwrap();
        assert!(matches!(
            FieldPixelRenderer::new(renderer, &Rectangle::UNIT),
            Err(Error::InvalidArgument(_))
        ));
    }
}
