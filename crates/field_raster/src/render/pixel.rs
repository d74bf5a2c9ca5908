//! Per-pixel rendering into packed 32-bit colour buffers.
//!
//! Colours are packed as `0xAARRGGBB`. A [`PixelRenderer`] produces one colour per pixel;
//! [`render_pixels`] drives it over an area of a [`PixelBuffer`] with the same progress
//! and cancellation contract as the raster renderer.
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::geometry::IntRectangle;
use crate::render::options::RenderOptions;
use crate::render::progress::{ProgressListener, RenderOutcome};

/// Packs 8-bit channels into `0xAARRGGBB`.
#[inline]
pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Splits `0xAARRGGBB` into `[a, r, g, b]`.
#[inline]
pub fn unpack_argb(color: u32) -> [u8; 4] {
    [
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    ]
}

/// Packs unit-range channels, clamping to `[0, 1]`. NaN maps to 0.
#[inline]
pub fn pack_unit_rgba(r: f32, g: f32, b: f32, a: f32) -> u32 {
    pack_argb(unit_to_u8(a), unit_to_u8(r), unit_to_u8(g), unit_to_u8(b))
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A writable image of packed colours.
///
/// `pixel` and `set_pixel` take coordinates inside `width() x height()`; implementations
/// may panic otherwise. [`render_pixels`] only writes inside the area it validated.
pub trait PixelBuffer {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixel(&self, x: u32, y: u32) -> u32;
    fn set_pixel(&mut self, x: u32, y: u32, color: u32);

    /// Makes written pixels visible to consumers. Called once per render.
    fn publish(&mut self) {}
}

/// Owned row-major buffer of packed colours.
///
/// Equality compares size and pixels, not the publish count.
#[derive(Clone, Debug)]
pub struct RgbaBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    generation: u64,
}

impl RgbaBuffer {
    /// Allocates a transparent black buffer.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, 0)
    }

    pub fn filled(width: u32, height: u32, color: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument(format!(
                "pixel buffer size must be > 0, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
            generation: 0,
        })
    }

    /// Pixels per row.
    pub fn stride(&self) -> usize {
        self.width as usize
    }

    pub fn bounds(&self) -> IntRectangle {
        IntRectangle::from_size(self.width, self.height)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.pixels
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Checked read of pixel `(x, y)`.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<u32> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x: x as usize,
                y: y as usize,
                size_x: self.width as usize,
                size_y: self.height as usize,
            });
        }
        Ok(self.pixels[self.index(x, y)])
    }

    /// Number of times [`PixelBuffer::publish`] was called.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) is outside the {}x{} buffer",
            self.width,
            self.height
        );
        y as usize * self.stride() + x as usize
    }
}

impl PartialEq for RgbaBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.pixels == other.pixels
    }
}

impl Eq for RgbaBuffer {}

impl PixelBuffer for RgbaBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)]
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: u32) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    fn publish(&mut self) {
        self.generation += 1;
    }
}

/// Computes one packed colour per pixel.
pub trait PixelRenderer {
    /// Called once before the first pixel with the full target size.
    fn prepare(&mut self, _target: &mut dyn PixelBuffer, _width: u32, _height: u32) -> Result<()> {
        Ok(())
    }

    /// Colour of pixel `(x, y)` of a `total_width` x `total_height` target.
    fn pixel_color(&self, x: u32, y: u32, total_width: u32, total_height: u32) -> u32;

    /// Called once after the last rendered row, also after a cancellation.
    fn finish(&mut self, _target: &mut dyn PixelBuffer, _width: u32, _height: u32) {}
}

/// Renders `area` of `target` row by row, then publishes the buffer.
///
/// `area` must lie inside the target. The listener is polled with the fraction of area
/// rows done; a `false` answer stops before the next row and keeps what was written.
/// Without a listener the whole area is rendered.
pub fn render_pixels<R: PixelRenderer + ?Sized>(
    renderer: &mut R,
    target: &mut dyn PixelBuffer,
    area: IntRectangle,
    mut listener: Option<&mut dyn ProgressListener>,
    options: &RenderOptions,
) -> Result<RenderOutcome> {
    options.validate()?;
    let (width, height) = (target.width(), target.height());
    let bounds = IntRectangle::from_size(width, height);
    if area.is_empty() || area.intersection(&bounds) != Some(area) {
        return Err(Error::InvalidArgument(format!(
            "pixel area {area:?} is not inside the {width}x{height} target"
        )));
    }

    renderer.prepare(target, width, height)?;
    debug!("Rendering pixel area {:?} of a {}x{} target.", area, width, height);

    let (x0, y0) = (area.x as u32, area.y as u32);
    let rows = area.height as usize;
    let mut outcome = RenderOutcome::Completed;
    for row in 0..rows {
        let y = y0 + row as u32;
        for x in x0..x0 + area.width {
            let color = renderer.pixel_color(x, y, width, height);
            target.set_pixel(x, y, color);
        }

        let rows_done = row + 1;
        if let Some(listener) = listener.as_deref_mut() {
            if options.poll_due(rows_done) {
                let fraction = rows_done as f32 / rows as f32;
                trace!("Pixel render progress {:.3}.", fraction);
                if !listener.on_progress(fraction) && rows_done < rows {
                    info!("Pixel render cancelled after {} of {} rows.", rows_done, rows);
                    outcome = RenderOutcome::Cancelled {
                        rows_rendered: rows_done,
                    };
                    break;
                }
            }
        }
    }

    renderer.finish(target, width, height);
    target.publish();
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::progress::FnListener;

    struct Coords {
        prepared: bool,
        finished: bool,
    }

    impl PixelRenderer for Coords {
        fn prepare(&mut self, _t: &mut dyn PixelBuffer, _w: u32, _h: u32) -> Result<()> {
            self.prepared = true;
            Ok(())
        }

        fn pixel_color(&self, x: u32, y: u32, _tw: u32, _th: u32) -> u32 {
            pack_argb(0xFF, x as u8, y as u8, 0)
        }

        fn finish(&mut self, _t: &mut dyn PixelBuffer, _w: u32, _h: u32) {
            self.finished = true;
        }
    }

    fn coords() -> Coords {
        Coords {
            prepared: false,
            finished: false,
        }
    }

    #[test]
    fn packing_round_trips_channels() {
        let c = pack_argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c, 0x1234_5678);
        assert_eq!(unpack_argb(c), [0x12, 0x34, 0x56, 0x78]);
        assert_eq!(pack_unit_rgba(1.0, 0.0, 2.0, f32::NAN), 0x00FF_00FF);
        assert_eq!(pack_unit_rgba(0.5, 0.5, 0.5, 1.0), 0xFF80_8080);
    }

    #[test]
    fn checked_pixel_reads_report_out_of_bounds() {
        let buf = RgbaBuffer::filled(3, 2, 9).unwrap();
        assert_eq!(buf.get_pixel(2, 1).unwrap(), 9);
        assert!(matches!(
            buf.get_pixel(3, 0),
            Err(Error::OutOfBounds { x: 3, y: 0, size_x: 3, size_y: 2 })
        ));
        assert!(matches!(buf.get_pixel(0, 2), Err(Error::OutOfBounds { .. })));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "outside the 3x2 buffer")]
    fn unchecked_write_past_row_end_panics_in_debug() {
        let mut buf = RgbaBuffer::new(3, 2).unwrap();
        buf.set_pixel(3, 0, 1);
    }

    #[test]
    fn equality_ignores_publish_count() {
        let mut a = RgbaBuffer::filled(2, 2, 5).unwrap();
        let b = a.clone();
        a.publish();
        assert_ne!(a.generation(), b.generation());
        assert_eq!(a, b);
        a.set_pixel(0, 0, 6);
        assert_ne!(a, b);
    }

    #[test]
    fn full_render_without_listener() {
        let mut buf = RgbaBuffer::new(4, 3).unwrap();
        let area = buf.bounds();
        let mut r = coords();
        let outcome = render_pixels(&mut r, &mut buf, area, None, &RenderOptions::default()).unwrap();
        assert!(outcome.is_completed());
        assert!(r.prepared && r.finished);
        assert_eq!(buf.pixel(3, 2), pack_argb(0xFF, 3, 2, 0));
        assert_eq!(buf.generation(), 1);
    }

    #[test]
    fn sub_area_leaves_other_pixels_alone() {
        let mut buf = RgbaBuffer::filled(5, 5, 7).unwrap();
        let area = IntRectangle::new(1, 2, 2, 2);
        render_pixels(&mut coords(), &mut buf, area, None, &RenderOptions::default()).unwrap();
        assert_eq!(buf.pixel(0, 0), 7);
        assert_eq!(buf.pixel(1, 2), pack_argb(0xFF, 1, 2, 0));
        assert_eq!(buf.pixel(2, 3), pack_argb(0xFF, 2, 3, 0));
        assert_eq!(buf.pixel(3, 3), 7);
    }

    #[test]
    fn cancellation_keeps_partial_image_and_still_finishes() {
        let mut buf = RgbaBuffer::filled(2, 30, 1).unwrap();
        let area = buf.bounds();
        let mut r = coords();
        let mut listener = FnListener(|f: f32| f < 0.5);
        let outcome = render_pixels(
            &mut r,
            &mut buf,
            area,
            Some(&mut listener),
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(outcome, RenderOutcome::Cancelled { rows_rendered: 20 });
        assert!(r.finished);
        assert_eq!(buf.pixel(1, 19), pack_argb(0xFF, 1, 19, 0));
        assert_eq!(buf.pixel(1, 20), 1);
        assert_eq!(buf.generation(), 1);
    }

    #[test]
    fn area_outside_target_is_rejected() {
        let mut buf = RgbaBuffer::new(4, 4).unwrap();
        let area = IntRectangle::new(2, 2, 4, 1);
        assert!(matches!(
            render_pixels(&mut coords(), &mut buf, area, None, &RenderOptions::default()),
            Err(Error::InvalidArgument(_))
        ));
        assert!(RgbaBuffer::new(0, 3).is_err());
    }
}
