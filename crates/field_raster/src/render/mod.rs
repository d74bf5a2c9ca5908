//! Render loops and output sinks.
//!
//! - [`strided`]: the single-field loop over any [`crate::raster::RasterLayout`]
//! - [`renderer`]: compiled multi-channel rendering into a [`crate::raster::MultiRaster`]
//! - [`pixel`]: per-pixel rendering into packed colour buffers
//!
//! Cancellable loops poll a [`ProgressListener`] every
//! [`RenderOptions::progress_interval_rows`] rows.
pub mod field_pixels;
pub mod options;
pub mod pixel;
pub mod progress;
pub mod renderer;
pub mod strided;

pub use field_pixels::FieldPixelRenderer;
pub use options::RenderOptions;
pub use pixel::{
    pack_argb, pack_unit_rgba, render_pixels, unpack_argb, PixelBuffer, PixelRenderer, RgbaBuffer,
};
pub use progress::{CancelFlag, FnListener, ProgressListener, RenderOutcome};
pub use renderer::Renderer;
#[cfg(feature = "parallel")]
pub use strided::render_strided_par;
pub use strided::{render_strided, SourceGrid};
