#![forbid(unsafe_code)]
//! field_raster: continuous 2D fields, strided raster storage and cancellable rendering.
//!
//! Modules:
//! - geometry: immutable and observable rectangles, integer pixel areas
//! - raster: strided single-channel views and multi-channel rasters over one buffer
//! - field: continuous samplers, multi-channel field sets and sequence helpers
//! - warp: coordinate transforms applied before sampling
//! - render: the strided render loop, compiled renderers, pixel sinks and progress
//!
//! For examples and docs, see README and docs.rs.
pub mod error;
pub mod field;
pub mod geometry;
pub mod raster;
pub mod render;
pub mod warp;

/// Convenient re-exports for common types. Import with `use field_raster::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::field::{
        sample_line, sample_sequence, ConstantField, DomainRange, Field, FieldExt, FieldSet,
        FnField, MultiField, NoiseField, RasterChannelField, RasterField, RasterMultiField,
        WarpedField,
    };
    pub use crate::geometry::{Bounds, IntRectangle, ListenerId, MutableRectangle, Rectangle};
    pub use crate::raster::{ChannelId, ChannelLayout, MultiRaster, Raster, RasterLayout};
    #[cfg(feature = "parallel")]
    pub use crate::render::render_strided_par;
    pub use crate::render::{
        pack_argb, pack_unit_rgba, render_pixels, render_strided, unpack_argb, CancelFlag,
        FieldPixelRenderer, FnListener, PixelBuffer, PixelRenderer, ProgressListener,
        RenderOptions, RenderOutcome, Renderer, RgbaBuffer, SourceGrid,
    };
    pub use crate::warp::{
        AffineWarping, ComposedWarping, IdentityWarping, RectangleWarping, Warping, WarpingExt,
    };
}
