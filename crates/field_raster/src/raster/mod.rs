//! Discrete grid storage.
//!
//! Rasters never own a fixed memory layout: a [`RasterLayout`] (offset, x-step, y-skip)
//! addresses cells inside a flat buffer, so planar and interleaved multi-channel data
//! share the same code paths. Several views may alias one buffer; writes through them
//! must be serialized by the caller, which the borrow checker enforces for `&mut [f32]`
//! storage.
mod filter;
pub mod grid;
pub mod layout;
pub mod multi;

pub use grid::Raster;
pub use layout::RasterLayout;
pub use multi::{ChannelLayout, MultiRaster};

/// Identifier of a channel in a multi-raster or multi-field.
pub type ChannelId = String;
