//! Geometry primitives shared by every other module.
//!
//! - [`Rectangle`]: immutable continuous-space bounds, the usual source area.
//! - [`MutableRectangle`]: observable bounds with change listeners.
//! - [`IntRectangle`]: pixel-space target areas.
pub mod int_rectangle;
pub mod mutable;
pub mod rectangle;

pub use int_rectangle::IntRectangle;
pub use mutable::{ListenerId, MutableRectangle};
pub use rectangle::{Bounds, Rectangle};
