#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    init_tracing, raster_to_png, render_fields_to_png, save_png, ImagePixels, GRAYSCALE_RANGE,
};
