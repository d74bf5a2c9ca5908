//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! precondition violations, out-of-bounds raster access, invalid buffer layouts,
//! empty render areas, channel lookup failures and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cell ({x}, {y}) is outside the {size_x}x{size_y} raster")]
    OutOfBounds {
        x: usize,
        y: usize,
        size_x: usize,
        size_y: usize,
    },

    #[error("invalid raster layout: {0}")]
    InvalidLayout(String),

    #[error("area is empty")]
    EmptyArea,

    #[error("unknown channel '{id}'")]
    UnknownChannel { id: String },

    #[error("incompatible render target: {0}")]
    IncompatibleTarget(String),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
