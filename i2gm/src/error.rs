//! This module defines the custom error type `Error` used throughout the crate.
//!
//! Configuration problems are reported before any tiling work begins; resource
//! and degenerate-input failures abort the invocation as a whole. There is no
//! partial-result mode.
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// An unrecognized character-set name was supplied by the host.
    #[error("Unknown character set: {0}")]
    UnknownCharset(String),
    /// A custom character string with no characters in it.
    #[error("Custom character set is empty")]
    EmptyCharset,
    /// Tile/font size must be a positive number of pixels.
    #[error("Invalid tile size: {0} (must be positive)")]
    InvalidTileSize(u32),
    /// Gamma must be a positive real; 1.0 means no correction.
    #[error("Invalid gamma value: {0} (must be positive)")]
    InvalidGamma(f32),
    /// The source image has a zero dimension.
    #[error("Input image is empty ({0}x{1})")]
    EmptyImage(u32, u32),
    /// The font resource could not be opened or rasterized. Font acquisition
    /// is the host collaborator's job, so this is surfaced without retry.
    #[error("Font load error: {0}")]
    FontLoad(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        io::Error::other(error.to_string())
    }
}
