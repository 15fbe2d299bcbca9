//! Glyph-mosaic engine: convert a decoded raster image into ASCII or
//! extended-Unicode character art.
//!
//! Two drivers share one tiling structure. [`mosaic`] compares each tile
//! against rendered reference glyphs under a selectable similarity metric
//! and draws the best match; [`luma`] maps a sampled brightness straight
//! into an ordered glyph ramp, producing a raster image, a plain-text
//! transcript, or both.
//!
//! The engine is host-driven: the caller supplies the decoded image, a
//! [`config::RenderConfig`] and a font resolved through [`font::FontSource`],
//! and consumes the returned image. The `render` feature (default) pulls in
//! `ab_glyph`, `imageproc` and `rayon` for raster output; without it the
//! crate still offers ramp lookup, gamma correction, the metrics and the
//! text transcript path.

pub mod config;
pub mod error;
pub mod font;
pub mod gamma;
#[cfg(feature = "render")]
pub mod glyphs;
pub mod luma;
pub mod maps;
pub mod metrics;
#[cfg(feature = "render")]
pub mod mosaic;
pub mod transcript;

pub use config::RenderConfig;
pub use error::Error;
pub use font::{DirFontSource, FontHandle, FontSource};
pub use maps::CharacterSet;
pub use metrics::Metric;
