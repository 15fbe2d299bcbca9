//! Per-invocation render configuration.
//!
//! One immutable bundle covers the union of options across both drivers;
//! host-specific nodes populate it from their own parameter surface.
//! Validation fails fast, before any tiling work begins.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::font::FontHandle;
use crate::maps::CharacterSet;
use crate::metrics::Metric;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Font identity, resolved through the host's `FontSource`.
    pub font: FontHandle,
    /// Tile edge length in pixels; also the glyph cell size.
    pub font_size: u32,
    pub charset: CharacterSet,
    pub metric: Metric,
    /// Color output instead of grayscale.
    pub color: bool,
    /// Reverse the ramp and swap the background/foreground pair.
    pub invert: bool,
    /// Binarize the comparison image before glyph matching (mosaic driver).
    pub mono_comparison: bool,
    /// Power-law intensity correction; 1.0 leaves the image untouched.
    pub gamma: f32,
    /// When set, the luminance driver also writes a plain-text transcript
    /// into this directory.
    pub text_output: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font: FontHandle::new("DejaVuSansMono.ttf"),
            font_size: 8,
            charset: CharacterSet::Shaded,
            metric: Metric::Mse,
            color: false,
            invert: false,
            mono_comparison: false,
            gamma: 1.0,
            text_output: None,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.font_size == 0 {
            return Err(Error::InvalidTileSize(self.font_size));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(Error::InvalidGamma(self.gamma));
        }
        if let CharacterSet::Custom(chars) = &self.charset
            && chars.is_empty()
        {
            return Err(Error::EmptyCharset);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_tile_size_is_rejected() {
        let cfg = RenderConfig {
            font_size: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidTileSize(0))));
    }

    #[test]
    fn empty_custom_charset_is_rejected() {
        let cfg = RenderConfig {
            charset: CharacterSet::Custom(String::new()),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::EmptyCharset)));
    }

    #[test]
    fn non_positive_gamma_is_rejected() {
        for gamma in [0.0, -1.0, f32::NAN] {
            let cfg = RenderConfig {
                gamma,
                ..Default::default()
            };
            assert!(matches!(cfg.validate(), Err(Error::InvalidGamma(_))));
        }
    }

    #[test]
    fn config_serde_round_trip() {
        let cfg = RenderConfig {
            charset: CharacterSet::custom("@. "),
            metric: Metric::Ssim,
            invert: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: RenderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.charset, cfg.charset);
        assert_eq!(back.metric, cfg.metric);
        assert!(back.invert);
    }
}
