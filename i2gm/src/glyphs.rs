//! Per-character reference bitmaps for the comparison driver.
//!
//! For a given (font, size, character set) the cache holds one `size × size`
//! single-channel block per character, the glyph's ink box centered in the
//! cell at full intensity on a zero background. Mean and variance are
//! computed once here so SSIM never recomputes them per tile, and the
//! NAL-rescaled mean luminances span [0, 255] across the whole set.
use ab_glyph::{Font, FontVec, Glyph, PxScale, point};
use log::{debug, warn};

use crate::error::Error;
use crate::metrics::{BlockStats, Reference};

pub struct GlyphRef {
    pub ch: char,
    pub bitmap: Vec<u8>,
    pub stats: BlockStats,
    pub scaled_luma: f64,
}

impl GlyphRef {
    pub fn reference(&self) -> Reference<'_> {
        Reference {
            block: &self.bitmap,
            stats: self.stats,
            scaled_luma: self.scaled_luma,
        }
    }
}

/// Ordered reference bitmaps for one rendering session. Charset order is
/// preserved so minimum-distance ties resolve to the first-seen character.
pub struct GlyphCache {
    size: u32,
    glyphs: Vec<GlyphRef>,
}

/// Parse raw font bytes. Unrasterizable bytes (truncated download, wrong
/// file) surface here as a `FontLoad` error.
pub fn load_font(bytes: Vec<u8>) -> Result<FontVec, Error> {
    FontVec::try_from_vec(bytes).map_err(|e| Error::FontLoad(e.to_string()))
}

impl GlyphCache {
    pub fn build<F: Font>(font: &F, size: u32, chars: &[char]) -> Self {
        debug!("building glyph cache: {} chars at {size}px", chars.len());
        let raw = chars
            .iter()
            .map(|&ch| (ch, rasterize(font, ch, size)))
            .collect();
        Self::from_bitmaps(size, raw)
    }

    /// Build from pre-rendered bitmaps. Every bitmap must be `size × size`.
    pub fn from_bitmaps(size: u32, bitmaps: Vec<(char, Vec<u8>)>) -> Self {
        let stats: Vec<BlockStats> = bitmaps.iter().map(|(_, b)| BlockStats::of(b)).collect();

        let min = stats.iter().map(|s| s.mean).fold(f64::INFINITY, f64::min);
        let max = stats
            .iter()
            .map(|s| s.mean)
            .fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        if !bitmaps.is_empty() && span == 0.0 {
            warn!("all reference glyphs share one mean luminance; NAL collapses to a constant");
        }

        let glyphs = bitmaps
            .into_iter()
            .zip(stats)
            .map(|((ch, bitmap), stats)| {
                let scaled_luma = if span > 0.0 {
                    (stats.mean - min) / span * 255.0
                } else {
                    0.0
                };
                GlyphRef {
                    ch,
                    bitmap,
                    stats,
                    scaled_luma,
                }
            })
            .collect();

        Self { size, glyphs }
    }

    pub fn cell_size(&self) -> u32 {
        self.size
    }

    pub fn glyphs(&self) -> &[GlyphRef] {
        &self.glyphs
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Render one character into a `size × size` cell, centered on its measured
/// ink bounding box (not its advance width). Characters with no outline
/// (space, controls) produce an all-zero block.
fn rasterize<F: Font>(font: &F, ch: char, size: u32) -> Vec<u8> {
    let mut bitmap = vec![0u8; (size * size) as usize];
    let glyph: Glyph = font
        .glyph_id(ch)
        .with_scale_and_position(PxScale::from(size as f32), point(0.0, 0.0));

    if let Some(outlined) = font.outline_glyph(glyph) {
        let bounds = outlined.px_bounds();
        let ink_w = bounds.width().ceil() as i64;
        let ink_h = bounds.height().ceil() as i64;
        let x0 = (i64::from(size) - ink_w) / 2;
        let y0 = (i64::from(size) - ink_h) / 2;

        outlined.draw(|x, y, coverage| {
            let px = x0 + i64::from(x);
            let py = y0 + i64::from(y);
            if (0..i64::from(size)).contains(&px) && (0..i64::from(size)).contains(&py) {
                let idx = (py * i64::from(size) + px) as usize;
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                bitmap[idx] = bitmap[idx].max(value);
            }
        });
    }
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(size: u32, value: u8) -> Vec<u8> {
        vec![value; (size * size) as usize]
    }

    #[test]
    fn nal_rescale_spans_full_range() {
        let cache = GlyphCache::from_bitmaps(
            2,
            vec![
                (' ', uniform(2, 0)),
                ('+', uniform(2, 100)),
                ('@', uniform(2, 200)),
            ],
        );
        let lumas: Vec<f64> = cache.glyphs().iter().map(|g| g.scaled_luma).collect();
        assert_eq!(lumas[0], 0.0);
        assert_eq!(lumas[2], 255.0);
        assert!((lumas[1] - 127.5).abs() < 1e-9);
    }

    #[test]
    fn nal_degenerate_set_collapses_without_panic() {
        let cache = GlyphCache::from_bitmaps(
            2,
            vec![('a', uniform(2, 77)), ('b', uniform(2, 77))],
        );
        for glyph in cache.glyphs() {
            assert_eq!(glyph.scaled_luma, 0.0);
        }
    }

    #[test]
    fn charset_order_is_preserved() {
        let cache = GlyphCache::from_bitmaps(
            1,
            vec![('c', vec![1]), ('a', vec![2]), ('b', vec![3])],
        );
        let order: Vec<char> = cache.glyphs().iter().map(|g| g.ch).collect();
        assert_eq!(order, vec!['c', 'a', 'b']);
    }

    #[test]
    fn glyph_stats_are_cached_per_bitmap() {
        let cache = GlyphCache::from_bitmaps(2, vec![('x', vec![0, 0, 255, 255])]);
        let glyph = &cache.glyphs()[0];
        assert_eq!(glyph.stats.mean, 127.5);
        assert_eq!(glyph.stats.variance, 127.5 * 127.5);
    }

    #[test]
    fn invalid_font_bytes_are_a_font_load_error() {
        let err = load_font(vec![0u8; 16]).unwrap_err();
        assert!(matches!(err, Error::FontLoad(_)));
    }
}
