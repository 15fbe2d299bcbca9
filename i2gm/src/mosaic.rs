//! Bitmap-comparison mosaic driver.
//!
//! Every tile of the source image is compared against every cached reference
//! glyph under the configured metric; the best match is drawn at the tile's
//! grid position. Tile selection is independent per tile and runs in
//! parallel per row; the draw pass stays sequential so output assembly is
//! deterministic.
use ab_glyph::{Font, PxScale};
use image::{DynamicImage, GenericImageView, GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use log::debug;
use rayon::prelude::*;

use crate::config::RenderConfig;
use crate::error::Error;
use crate::glyphs::GlyphCache;
use crate::metrics::BlockStats;

/// Canvas background for non-color output. The glyph fill is the logical
/// inverse; earlier renditions of this node drew 255-intensity glyphs on a
/// 255 background, which made them invisible.
pub const MOSAIC_BACKGROUND: u8 = 255;
pub const MOSAIC_FOREGROUND: u8 = 0;

const MONO_THRESHOLD: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Selection {
    pub ch: char,
    pub color: Rgb<u8>,
}

pub fn render_mosaic<F: Font>(
    img: &DynamicImage,
    font: &F,
    cfg: &RenderConfig,
) -> Result<DynamicImage, Error> {
    cfg.validate()?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage(width, height));
    }

    let chars = cfg.charset.chars();
    let cache = GlyphCache::build(font, cfg.font_size, &chars);
    if cache.is_empty() {
        return Err(Error::EmptyCharset);
    }

    let mut gray = img.to_luma8();
    if cfg.mono_comparison {
        binarize(&mut gray);
    }
    let rgb = img.to_rgb8();

    let selections = select_tiles(&gray, &rgb, &cache, cfg);

    let tile = cfg.font_size;
    let scale = PxScale::from(tile as f32);
    if cfg.color {
        let mut canvas = RgbImage::from_pixel(width, height, Rgb([MOSAIC_BACKGROUND; 3]));
        for (row, line) in selections.iter().enumerate() {
            for (col, sel) in line.iter().enumerate() {
                draw_text_mut(
                    &mut canvas,
                    sel.color,
                    (col as u32 * tile) as i32,
                    (row as u32 * tile) as i32,
                    scale,
                    font,
                    &sel.ch.to_string(),
                );
            }
        }
        Ok(DynamicImage::ImageRgb8(canvas))
    } else {
        let mut canvas = GrayImage::from_pixel(width, height, Luma([MOSAIC_BACKGROUND]));
        for (row, line) in selections.iter().enumerate() {
            for (col, sel) in line.iter().enumerate() {
                draw_text_mut(
                    &mut canvas,
                    Luma([MOSAIC_FOREGROUND]),
                    (col as u32 * tile) as i32,
                    (row as u32 * tile) as i32,
                    scale,
                    font,
                    &sel.ch.to_string(),
                );
            }
        }
        Ok(DynamicImage::ImageLuma8(canvas))
    }
}

/// Reduce the comparison image to pure black/white, stressing
/// contrast-driven glyph selection.
fn binarize(gray: &mut GrayImage) {
    for pixel in gray.pixels_mut() {
        pixel.0[0] = if pixel.0[0] >= MONO_THRESHOLD { 255 } else { 0 };
    }
}

/// Pick the best-matching glyph for every full tile, in raster-scan order.
/// Remainder pixels past the last full tile are never visited.
pub(crate) fn select_tiles(
    gray: &GrayImage,
    rgb: &RgbImage,
    cache: &GlyphCache,
    cfg: &RenderConfig,
) -> Vec<Vec<Selection>> {
    let tile = cache.cell_size();
    let cols = gray.width() / tile;
    let rows = gray.height() / tile;
    debug!(
        "mosaic: {cols}x{rows} tiles of {tile}px, {} glyph candidates",
        cache.glyphs().len()
    );

    (0..rows)
        .into_par_iter()
        .map(|row| {
            (0..cols)
                .map(|col| select_tile(gray, rgb, cache, cfg, col, row))
                .collect()
        })
        .collect()
}

fn select_tile(
    gray: &GrayImage,
    rgb: &RgbImage,
    cache: &GlyphCache,
    cfg: &RenderConfig,
    col: u32,
    row: u32,
) -> Selection {
    let tile = cache.cell_size();
    let x0 = col * tile;
    let y0 = row * tile;

    let mut block = Vec::with_capacity((tile * tile) as usize);
    for ty in 0..tile {
        for tx in 0..tile {
            block.push(gray.get_pixel(x0 + tx, y0 + ty).0[0]);
        }
    }
    let stats = BlockStats::of(&block);

    // strict < keeps the first-seen glyph on ties
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, glyph) in cache.glyphs().iter().enumerate() {
        let distance = cfg.metric.distance(&block, &stats, &glyph.reference());
        if distance < best_distance {
            best_distance = distance;
            best = i;
        }
    }

    let color = if cfg.color {
        average_color(rgb, x0, y0, tile)
    } else {
        Rgb([MOSAIC_FOREGROUND; 3])
    };

    Selection {
        ch: cache.glyphs()[best].ch,
        color,
    }
}

fn average_color(rgb: &RgbImage, x0: u32, y0: u32, tile: u32) -> Rgb<u8> {
    let mut sums = [0u64; 3];
    for ty in 0..tile {
        for tx in 0..tile {
            let pixel = rgb.get_pixel(x0 + tx, y0 + ty);
            for (sum, &channel) in sums.iter_mut().zip(&pixel.0) {
                *sum += u64::from(channel);
            }
        }
    }
    let count = u64::from(tile * tile);
    Rgb([
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    ])
}
