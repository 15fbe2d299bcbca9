//! Luminance-ramp driver.
//!
//! Direct brightness-to-character indexing: each tile contributes the single
//! pixel at its top-left corner (intentionally not an average; the
//! comparison driver is the one that averages). Output is a raster canvas,
//! a plain-text transcript, or both.
use image::{DynamicImage, GenericImageView};
use log::debug;

use crate::config::RenderConfig;
use crate::error::Error;
use crate::gamma;

/// Vertical stride multiplier for text output; monospace glyphs are roughly
/// twice as tall as they are wide.
const TEXT_ASPECT: u32 = 2;

/// Background/foreground intensities for non-color raster output. Inverted
/// means light glyphs on a dark background.
pub(crate) fn scheme(invert: bool) -> (u8, u8) {
    if invert { (0, 255) } else { (255, 0) }
}

/// Ramp index for one sampled intensity. Two-symbol ramps threshold at the
/// midpoint instead of truncating, and a single-symbol ramp always selects
/// its only character.
fn ramp_index(value: u8, len: usize) -> usize {
    match len {
        0 | 1 => 0,
        2 => usize::from(f32::from(value) > 127.5),
        _ => value as usize * (len - 1) / 255,
    }
}

fn active_ramp(cfg: &RenderConfig) -> Vec<char> {
    if cfg.invert {
        cfg.charset.reversed_chars()
    } else {
        cfg.charset.chars()
    }
}

/// Sample the tile grid of a gamma-corrected image into characters.
/// `aspect` stretches the vertical stride (1 for raster, 2 for text).
fn sample_grid(img: &DynamicImage, cfg: &RenderConfig, aspect: u32) -> Vec<Vec<char>> {
    let ramp = active_ramp(cfg);
    let gray = img.to_luma8();
    let tile = cfg.font_size;
    let cols = gray.width() / tile;
    let rows = gray.height() / (tile * aspect);
    debug!("luma: {cols}x{rows} tiles of {tile}px, ramp of {}", ramp.len());

    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    let value = gray.get_pixel(col * tile, row * tile * aspect).0[0];
                    ramp[ramp_index(value, ramp.len())]
                })
                .collect()
        })
        .collect()
}

/// Produce the plain-text transcript: one character per tile, rows
/// newline-terminated, vertical stride aspect-corrected.
pub fn transcribe(img: &DynamicImage, cfg: &RenderConfig) -> Result<String, Error> {
    cfg.validate()?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage(width, height));
    }

    let corrected = gamma::apply(img, cfg.gamma);
    Ok(grid_to_text(&sample_grid(&corrected, cfg, TEXT_ASPECT)))
}

fn grid_to_text(grid: &[Vec<char>]) -> String {
    let mut text = String::new();
    for row in grid {
        text.extend(row.iter());
        text.push('\n');
    }
    text
}

#[cfg(feature = "render")]
pub use render::{LumaOutput, render_luma};

#[cfg(feature = "render")]
mod render {
    use std::path::PathBuf;

    use ab_glyph::{Font, PxScale};
    use image::{DynamicImage, GenericImageView, GrayImage, Luma, Rgb, RgbImage};
    use imageproc::drawing::draw_text_mut;

    use super::{TEXT_ASPECT, grid_to_text, sample_grid, scheme};
    use crate::config::RenderConfig;
    use crate::error::Error;
    use crate::{gamma, transcript};

    pub struct LumaOutput {
        pub image: DynamicImage,
        /// Path of the transcript file, when `text_output` was set.
        pub transcript: Option<PathBuf>,
    }

    /// Render the ramp-indexed raster image and, when configured, write the
    /// text transcript as an independent side effect.
    pub fn render_luma<F: Font>(
        img: &DynamicImage,
        font: &F,
        cfg: &RenderConfig,
    ) -> Result<LumaOutput, Error> {
        cfg.validate()?;
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage(width, height));
        }

        let corrected = gamma::apply(img, cfg.gamma);
        let grid = sample_grid(&corrected, cfg, 1);

        let tile = cfg.font_size;
        let scale = PxScale::from(tile as f32);
        let (background, foreground) = scheme(cfg.invert);

        let image = if cfg.color {
            let rgb = corrected.to_rgb8();
            let mut canvas = RgbImage::from_pixel(width, height, Rgb([background; 3]));
            for (row, line) in grid.iter().enumerate() {
                for (col, &ch) in line.iter().enumerate() {
                    let (x, y) = (col as u32 * tile, row as u32 * tile);
                    let fill = *rgb.get_pixel(x, y);
                    draw_text_mut(
                        &mut canvas,
                        fill,
                        x as i32,
                        y as i32,
                        scale,
                        font,
                        &ch.to_string(),
                    );
                }
            }
            DynamicImage::ImageRgb8(canvas)
        } else {
            let mut canvas = GrayImage::from_pixel(width, height, Luma([background]));
            for (row, line) in grid.iter().enumerate() {
                for (col, &ch) in line.iter().enumerate() {
                    let (x, y) = (col as u32 * tile, row as u32 * tile);
                    draw_text_mut(
                        &mut canvas,
                        Luma([foreground]),
                        x as i32,
                        y as i32,
                        scale,
                        font,
                        &ch.to_string(),
                    );
                }
            }
            DynamicImage::ImageLuma8(canvas)
        };

        let transcript = match &cfg.text_output {
            Some(dir) => {
                let text = grid_to_text(&sample_grid(&corrected, cfg, TEXT_ASPECT));
                Some(transcript::write_unique(dir, &text)?)
            }
            None => None,
        };

        Ok(LumaOutput { image, transcript })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::CharacterSet;
    use image::GrayImage;

    fn solid(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, image::Luma([value])))
    }

    fn low_detail_config(tile: u32) -> RenderConfig {
        RenderConfig {
            font_size: tile,
            charset: CharacterSet::LowDetail,
            ..Default::default()
        }
    }

    #[test]
    fn binary_ramp_thresholds_at_midpoint() {
        assert_eq!(ramp_index(127, 2), 0);
        assert_eq!(ramp_index(128, 2), 1);
        assert_eq!(ramp_index(0, 2), 0);
        assert_eq!(ramp_index(255, 2), 1);
    }

    #[test]
    fn single_symbol_ramp_never_divides() {
        for value in [0u8, 127, 255] {
            assert_eq!(ramp_index(value, 1), 0);
        }
    }

    #[test]
    fn linear_index_covers_the_whole_ramp() {
        assert_eq!(ramp_index(0, 6), 0);
        assert_eq!(ramp_index(255, 6), 5);
        assert_eq!(ramp_index(128, 6), 2);
    }

    #[test]
    fn solid_black_fills_the_grid_with_the_darkest_glyph() {
        // 12x12 at tile 6: tiles at (0,0),(6,0),(0,6),(6,6)
        let img = solid(12, 12, 0);
        let grid = sample_grid(&img, &low_detail_config(6), 1);
        assert_eq!(grid, vec![vec!['@', '@'], vec!['@', '@']]);
        assert_eq!(scheme(false), (255, 0));
    }

    #[test]
    fn invert_selects_the_lightest_glyph_on_black() {
        let img = solid(12, 12, 0);
        let cfg = RenderConfig {
            invert: true,
            ..low_detail_config(6)
        };
        let grid = sample_grid(&img, &cfg, 1);
        assert_eq!(grid, vec![vec![' ', ' '], vec![' ', ' ']]);
        assert_eq!(scheme(true), (0, 255));
    }

    #[test]
    fn transcript_rows_are_newline_terminated() {
        // aspect correction halves the row count: 12 / (6 * 2) = 1 row
        let text = transcribe(&solid(12, 12, 0), &low_detail_config(6)).unwrap();
        assert_eq!(text, "@@\n");
    }

    #[test]
    fn transcript_drops_remainder_pixels() {
        // 17x17 at tile 6: two columns, one aspect-corrected row
        let text = transcribe(&solid(17, 17, 255), &low_detail_config(6)).unwrap();
        assert_eq!(text, "  \n");
    }

    #[test]
    fn zero_size_image_is_rejected() {
        let img = DynamicImage::new_luma8(0, 12);
        assert!(matches!(
            transcribe(&img, &low_detail_config(6)),
            Err(Error::EmptyImage(0, 12))
        ));
    }

    #[test]
    fn top_left_pixel_decides_the_tile() {
        // only the corner pixel is dark; the rest of the tile is white
        let mut gray = GrayImage::from_pixel(6, 6, image::Luma([255]));
        gray.put_pixel(0, 0, image::Luma([0]));
        let img = DynamicImage::ImageLuma8(gray);

        let grid = sample_grid(&img, &low_detail_config(6), 1);
        assert_eq!(grid, vec![vec!['@']]);
    }

    #[test]
    fn gamma_shifts_ramp_selection() {
        let img = solid(6, 6, 64);
        let neutral = sample_grid(&gamma::apply(&img, 1.0), &low_detail_config(6), 1);
        let brightened = sample_grid(&gamma::apply(&img, 4.0), &low_detail_config(6), 1);
        let dark_rank = CharacterSet::LowDetail
            .chars()
            .iter()
            .position(|&c| c == neutral[0][0])
            .unwrap();
        let bright_rank = CharacterSet::LowDetail
            .chars()
            .iter()
            .position(|&c| c == brightened[0][0])
            .unwrap();
        assert!(bright_rank > dark_rank);
    }
}
