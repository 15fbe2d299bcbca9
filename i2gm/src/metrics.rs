//! Similarity metrics between a source tile and a reference glyph bitmap.
//!
//! All metrics operate on two equal-shaped single-channel pixel blocks and
//! return a distance where lower means more similar. SSIM natively measures
//! similarity, so it is negated here; callers can always take a minimum.
use serde::{Deserialize, Serialize};

// SSIM stabilizing constants, k1 = 0.01, k2 = 0.03, L = 255
const SSIM_C1: f64 = (0.01 * 255.0) * (0.01 * 255.0);
const SSIM_C2: f64 = (0.03 * 255.0) * (0.03 * 255.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Sum of Absolute Differences.
    Sad,
    /// Mean Squared Error.
    Mse,
    /// Structural Similarity Index, negated into a distance.
    Ssim,
    /// Normalized Average Luminance difference.
    Nal,
}

/// Mean and population variance of a pixel block, computed once and reused
/// across every comparison involving that block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStats {
    pub mean: f64,
    pub variance: f64,
}

impl BlockStats {
    pub fn of(block: &[u8]) -> Self {
        if block.is_empty() {
            return Self {
                mean: 0.0,
                variance: 0.0,
            };
        }
        let n = block.len() as f64;
        let sum: f64 = block.iter().map(|&p| f64::from(p)).sum();
        let mean = sum / n;
        let variance = block
            .iter()
            .map(|&p| {
                let d = f64::from(p) - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        Self { mean, variance }
    }
}

/// One reference glyph bitmap as seen by the metrics: its pixel block, its
/// precomputed stats, and its NAL-rescaled mean luminance.
#[derive(Debug, Clone, Copy)]
pub struct Reference<'a> {
    pub block: &'a [u8],
    pub stats: BlockStats,
    pub scaled_luma: f64,
}

impl Metric {
    /// Distance between a tile block and a reference glyph. `tile` and
    /// `reference.block` must have identical dimensions.
    pub fn distance(self, tile: &[u8], tile_stats: &BlockStats, reference: &Reference<'_>) -> f64 {
        match self {
            Metric::Sad => sad(tile, reference.block),
            Metric::Mse => mse(tile, reference.block),
            Metric::Ssim => -ssim(tile, tile_stats, reference),
            Metric::Nal => (tile_stats.mean - reference.scaled_luma).abs(),
        }
    }
}

fn sad(a: &[u8], b: &[u8]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| u32::from(x.abs_diff(y)))
        .sum::<u32>() as f64
}

fn mse(a: &[u8], b: &[u8]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum();
    sum / a.len() as f64
}

fn ssim(tile: &[u8], tile_stats: &BlockStats, reference: &Reference<'_>) -> f64 {
    let mu_a = tile_stats.mean;
    let mu_b = reference.stats.mean;
    let var_a = tile_stats.variance;
    let var_b = reference.stats.variance;

    // Global covariance over the whole block; the reference mean is already
    // cached, so only one pass over the pixels is needed per call.
    let covariance = if tile.is_empty() {
        0.0
    } else {
        tile.iter()
            .zip(reference.block)
            .map(|(&x, &y)| (f64::from(x) - mu_a) * (f64::from(y) - mu_b))
            .sum::<f64>()
            / tile.len() as f64
    };

    ((2.0 * mu_a * mu_b + SSIM_C1) * (2.0 * covariance + SSIM_C2))
        / ((mu_a * mu_a + mu_b * mu_b + SSIM_C1) * (var_a + var_b + SSIM_C2))
}
