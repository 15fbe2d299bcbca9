//! Named character sets and glyph ramps.
//!
//! Order is significant: for the luminance-ramp driver it defines the
//! darkest-to-lightest indexing, for the mosaic driver it only breaks ties
//! (first-seen wins). The list of names is static; nothing is constructed at
//! runtime except `Custom`.
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterSet {
    HighDetail,
    LowDetail,
    Binary,
    Shaded,
    ExtendedShading,
    IntermediateDetail,
    Checkerboard,
    VerticalLines,
    HorizontalLines,
    DiagonalLines,
    Arrows,
    Circles,
    Blocks,
    Triangles,
    MathSymbols,
    Stars,
    /// All code points 0..255, comparison driver only.
    Range0To255,
    /// Printable ASCII, 32..127.
    Range32To127,
    /// Printable ASCII plus Latin-1, 32..255.
    Range32To255,
    Custom(String),
}

impl CharacterSet {
    /// Look up a set by its host-facing display name.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        Ok(match name {
            "High Detail" => CharacterSet::HighDetail,
            "Low Detail" => CharacterSet::LowDetail,
            "Binary" => CharacterSet::Binary,
            "Shaded" => CharacterSet::Shaded,
            "Extended Shading" => CharacterSet::ExtendedShading,
            "Intermediate Detail" => CharacterSet::IntermediateDetail,
            "Checkerboard Patterns" => CharacterSet::Checkerboard,
            "Vertical Lines" => CharacterSet::VerticalLines,
            "Horizontal Lines" => CharacterSet::HorizontalLines,
            "Diagonal Lines" => CharacterSet::DiagonalLines,
            "Arrows" => CharacterSet::Arrows,
            "Circles" => CharacterSet::Circles,
            "Blocks" => CharacterSet::Blocks,
            "Triangles" => CharacterSet::Triangles,
            "Math Symbols" => CharacterSet::MathSymbols,
            "Stars" => CharacterSet::Stars,
            "0-255" => CharacterSet::Range0To255,
            "32-127" => CharacterSet::Range32To127,
            "32-255" => CharacterSet::Range32To255,
            other => return Err(Error::UnknownCharset(other.to_string())),
        })
    }

    pub fn custom(chars: &str) -> Self {
        Self::Custom(chars.to_string())
    }

    /// The ordered glyph sequence of this set.
    pub fn chars(&self) -> Vec<char> {
        match self {
            CharacterSet::HighDetail => HIGH_DETAIL.chars().collect(),
            CharacterSet::LowDetail => LOW_DETAIL.chars().collect(),
            CharacterSet::Binary => BINARY.chars().collect(),
            CharacterSet::Shaded => SHADED.chars().collect(),
            CharacterSet::ExtendedShading => EXTENDED_SHADING.chars().collect(),
            CharacterSet::IntermediateDetail => INTERMEDIATE_DETAIL.chars().collect(),
            CharacterSet::Checkerboard => CHECKERBOARD.chars().collect(),
            CharacterSet::VerticalLines => VERTICAL_LINES.chars().collect(),
            CharacterSet::HorizontalLines => HORIZONTAL_LINES.chars().collect(),
            CharacterSet::DiagonalLines => DIAGONAL_LINES.chars().collect(),
            CharacterSet::Arrows => ARROWS.chars().collect(),
            CharacterSet::Circles => CIRCLES.chars().collect(),
            CharacterSet::Blocks => BLOCKS.chars().collect(),
            CharacterSet::Triangles => TRIANGLES.chars().collect(),
            CharacterSet::MathSymbols => MATH_SYMBOLS.chars().collect(),
            CharacterSet::Stars => STARS.chars().collect(),
            CharacterSet::Range0To255 => (0u32..255).filter_map(char::from_u32).collect(),
            CharacterSet::Range32To127 => (32u32..127).filter_map(char::from_u32).collect(),
            CharacterSet::Range32To255 => (32u32..255).filter_map(char::from_u32).collect(),
            CharacterSet::Custom(chars) => chars.chars().collect(),
        }
    }

    /// The ramp with inverted order. Reversing twice restores the original.
    pub fn reversed_chars(&self) -> Vec<char> {
        let mut chars = self.chars();
        chars.reverse();
        chars
    }
}

// ASCII ramps, darkest glyph first
const HIGH_DETAIL: &str = r##"$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\|()1{}[]?-_+~<>i!lI;:,\^`'. "##; // 70 chars
const LOW_DETAIL: &str = r##"@#=-. "##; // 6 chars
const BINARY: &str = r##"@ "##; // 2 chars, midpoint thresholding

// Unicode ramps
const SHADED: &str = "█▓▒░ ";
const EXTENDED_SHADING: &str = "█▇▆▅▄▃▂▁▀";
const INTERMEDIATE_DETAIL: &str = "◼◐○□ ";
const CHECKERBOARD: &str = "▝▜▛▚▙▘▗▖ ";
const VERTICAL_LINES: &str = "┋┊┇┆┃│ ";
const HORIZONTAL_LINES: &str = "┉┈┅┄━─ ";
const DIAGONAL_LINES: &str = "╱╳╲ ";
const ARROWS: &str = "↙↘↗↖↕↔↓→↑← ";
const CIRCLES: &str = "◑◐◕◔○● ";
const BLOCKS: &str = "▁▂▃▄▅▆▇█ ";
const TRIANGLES: &str = "▷◁◶▷▽▼△▲ ";
const MATH_SYMBOLS: &str = "∓±÷×−+ ";
const STARS: &str = "✬✫✪✩✧✦☆★ ";
