//! Color stops and gradient backgrounds
//!
//! Gradient stops are kept as the CSS strings the presentation layer consumes.
//! [`parse_color`] turns a stop into RGBA so callers can check it is well formed.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Parse a CSS color string into an RGBA color.
///
/// Hex stops (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`) take a fast path. Every
/// other CSS form (`rgb()`, `hsl()`, named colors) goes through lightningcss.
///
/// ```
/// use assetimage::color::parse_color;
///
/// assert_eq!(parse_color("#D4E0E3").unwrap(), image::Rgba([0xD4, 0xE0, 0xE3, 255]));
/// assert_eq!(parse_color("blue").unwrap(), image::Rgba([0, 0, 255, 255]));
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    match s.strip_prefix('#') {
        Some(hex) => parse_hex(hex),
        None => parse_css(s),
    }
}

fn parse_hex(hex: &str) -> Result<Rgba<u8>, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    // Digits are ASCII after the check above, so byte offsets are char offsets
    let channel = |range: std::ops::Range<usize>| -> u8 {
        let digits = &hex[range];
        let value = u8::from_str_radix(digits, 16).unwrap_or(0);
        if digits.len() == 1 {
            value * 17
        } else {
            value
        }
    };

    match hex.len() {
        3 => Ok(Rgba([channel(0..1), channel(1..2), channel(2..3), 255])),
        4 => Ok(Rgba([channel(0..1), channel(1..2), channel(2..3), channel(3..4)])),
        6 => Ok(Rgba([channel(0..2), channel(2..4), channel(4..6), 255])),
        8 => Ok(Rgba([channel(0..2), channel(2..4), channel(4..6), channel(6..8)])),
        len => Err(ColorError::InvalidLength(len)),
    }
}

fn parse_css(s: &str) -> Result<Rgba<u8>, ColorError> {
    let color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    match color.to_rgb() {
        Ok(CssColor::RGBA(rgba)) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        _ => Err(ColorError::CssParse(format!("cannot convert '{}' to RGB", s))),
    }
}

/// Two-stop radial gradient: `light` at the center, `dark` at the edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub light: String,
    pub dark: String,
}

impl Gradient {
    pub fn new(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Self { light: light.into(), dark: dark.into() }
    }

    /// CSS `background-image` value for this gradient.
    pub fn css(&self) -> String {
        format!("radial-gradient({}, {})", self.light, self.dark)
    }

    /// Both stops as RGBA, light first.
    pub fn rgba(&self) -> Result<(Rgba<u8>, Rgba<u8>), ColorError> {
        Ok((parse_color(&self.light)?, parse_color(&self.dark)?))
    }
}
