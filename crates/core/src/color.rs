//! RGB color with linear per-channel blending.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a `#rrggbb` color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("expected a '#rrggbb' color, got {0:?}")]
    BadFormat(String),

    #[error("invalid hex digits in color {0:?}")]
    BadDigit(String),
}

/// RGB color with f32 channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `#rrggbb` string (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(ColorParseError::BadFormat(hex.to_string()));
        }
        let parse = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::BadDigit(hex.to_string()))
        };
        Ok(Self::from_rgb8(
            parse(&digits[0..2])?,
            parse(&digits[2..4])?,
            parse(&digits[4..6])?,
        ))
    }

    /// Linear per-channel blend toward `other`.
    ///
    /// `t = 0` returns `self`, `t = 1` returns `other`. No gamma correction
    /// is applied; the blend happens in whatever space the channels are in.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Format as `#rrggbb`, clamping channels into range first.
    pub fn to_hex(self) -> String {
        let to8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", to8(self.r), to8(self.g), to8(self.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_with_hash() {
        let c = Color::from_hex("#f12f43").unwrap();
        assert!((c.r - 241.0 / 255.0).abs() < 1e-6);
        assert!((c.g - 47.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 67.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn parse_hex_without_hash() {
        assert_eq!(Color::from_hex("ffffff").unwrap(), Color::WHITE);
        assert_eq!(Color::from_hex("000000").unwrap(), Color::BLACK);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            Color::from_hex("#fff"),
            Err(ColorParseError::BadFormat(_))
        ));
        assert!(matches!(
            Color::from_hex("#zzzzzz"),
            Err(ColorParseError::BadDigit(_))
        ));
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn lerp_endpoints() {
        let a = Color::new(0.2, 0.4, 0.6);
        let b = Color::new(1.0, 0.0, 0.5);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn hex_roundtrip() {
        for hex in ["#f12f43", "#823293", "#000000", "#ffffff"] {
            assert_eq!(Color::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn lerp_midpoint() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.g - 0.5).abs() < 1e-6);
        assert!((mid.b - 0.5).abs() < 1e-6);
    }
}
