//! sRGB color type
//!
//! sRGB is the device color space colormaps produce. Every perceptual
//! evaluation in the engine starts here and goes through XYZ to CIELAB.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::ParseColorError;

/// A color in sRGB color space.
///
/// Values are in the range 0.0..=1.0 (mapping to 0..255 for 8-bit). The
/// type does not enforce the range: a colormap may return out-of-gamut
/// values, which [`gamut_violations`](crate::gamut_violations) can flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Srgb {
    /// Red channel (gamma-corrected, 0.0..=1.0)
    pub r: f64,
    /// Green channel (gamma-corrected, 0.0..=1.0)
    pub g: f64,
    /// Blue channel (gamma-corrected, 0.0..=1.0)
    pub b: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);

    /// Create a new Srgb color from float values.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from 8-bit unsigned integer values.
    ///
    /// # Example
    /// ```
    /// use jnd_engine::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Convert to a byte array [R, G, B], rounding and clamping to 0..=255.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Whether every channel lies in 0.0..=1.0 (within `1e-9`).
    #[inline]
    pub fn is_in_gamut(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|&v| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(&v))
    }

    /// Each channel clamped to 0.0..=1.0.
    #[inline]
    pub fn clamped(self) -> Srgb {
        Srgb {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Channel-wise linear interpolation, `t = 0` gives `self`.
    #[inline]
    pub fn lerp(self, other: Srgb, t: f64) -> Srgb {
        Srgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

/// Slack allowed when deciding whether a channel is in gamut.
pub(crate) const GAMUT_EPSILON: f64 = 1e-9;

/// IEC 61966-2-1 gamma decode.
#[inline]
pub fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1 gamma encode.
#[inline]
pub fn linear_to_srgb(v: f64) -> f64 {
    if v <= 0.0031308 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive; surrounding whitespace is trimmed.
    ///
    /// ```
    /// use jnd_engine::Srgb;
    ///
    /// let red: Srgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Srgb::new(1.0, 0.0, 0.0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        match s.len() {
            3 => {
                // 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_gamma_values() {
        assert!(srgb_to_linear(0.0).abs() < 1e-12);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-12);

        // ((0.5 + 0.055) / 1.055)^2.4 = 0.214041...
        assert!((srgb_to_linear(0.5) - 0.214041).abs() < 1e-6);
        // 1.055 * 0.5^(1/2.4) - 0.055 = 0.735356...
        assert!((linear_to_srgb(0.5) - 0.735356).abs() < 1e-6);
    }

    #[test]
    fn test_gamma_round_trip_across_segments() {
        for i in 0..=1000 {
            let v = i as f64 / 1000.0;
            let back = linear_to_srgb(srgb_to_linear(v));
            assert!((back - v).abs() < 1e-12, "round trip failed for {v}: {back}");
        }
    }

    #[test]
    fn test_byte_conversion() {
        let color = Srgb::from_u8(255, 128, 0);
        assert_eq!(color.r, 1.0);
        assert!((color.g - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(color.to_bytes(), [255, 128, 0]);
        assert_eq!(color.to_hex(), "#ff8000");
    }

    #[test]
    fn test_gamut_check() {
        assert!(Srgb::WHITE.is_in_gamut());
        assert!(Srgb::new(1.0 + 1e-12, 0.0, -1e-12).is_in_gamut());
        assert!(!Srgb::new(1.01, 0.5, 0.5).is_in_gamut());
        assert!(!Srgb::new(0.5, -0.01, 0.5).is_in_gamut());
        assert!(!Srgb::new(f64::NAN, 0.5, 0.5).is_in_gamut());
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Srgb::new(0.0, 0.2, 1.0);
        let b = Srgb::new(1.0, 0.4, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!((mid.g - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_hex_parsing() {
        let white: Srgb = "#FFFFFF".parse().unwrap();
        assert_eq!(white, Srgb::WHITE);

        let no_hash: Srgb = "000000".parse().unwrap();
        assert_eq!(no_hash, Srgb::BLACK);

        let short: Srgb = "#ABC".parse().unwrap();
        assert_eq!(short, Srgb::from_u8(0xAA, 0xBB, 0xCC));

        let padded: Srgb = "  #abcdef  ".parse().unwrap();
        let upper: Srgb = "#ABCDEF".parse().unwrap();
        assert_eq!(padded, upper);
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert!(matches!(
            "#GGG".parse::<Srgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#FFFF".parse::<Srgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!("".parse::<Srgb>(), Err(ParseColorError::InvalidLength)));
    }
}
