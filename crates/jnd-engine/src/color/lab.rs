//! CIELAB and its polar form LCh.
//!
//! CIELAB is the perceptual coordinate system every distance metric in the
//! engine works on. It is derived from [`Xyz`] relative to the D65 white
//! point using the classic CIE 1976 formulas with the `0.008856` / `7.787`
//! constants.

use serde::{Deserialize, Serialize};

use super::gamut::GamutPolicy;
use super::srgb::Srgb;
use super::xyz::{Xyz, WHITE_X, WHITE_Y, WHITE_Z};
use crate::api::EngineError;

const EPSILON: f64 = 0.008856;
const KAPPA: f64 = 7.787;
const OFFSET: f64 = 16.0 / 116.0;

#[inline]
fn f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA * t + OFFSET
    }
}

#[inline]
fn f_inv(t: f64) -> f64 {
    let cube = t * t * t;
    if cube > EPSILON {
        cube
    } else {
        (t - OFFSET) / KAPPA
    }
}

/// A color in CIELAB.
///
/// - `l`: lightness, 0 (black) to 100 (white)
/// - `a`: green (negative) to red (positive)
/// - `b`: blue (negative) to yellow (positive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, `sqrt(a² + b²)`.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Convert back to sRGB through XYZ.
    ///
    /// ```
    /// use jnd_engine::{GamutPolicy, Lab, Srgb};
    ///
    /// let c = Srgb::new(0.25, 0.5, 0.75);
    /// let back = Lab::from(c).to_srgb(GamutPolicy::Report).unwrap();
    /// assert!((back.g - 0.5).abs() < 1e-9);
    /// ```
    pub fn to_srgb(self, policy: GamutPolicy) -> Result<Srgb, EngineError> {
        Xyz::from(self).to_srgb(policy)
    }

    /// Convert back to sRGB, clamping out-of-gamut channels.
    pub fn to_srgb_clamped(self) -> Srgb {
        Xyz::from(self).to_srgb_unclamped().clamped()
    }
}

impl From<Xyz> for Lab {
    fn from(xyz: Xyz) -> Self {
        let fx = f(xyz.x / WHITE_X);
        let fy = f(xyz.y / WHITE_Y);
        let fz = f(xyz.z / WHITE_Z);
        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Lab> for Xyz {
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;
        Xyz::new(
            f_inv(fx) * WHITE_X,
            f_inv(fy) * WHITE_Y,
            f_inv(fz) * WHITE_Z,
        )
    }
}

impl From<Srgb> for Lab {
    #[inline]
    fn from(c: Srgb) -> Self {
        Lab::from(Xyz::from(c))
    }
}

/// Polar CIELAB: lightness, chroma and hue angle in degrees (0..360).
///
/// For achromatic colors the hue is undefined and reported as 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Lch {
    #[inline]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Visual "attention" of a color, `sqrt(L² + C²)`.
    ///
    /// Bright, saturated colors draw the eye more than dark, muted ones.
    #[inline]
    pub fn attention(self) -> f64 {
        self.l.hypot(self.c)
    }
}

impl From<Lab> for Lch {
    fn from(lab: Lab) -> Self {
        let h = lab.b.atan2(lab.a).to_degrees();
        Lch {
            l: lab.l,
            c: lab.chroma(),
            h: if h < 0.0 { h + 360.0 } else { h },
        }
    }
}

impl From<Lch> for Lab {
    fn from(lch: Lch) -> Self {
        let h = lch.h.to_radians();
        Lab::new(lch.l, lch.c * h.cos(), lch.c * h.sin())
    }
}
