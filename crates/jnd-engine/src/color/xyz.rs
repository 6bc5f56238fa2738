//! CIE XYZ (D65, 2° observer), scaled so that white has `Y = 100`.

use serde::{Deserialize, Serialize};

use super::gamut::GamutPolicy;
use super::srgb::{linear_to_srgb, srgb_to_linear, Srgb};
use crate::api::EngineError;

/// D65 reference white.
pub const WHITE_X: f64 = 95.047;
pub const WHITE_Y: f64 = 100.000;
pub const WHITE_Z: f64 = 108.883;

/// Linear sRGB (scaled to 0..100) to XYZ.
const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// Exact inverse of [`SRGB_TO_XYZ`]. The commonly published 7-digit
/// inverse only round-trips to about 1e-6.
const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.2404548360214083, -1.5371388501025751, -0.4985315468684809],
    [-0.9692663898756537, 1.8760109288424913, 0.0415560823466735],
    [0.0556434196042137, -0.2040258542676981, 1.0572251624579287],
];

#[inline]
fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// A color in CIE XYZ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The D65 white point.
    pub const WHITE: Xyz = Xyz::new(WHITE_X, WHITE_Y, WHITE_Z);

    /// Convert back to sRGB, resolving out-of-gamut results with `policy`.
    pub fn to_srgb(self, policy: GamutPolicy) -> Result<Srgb, EngineError> {
        let raw = self.to_srgb_unclamped();
        policy.apply(raw.r, raw.g, raw.b)
    }

    /// Gamma-encoded channels without any gamut handling; may fall outside
    /// `0.0..=1.0`.
    pub fn to_srgb_unclamped(self) -> Srgb {
        let [r, g, b] = mul(&XYZ_TO_SRGB, [self.x, self.y, self.z]);
        // Encode the sign-preserved magnitude so out-of-gamut negatives
        // stay negative.
        let encode = |v: f64| {
            let v = v / 100.0;
            v.signum() * linear_to_srgb(v.abs())
        };
        Srgb::new(encode(r), encode(g), encode(b))
    }
}

impl From<Srgb> for Xyz {
    fn from(c: Srgb) -> Self {
        let linear = [
            srgb_to_linear(c.r) * 100.0,
            srgb_to_linear(c.g) * 100.0,
            srgb_to_linear(c.b) * 100.0,
        ];
        let [x, y, z] = mul(&SRGB_TO_XYZ, linear);
        Xyz { x, y, z }
    }
}
