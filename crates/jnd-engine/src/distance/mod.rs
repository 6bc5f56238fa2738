//! Perceptual distance oracle.
//!
//! The rest of the engine depends only on the [`PerceptualDistance`]
//! contract: the result is non-negative, symmetric, and zero for identical
//! colors. Any calibrated metric satisfying it can be plugged into
//! [`JndAnalyzer`](crate::JndAnalyzer) or the quality metrics.
//!
//! # Metrics
//!
//! | Metric | Formula | Notes |
//! |--------|---------|-------|
//! | [`DistanceMetric::Cie76`] | Euclidean ΔE*ab | cheapest, over-weights saturated colors |
//! | [`DistanceMetric::Cie94`] | weighted L/C/H | symmetrised with the geometric-mean chroma |
//! | [`DistanceMetric::Ciede2000`] | CIE 142-2001 | default |

mod ciede2000;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::EngineError;
use crate::color::{Lab, Srgb};

pub use ciede2000::ciede2000;

/// A perceptual distance between two colors under fixed viewing conditions.
///
/// Implementors provide [`lab_distance`](Self::lab_distance); the engine
/// converts each color to [`Lab`] once and reuses it, so the sRGB entry
/// point [`distance`](Self::distance) is only a convenience.
pub trait PerceptualDistance: Send + Sync {
    /// Distance between two CIELAB colors.
    fn lab_distance(&self, a: Lab, b: Lab) -> f64;

    /// Distance between two device colors.
    fn distance(&self, a: Srgb, b: Srgb) -> f64 {
        self.lab_distance(Lab::from(a), Lab::from(b))
    }
}

/// Built-in CIE color-difference formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// CIE 1976 ΔE*ab (Euclidean distance in CIELAB).
    Cie76,
    /// CIE 1994 ΔE*94 with graphic-arts weights.
    Cie94,
    /// CIEDE2000 ΔE00.
    #[default]
    Ciede2000,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 3] = [
        DistanceMetric::Cie76,
        DistanceMetric::Cie94,
        DistanceMetric::Ciede2000,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DistanceMetric::Cie76 => "cie76",
            DistanceMetric::Cie94 => "cie94",
            DistanceMetric::Ciede2000 => "ciede2000",
        }
    }
}

impl PerceptualDistance for DistanceMetric {
    fn lab_distance(&self, a: Lab, b: Lab) -> f64 {
        match self {
            DistanceMetric::Cie76 => cie76(a, b),
            DistanceMetric::Cie94 => cie94(a, b),
            DistanceMetric::Ciede2000 => ciede2000(a, b),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMetric {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cie76" | "de76" => Ok(DistanceMetric::Cie76),
            "cie94" | "de94" => Ok(DistanceMetric::Cie94),
            "ciede2000" | "de2000" => Ok(DistanceMetric::Ciede2000),
            other => Err(EngineError::invalid(
                "distance",
                format!("unknown metric `{other}` (expected cie76, cie94 or ciede2000)"),
            )),
        }
    }
}

/// CIE 1976 color difference.
#[inline]
pub fn cie76(a: Lab, b: Lab) -> f64 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// CIE 1994 color difference (graphic arts: kL = 1, K1 = 0.045, K2 = 0.015).
///
/// The published formula weights chroma by the reference color only and is
/// therefore asymmetric; this version weights by `sqrt(C1·C2)`.
pub fn cie94(a: Lab, b: Lab) -> f64 {
    const K1: f64 = 0.045;
    const K2: f64 = 0.015;

    let c1 = a.chroma();
    let c2 = b.chroma();
    let c_mean = (c1 * c2).sqrt();

    let dl = a.l - b.l;
    let dc = c1 - c2;
    let da = a.a - b.a;
    let db = a.b - b.b;
    // ΔH² = Δa² + Δb² − ΔC², which can dip below zero by rounding
    let dh_sq = (da * da + db * db - dc * dc).max(0.0);

    let sc = 1.0 + K1 * c_mean;
    let sh = 1.0 + K2 * c_mean;

    let tc = dc / sc;
    (dl * dl + tc * tc + dh_sq / (sh * sh)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [Lab; 6] = [
        Lab::new(50.0, 2.6772, -79.7751),
        Lab::new(50.0, 0.0, -82.7485),
        Lab::new(73.0, 25.0, -18.0),
        Lab::new(20.0, -40.0, 10.0),
        Lab::new(95.0, 0.0, 0.0),
        Lab::new(0.0, 0.0, 0.0),
    ];

    #[test]
    fn test_contract_symmetric_and_non_negative() {
        for metric in DistanceMetric::ALL {
            for &a in &SAMPLES {
                assert_eq!(metric.lab_distance(a, a), 0.0, "{metric} self-distance");
                for &b in &SAMPLES {
                    let ab = metric.lab_distance(a, b);
                    let ba = metric.lab_distance(b, a);
                    assert!(ab >= 0.0, "{metric} negative distance");
                    assert!((ab - ba).abs() < 1e-9, "{metric} asymmetric: {ab} vs {ba}");
                }
            }
        }
    }

    #[test]
    fn test_cie76_lightness_only() {
        let d = cie76(Lab::new(30.0, 5.0, 5.0), Lab::new(33.0, 5.0, 5.0));
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_cie94_matches_cie76_for_grays() {
        // Zero chroma makes SC = SH = 1 and the formulas coincide
        let a = Lab::new(40.0, 0.0, 0.0);
        let b = Lab::new(47.5, 0.0, 0.0);
        assert!((cie94(a, b) - cie76(a, b)).abs() < 1e-12);
    }

    #[test]
    fn test_cie94_discounts_chroma_differences() {
        let a = Lab::new(50.0, 60.0, 0.0);
        let b = Lab::new(50.0, 70.0, 0.0);
        assert!(cie94(a, b) < cie76(a, b));
    }

    #[test]
    fn test_distance_on_srgb() {
        let d = DistanceMetric::Cie76.distance(Srgb::BLACK, Srgb::WHITE);
        assert!((d - 100.0).abs() < 1e-3, "black-white ΔE76 = {d}");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("CIEDE2000".parse::<DistanceMetric>().unwrap(), DistanceMetric::Ciede2000);
        assert_eq!(" cie76 ".parse::<DistanceMetric>().unwrap(), DistanceMetric::Cie76);
        assert_eq!("de94".parse::<DistanceMetric>().unwrap(), DistanceMetric::Cie94);
        assert!(matches!(
            "cam16".parse::<DistanceMetric>(),
            Err(EngineError::InvalidParameter { name: "distance", .. })
        ));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for metric in DistanceMetric::ALL {
            assert_eq!(metric.to_string().parse::<DistanceMetric>().unwrap(), metric);
        }
    }
}
