//! Out-of-gamut handling for inverse transforms.

use serde::{Deserialize, Serialize};

use super::srgb::{Srgb, GAMUT_EPSILON};
use crate::api::EngineError;

/// What to do when an inverse transform lands outside the sRGB cube.
///
/// The core never clamps on its own: callers pick the policy explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamutPolicy {
    /// Clamp each channel to 0.0..=1.0.
    #[default]
    Clamp,
    /// Fail with [`EngineError::OutOfGamut`].
    Report,
}

impl GamutPolicy {
    /// Apply the policy to raw gamma-encoded channels.
    ///
    /// # Example
    ///
    /// ```
    /// use jnd_engine::{GamutPolicy, Srgb};
    ///
    /// let clamped = GamutPolicy::Clamp.apply(1.2, 0.5, -0.1).unwrap();
    /// assert_eq!(clamped, Srgb::new(1.0, 0.5, 0.0));
    /// assert!(GamutPolicy::Report.apply(1.2, 0.5, -0.1).is_err());
    /// ```
    pub fn apply(self, r: f64, g: f64, b: f64) -> Result<Srgb, EngineError> {
        let raw = Srgb::new(r, g, b);
        match self {
            GamutPolicy::Clamp => Ok(raw.clamped()),
            // Absorb rounding noise at the cube faces
            GamutPolicy::Report if raw.is_in_gamut() => Ok(raw.clamped()),
            GamutPolicy::Report => Err(EngineError::OutOfGamut { r, g, b }),
        }
    }
}
