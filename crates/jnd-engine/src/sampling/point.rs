//! Points of the unit square.

use serde::{Deserialize, Serialize};

use crate::api::EngineError;

/// A coordinate pair `(x, y)` in `[0,1]²`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

impl SamplePoint {
    /// Center of the unit square.
    pub const CENTER: SamplePoint = SamplePoint { x: 0.5, y: 0.5 };

    /// Create a validated point.
    ///
    /// # Errors
    ///
    /// [`EngineError::CoordinateOutOfRange`] when either coordinate is
    /// outside `[0,1]` or not finite.
    pub fn new(x: f64, y: f64) -> Result<Self, EngineError> {
        if in_unit_interval(x) && in_unit_interval(y) {
            Ok(Self { x, y })
        } else {
            Err(EngineError::CoordinateOutOfRange { x, y })
        }
    }

    /// Create a point the caller has already proven to be in range.
    #[inline]
    pub(crate) const fn new_unchecked(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in map space.
    #[inline]
    pub fn distance(self, other: SamplePoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[inline]
pub(crate) fn in_unit_interval(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}
