//! Unified error type for the jnd-engine public API.
//!
//! [`EngineError`] covers every failure the engine reports at its call
//! boundary. Cancellation is deliberately absent: a cancelled run returns a
//! partial result, not an error.

use std::num::ParseIntError;
use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,

    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Unified error type for the engine.
///
/// # Example
///
/// ```
/// use jnd_engine::{EngineError, SamplePoint};
///
/// let err = SamplePoint::new(1.5, 0.0).unwrap_err();
/// assert!(matches!(err, EngineError::CoordinateOutOfRange { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A coordinate outside the unit square (or non-finite) was supplied.
    #[error("coordinate ({x}, {y}) is outside the unit square")]
    CoordinateOutOfRange { x: f64, y: f64 },

    /// A sampling, tracing or metric parameter is malformed.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// An inverse transform produced RGB outside the unit cube under
    /// [`GamutPolicy::Report`](crate::GamutPolicy::Report).
    #[error("color ({r:.6}, {g:.6}, {b:.6}) is outside the sRGB gamut")]
    OutOfGamut { r: f64, g: f64, b: f64 },

    /// Invalid hex color string.
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
