//! The colormap capability consumed by the engine.
//!
//! A colormap is a pure function from `[0,1]²` to a device color. The engine
//! only ever calls [`Colormap::color`] with validated coordinates, and may
//! call it from several rayon workers at once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::EngineError;
use crate::color::Srgb;
use crate::sampling::{SamplePoint, SamplingStrategy};

/// Color space a colormap's own formula is expressed in.
///
/// Informational only: the engine always evaluates through sRGB → CIELAB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignSpace {
    #[default]
    Srgb,
    Lab,
    Lch,
    Hsv,
    Hsl,
    Other,
}

impl fmt::Display for DesignSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DesignSpace::Srgb => "sRGB",
            DesignSpace::Lab => "CIELAB",
            DesignSpace::Lch => "LCh",
            DesignSpace::Hsv => "HSV",
            DesignSpace::Hsl => "HSL",
            DesignSpace::Other => "other",
        };
        f.write_str(name)
    }
}

/// A deterministic 2D colormap.
pub trait Colormap: Send + Sync {
    /// Color at `(x, y)`; both coordinates are in `[0,1]`.
    fn color(&self, x: f64, y: f64) -> Srgb;

    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn color_space(&self) -> DesignSpace {
        DesignSpace::Srgb
    }
}

/// Query a colormap at an already validated point.
#[inline]
pub fn color_at(colormap: &dyn Colormap, p: SamplePoint) -> Srgb {
    colormap.color(p.x, p.y)
}

/// Query a colormap at caller-supplied coordinates.
///
/// # Errors
///
/// [`EngineError::CoordinateOutOfRange`] instead of silently clamping.
pub fn checked_color(colormap: &dyn Colormap, x: f64, y: f64) -> Result<Srgb, EngineError> {
    let p = SamplePoint::new(x, y)?;
    Ok(color_at(colormap, p))
}

/// Sampled points at which the colormap returns a color outside the sRGB
/// cube (or a non-finite channel).
pub fn gamut_violations(
    colormap: &dyn Colormap,
    sampling: &dyn SamplingStrategy,
) -> Vec<SamplePoint> {
    sampling
        .points()
        .filter(|&p| !color_at(colormap, p).is_in_gamut())
        .collect()
}

/// The same color everywhere.
#[derive(Debug, Clone)]
pub struct ConstantColormap {
    name: String,
    color: Srgb,
}

impl ConstantColormap {
    pub fn new(name: impl Into<String>, color: Srgb) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

impl Colormap for ConstantColormap {
    fn color(&self, _x: f64, _y: f64) -> Srgb {
        self.color
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Single color over the whole square"
    }
}

/// Adapts a closure into a [`Colormap`].
///
/// ```
/// use jnd_engine::{Colormap, FnColormap, Srgb};
///
/// let ramp = FnColormap::new("ramp", |x, _y| Srgb::new(x, x, x));
/// assert_eq!(ramp.color(0.5, 0.9), Srgb::new(0.5, 0.5, 0.5));
/// ```
pub struct FnColormap<F> {
    name: String,
    space: DesignSpace,
    f: F,
}

impl<F> FnColormap<F>
where
    F: Fn(f64, f64) -> Srgb + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            space: DesignSpace::Srgb,
            f,
        }
    }

    pub fn with_space(mut self, space: DesignSpace) -> Self {
        self.space = space;
        self
    }
}

impl<F> Colormap for FnColormap<F>
where
    F: Fn(f64, f64) -> Srgb + Send + Sync,
{
    fn color(&self, x: f64, y: f64) -> Srgb {
        (self.f)(x, y)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn color_space(&self) -> DesignSpace {
        self.space
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::GridSampling;

    #[test]
    fn test_checked_color_rejects_out_of_range() {
        let cmap = ConstantColormap::new("c", Srgb::WHITE);
        assert_eq!(checked_color(&cmap, 0.2, 1.0).unwrap(), Srgb::WHITE);
        assert!(matches!(
            checked_color(&cmap, 1.2, 0.5),
            Err(EngineError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_gamut_violations_flags_bad_output() {
        // Overshoots above x = 0.5
        let cmap = FnColormap::new("overshoot", |x, _| Srgb::new(2.0 * x, 0.0, 0.0));
        let grid = GridSampling::new(5).unwrap();
        let bad = gamut_violations(&cmap, &grid);
        assert_eq!(bad.len(), 10);
        assert!(bad.iter().all(|p| p.x > 0.5));
    }

    #[test]
    fn test_defaults() {
        let cmap = FnColormap::new("f", |_, _| Srgb::BLACK);
        assert_eq!(cmap.description(), "");
        assert_eq!(cmap.color_space(), DesignSpace::Srgb);
        let lab = cmap.with_space(DesignSpace::Lab);
        assert_eq!(lab.color_space(), DesignSpace::Lab);
        assert_eq!(DesignSpace::Lab.to_string(), "CIELAB");
    }
}
