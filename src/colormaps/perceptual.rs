//! Colormaps designed in CIELAB and LCh.
//!
//! Both clamp to the sRGB cube where their formula leaves it.

use jnd_engine::{Colormap, DesignSpace, Lab, Lch, Srgb};

/// Lightness ramp along x, full hue circle along y, at fixed chroma.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightnessHue {
    pub min_lightness: f64,
    pub max_lightness: f64,
    pub chroma: f64,
}

impl Default for LightnessHue {
    fn default() -> Self {
        Self {
            min_lightness: 30.0,
            max_lightness: 90.0,
            chroma: 30.0,
        }
    }
}

impl Colormap for LightnessHue {
    fn color(&self, x: f64, y: f64) -> Srgb {
        let l = self.min_lightness + (self.max_lightness - self.min_lightness) * x;
        Lab::from(Lch::new(l, self.chroma, 360.0 * y)).to_srgb_clamped()
    }

    fn name(&self) -> &str {
        "lightness-hue"
    }

    fn description(&self) -> &str {
        "L* along x, hue angle along y, constant chroma"
    }

    fn color_space(&self) -> DesignSpace {
        DesignSpace::Lch
    }
}

/// The a*/b* plane at a fixed lightness; x maps to a*, y to b*.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabPlane {
    pub lightness: f64,
    /// Half-width of the a* and b* ranges
    pub extent: f64,
}

impl Default for LabPlane {
    fn default() -> Self {
        Self {
            lightness: 65.0,
            extent: 40.0,
        }
    }
}

impl Colormap for LabPlane {
    fn color(&self, x: f64, y: f64) -> Srgb {
        let a = self.extent * (2.0 * x - 1.0);
        let b = self.extent * (2.0 * y - 1.0);
        Lab::new(self.lightness, a, b).to_srgb_clamped()
    }

    fn name(&self) -> &str {
        "lab-plane"
    }

    fn description(&self) -> &str {
        "a* along x and b* along y at constant L*"
    }

    fn color_space(&self) -> DesignSpace {
        DesignSpace::Lab
    }
}
