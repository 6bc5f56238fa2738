use jnd_engine::{Colormap, DesignSpace, EngineError, Srgb};

use crate::models::BilinearConfig;

/// Bilinear blend of four corner colors in sRGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bilinear {
    bottom_left: Srgb,
    bottom_right: Srgb,
    top_left: Srgb,
    top_right: Srgb,
}

impl Bilinear {
    /// Corners at (0,0), (1,0), (0,1) and (1,1).
    pub fn new(bottom_left: Srgb, bottom_right: Srgb, top_left: Srgb, top_right: Srgb) -> Self {
        Self {
            bottom_left,
            bottom_right,
            top_left,
            top_right,
        }
    }

    /// Parse the hex corner colors of `config`.
    pub fn from_config(config: &BilinearConfig) -> Result<Self, EngineError> {
        Ok(Self::new(
            config.bottom_left.parse()?,
            config.bottom_right.parse()?,
            config.top_left.parse()?,
            config.top_right.parse()?,
        ))
    }
}

impl Colormap for Bilinear {
    fn color(&self, x: f64, y: f64) -> Srgb {
        let bottom = self.bottom_left.lerp(self.bottom_right, x);
        let top = self.top_left.lerp(self.top_right, x);
        bottom.lerp(top, y)
    }

    fn name(&self) -> &str {
        "bilinear"
    }

    fn description(&self) -> &str {
        "Four corner colors interpolated bilinearly in sRGB"
    }

    fn color_space(&self) -> DesignSpace {
        DesignSpace::Srgb
    }
}
