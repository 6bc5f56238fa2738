//! Built-in colormaps.
//!
//! | Name | Design space | Formula |
//! |------|--------------|---------|
//! | `constant` | sRGB | one configured color |
//! | `grayscale` | sRGB | `(x, x, x)` |
//! | `bilinear` | sRGB | four corner colors blended bilinearly |
//! | `lightness-hue` | LCh | L* along x, hue along y |
//! | `lab-plane` | CIELAB | a*, b* plane at fixed L* |

mod bilinear;
mod perceptual;

use jnd_engine::{Colormap, ConstantColormap, DesignSpace, Srgb};

use crate::error::AppError;
use crate::models::AppConfig;

pub use bilinear::Bilinear;
pub use perceptual::{LabPlane, LightnessHue};

/// Catalog names, in listing order
pub const BUILTIN: [&str; 5] = [
    "constant",
    "grayscale",
    "bilinear",
    "lightness-hue",
    "lab-plane",
];

/// Gray ramp along x, constant along y.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grayscale;

impl Colormap for Grayscale {
    fn color(&self, x: f64, _y: f64) -> Srgb {
        Srgb::new(x, x, x)
    }

    fn name(&self) -> &str {
        "grayscale"
    }

    fn description(&self) -> &str {
        "Gray ramp along x, constant along y"
    }

    fn color_space(&self) -> DesignSpace {
        DesignSpace::Srgb
    }
}

/// Build a catalog colormap by name.
pub fn build(name: &str, config: &AppConfig) -> Result<Box<dyn Colormap>, AppError> {
    Ok(match name {
        "constant" => {
            let color: Srgb = config
                .constant_color
                .parse()
                .map_err(jnd_engine::EngineError::from)?;
            Box::new(ConstantColormap::new("constant", color))
        }
        "grayscale" => Box::new(Grayscale),
        "bilinear" => Box::new(Bilinear::from_config(&config.bilinear)?),
        "lightness-hue" => Box::new(LightnessHue::default()),
        "lab-plane" => Box::new(LabPlane::default()),
        other => return Err(AppError::UnknownColormap(other.to_string())),
    })
}

/// Build every named colormap, failing on the first unknown name.
pub fn build_all(
    names: &[String],
    config: &AppConfig,
) -> Result<Vec<Box<dyn Colormap>>, AppError> {
    names.iter().map(|name| build(name, config)).collect()
}
