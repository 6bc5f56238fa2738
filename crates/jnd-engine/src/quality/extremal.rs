use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::QualityMetric;
use crate::api::EngineError;
use crate::color::{Lab, Srgb};
use crate::colormap::{color_at, Colormap};
use crate::distance::{DistanceMetric, PerceptualDistance};
use crate::jnd::ProgressMonitor;
use crate::sampling::SamplingStrategy;

/// Reference color(s) for [`ExtremalDistance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extremum {
    Black,
    White,
    #[default]
    Both,
}

/// Smallest perceptual distance from any sampled color to black, white or
/// either. Higher keeps the map clear of black text and white backgrounds.
pub struct ExtremalDistance {
    sampling: Box<dyn SamplingStrategy>,
    distance: Arc<dyn PerceptualDistance>,
    extremum: Extremum,
}

impl ExtremalDistance {
    pub fn new(sampling: impl SamplingStrategy + 'static, extremum: Extremum) -> Self {
        Self {
            sampling: Box::new(sampling),
            distance: Arc::new(DistanceMetric::default()),
            extremum,
        }
    }

    pub fn distance(mut self, distance: impl PerceptualDistance + 'static) -> Self {
        self.distance = Arc::new(distance);
        self
    }

    fn references(&self) -> Vec<Lab> {
        let black = Lab::from(Srgb::BLACK);
        let white = Lab::from(Srgb::WHITE);
        match self.extremum {
            Extremum::Black => vec![black],
            Extremum::White => vec![white],
            Extremum::Both => vec![black, white],
        }
    }
}

impl QualityMetric for ExtremalDistance {
    fn name(&self) -> &str {
        match self.extremum {
            Extremum::Black => "min_distance_black",
            Extremum::White => "min_distance_white",
            Extremum::Both => "min_distance_extremes",
        }
    }

    fn quality(
        &self,
        colormap: &dyn Colormap,
        _progress: &dyn ProgressMonitor,
    ) -> Result<f64, EngineError> {
        let refs = self.references();
        let min = self
            .sampling
            .points()
            .map(|p| {
                let lab = Lab::from(color_at(colormap, p));
                refs.iter()
                    .map(|r| self.distance.lab_distance(lab, *r))
                    .fold(f64::INFINITY, f64::min)
            })
            .fold(f64::INFINITY, f64::min);
        Ok(min)
    }

    fn more_is_better(&self) -> bool {
        true
    }
}
