use std::sync::Arc;

use super::QualityMetric;
use crate::api::EngineError;
use crate::colormap::Colormap;
use crate::distance::{DistanceMetric, PerceptualDistance};
use crate::jnd::{build_point_set, validate_threshold, ProgressMonitor};
use crate::sampling::SamplingStrategy;

/// Number of mutually distinguishable colors the map offers, i.e. the size
/// of its JND point set. Higher is better.
///
/// NaN when cancellation stops the point set early.
pub struct DistinguishableColors {
    threshold: f64,
    sampling: Box<dyn SamplingStrategy>,
    distance: Arc<dyn PerceptualDistance>,
    parallel: bool,
}

impl DistinguishableColors {
    /// # Errors
    ///
    /// `threshold` must be finite and positive.
    pub fn new(
        threshold: f64,
        sampling: impl SamplingStrategy + 'static,
    ) -> Result<Self, EngineError> {
        validate_threshold(threshold)?;
        Ok(Self {
            threshold,
            sampling: Box::new(sampling),
            distance: Arc::new(DistanceMetric::default()),
            parallel: false,
        })
    }

    pub fn distance(mut self, distance: impl PerceptualDistance + 'static) -> Self {
        self.distance = Arc::new(distance);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl QualityMetric for DistinguishableColors {
    fn name(&self) -> &str {
        "distinguishable_colors"
    }

    fn quality(
        &self,
        colormap: &dyn Colormap,
        progress: &dyn ProgressMonitor,
    ) -> Result<f64, EngineError> {
        let set = build_point_set(
            colormap,
            &*self.sampling,
            self.threshold,
            &*self.distance,
            progress,
            self.parallel,
        )?;
        if !set.is_complete() {
            return Ok(f64::NAN);
        }
        Ok(set.len() as f64)
    }

    fn more_is_better(&self) -> bool {
        true
    }
}
