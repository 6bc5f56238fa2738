//! JndAnalyzer builder, the ergonomic entry point for JND analysis.
//!
//! [`JndAnalyzer`] bundles a threshold, a distance oracle and region-tracing
//! parameters, and runs the point-set builder and region tracer with them.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::EngineError;
use crate::colormap::Colormap;
use crate::distance::{DistanceMetric, PerceptualDistance};
use crate::jnd::{
    build_point_set, validate_threshold, JndPointSet, ProgressMonitor, RegionMap, RegionTracer,
};
use crate::sampling::SamplingStrategy;

/// Point set and regions of one colormap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JndAnalysis {
    pub colormap: String,
    pub point_set: JndPointSet,
    pub regions: RegionMap,
}

impl JndAnalysis {
    /// `false` when either stage was cancelled.
    pub fn is_complete(&self) -> bool {
        self.point_set.is_complete() && self.regions.is_complete()
    }
}

/// JND analysis builder.
///
/// - Constructor validates the threshold (no invalid states)
/// - Configuration methods consume and return `self`
/// - Analysis methods take `&self`, so one analyzer serves many colormaps
///
/// # Example
///
/// ```
/// use jnd_engine::{
///     ConstantColormap, DistanceMetric, GridSampling, JndAnalyzer, SilentProgress, Srgb,
/// };
///
/// let analyzer = JndAnalyzer::new(3.0)
///     .unwrap()
///     .distance(DistanceMetric::Cie76);
///
/// let cmap = ConstantColormap::new("flat", Srgb::new(0.2, 0.4, 0.6));
/// let grid = GridSampling::new(10).unwrap();
/// let set = analyzer.point_set(&cmap, &grid, &SilentProgress).unwrap();
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Clone)]
pub struct JndAnalyzer {
    threshold: f64,
    distance: Arc<dyn PerceptualDistance>,
    tracer: RegionTracer,
    parallel: bool,
}

impl fmt::Debug for JndAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JndAnalyzer")
            .field("threshold", &self.threshold)
            .field("tracer", &self.tracer)
            .field("parallel", &self.parallel)
            .finish_non_exhaustive()
    }
}

impl JndAnalyzer {
    /// Analyzer with CIEDE2000, the default tracer and sequential execution.
    ///
    /// # Errors
    ///
    /// `threshold` must be finite and positive.
    pub fn new(threshold: f64) -> Result<Self, EngineError> {
        validate_threshold(threshold)?;
        Ok(Self {
            threshold,
            distance: Arc::new(DistanceMetric::default()),
            tracer: RegionTracer::default(),
            parallel: false,
        })
    }

    /// Replace the perceptual distance oracle.
    #[inline]
    pub fn distance(mut self, distance: impl PerceptualDistance + 'static) -> Self {
        self.distance = Arc::new(distance);
        self
    }

    /// Share an oracle that is already behind an `Arc`.
    #[inline]
    pub fn shared_distance(mut self, distance: Arc<dyn PerceptualDistance>) -> Self {
        self.distance = distance;
        self
    }

    #[inline]
    pub fn tracer(mut self, tracer: RegionTracer) -> Self {
        self.tracer = tracer;
        self
    }

    /// Use the rayon pool. Results are identical either way.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Greedy JND point set of `colormap` under `sampling`.
    pub fn point_set(
        &self,
        colormap: &dyn Colormap,
        sampling: &dyn SamplingStrategy,
        progress: &dyn ProgressMonitor,
    ) -> Result<JndPointSet, EngineError> {
        build_point_set(
            colormap,
            sampling,
            self.threshold,
            &*self.distance,
            progress,
            self.parallel,
        )
    }

    /// Regions around every member of `set`.
    pub fn regions(
        &self,
        colormap: &dyn Colormap,
        set: &JndPointSet,
        progress: &dyn ProgressMonitor,
    ) -> RegionMap {
        self.tracer
            .trace_all(colormap, set, &*self.distance, progress, self.parallel)
    }

    /// Point set followed by its regions.
    ///
    /// A cancellation during the first stage leaves every region absent.
    pub fn analyze(
        &self,
        colormap: &dyn Colormap,
        sampling: &dyn SamplingStrategy,
        progress: &dyn ProgressMonitor,
    ) -> Result<JndAnalysis, EngineError> {
        let point_set = self.point_set(colormap, sampling, progress)?;
        let regions = self.regions(colormap, &point_set, progress);
        tracing::debug!(
            colormap = colormap.name(),
            points = point_set.len(),
            regions = regions.completed(),
            "JND analysis finished"
        );
        Ok(JndAnalysis {
            colormap: colormap.name().to_string(),
            point_set,
            regions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;
    use crate::colormap::FnColormap;
    use crate::jnd::{CancellationToken, SilentProgress};
    use crate::sampling::{CircularSampling, GridSampling};

    #[test]
    fn test_new_validates_threshold() {
        assert!(JndAnalyzer::new(-1.0).is_err());
        assert!(JndAnalyzer::new(f64::INFINITY).is_err());
        assert_eq!(JndAnalyzer::new(2.5).unwrap().threshold(), 2.5);
    }

    #[test]
    fn test_analyze_produces_one_region_per_point() {
        let cmap = FnColormap::new("rg", |x, y| Srgb::new(x, y, 0.2));
        let analyzer = JndAnalyzer::new(12.0)
            .unwrap()
            .tracer(RegionTracer::new(16, 0.005).unwrap())
            .parallel(true);
        let circular = CircularSampling::new(6).unwrap();
        let analysis = analyzer.analyze(&cmap, &circular, &SilentProgress).unwrap();
        assert!(analysis.is_complete());
        assert_eq!(analysis.colormap, "rg");
        assert_eq!(analysis.regions.len(), analysis.point_set.len());
        for entry in analysis.regions.iter() {
            assert_eq!(entry.region.as_ref().map(|r| r.vertices.len()), Some(16));
        }
    }

    #[test]
    fn test_precancelled_run_is_empty_but_valid() {
        let cmap = FnColormap::new("rg", |x, y| Srgb::new(x, y, 0.2));
        let token = CancellationToken::new();
        token.cancel();
        let analysis = JndAnalyzer::new(3.0)
            .unwrap()
            .analyze(&cmap, &GridSampling::new(5).unwrap(), &token)
            .unwrap();
        assert!(!analysis.is_complete());
        assert!(analysis.point_set.is_empty());
        assert!(analysis.regions.is_empty());
    }

    #[test]
    fn test_debug_omits_oracle() {
        let text = format!("{:?}", JndAnalyzer::new(1.0).unwrap());
        assert!(text.starts_with("JndAnalyzer { threshold: 1.0"));
    }
}
