use std::sync::Arc;

use super::stats::Spread;
use super::QualityMetric;
use crate::api::EngineError;
use crate::colormap::Colormap;
use crate::distance::{DistanceMetric, PerceptualDistance};
use crate::jnd::{build_point_set, validate_threshold, ProgressMonitor, RegionTracer};
use crate::sampling::SamplingStrategy;

/// Spread of JND region areas across the map.
///
/// A perceptually uniform map gives every JND point a region of similar
/// size. Lower is better. NaN when cancellation stops the point set or
/// the region tracing early.
pub struct RegionSizeVariance {
    threshold: f64,
    sampling: Box<dyn SamplingStrategy>,
    distance: Arc<dyn PerceptualDistance>,
    tracer: RegionTracer,
    spread: Spread,
    parallel: bool,
}

impl RegionSizeVariance {
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
            tracer: RegionTracer::default(),
            spread: Spread::StdDev,
            parallel: false,
        })
    }

    pub fn distance(mut self, distance: impl PerceptualDistance + 'static) -> Self {
        self.distance = Arc::new(distance);
        self
    }

    pub fn tracer(mut self, tracer: RegionTracer) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn spread(mut self, spread: Spread) -> Self {
        self.spread = spread;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl QualityMetric for RegionSizeVariance {
    fn name(&self) -> &str {
        match self.spread {
            Spread::StdDev => "region_size_stddev",
            Spread::Variance => "region_size_variance",
        }
    }

    fn quality(
        &self,
        colormap: &dyn Colormap,
        progress: &dyn ProgressMonitor,
    ) -> Result<f64, EngineError> {
        let distance = &*self.distance;
        let set = build_point_set(
            colormap,
            &*self.sampling,
            self.threshold,
            distance,
            progress,
            self.parallel,
        )?;
        if !set.is_complete() {
            return Ok(f64::NAN);
        }
        let regions = self
            .tracer
            .trace_all(colormap, &set, distance, progress, self.parallel);
        if !regions.is_complete() {
            return Ok(f64::NAN);
        }
        Ok(self.spread.of(&regions.areas()))
    }

    fn more_is_better(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jnd::testing::CancelAfter;
    use crate::jnd::SilentProgress;
    use crate::color::Srgb;
    use crate::colormap::{ConstantColormap, FnColormap};
    use crate::sampling::GridSampling;

    #[test]
    fn test_rejects_bad_threshold() {
        let grid = GridSampling::new(4).unwrap();
        assert!(RegionSizeVariance::new(0.0, grid).is_err());
        assert!(RegionSizeVariance::new(f64::NAN, grid).is_err());
    }

    #[test]
    fn test_constant_map_has_single_region() {
        let cmap = ConstantColormap::new("c", Srgb::new(0.1, 0.5, 0.9));
        let metric = RegionSizeVariance::new(3.0, GridSampling::new(6).unwrap())
            .unwrap()
            .tracer(RegionTracer::new(16, 0.01).unwrap());
        assert_eq!(metric.quality(&cmap, &SilentProgress).unwrap(), 0.0);
    }

    #[test]
    fn test_parallel_and_variance() {
        let cmap = FnColormap::new("rg", |x, y| Srgb::new(x, y * y, 0.4));
        let tracer = RegionTracer::new(24, 0.004).unwrap();
        let grid = GridSampling::new(12).unwrap();
        let seq = RegionSizeVariance::new(10.0, grid)
            .unwrap()
            .tracer(tracer)
            .distance(DistanceMetric::Cie76);
        let par = RegionSizeVariance::new(10.0, grid)
            .unwrap()
            .tracer(tracer)
            .distance(DistanceMetric::Cie76)
            .parallel(true);
        let sd = seq.quality(&cmap, &SilentProgress).unwrap();
        assert!(sd > 0.0);
        assert_eq!(sd, par.quality(&cmap, &SilentProgress).unwrap());

        let var = RegionSizeVariance::new(10.0, grid)
            .unwrap()
            .tracer(tracer)
            .distance(DistanceMetric::Cie76)
            .spread(Spread::Variance);
        assert!((var.quality(&cmap, &SilentProgress).unwrap() - sd * sd).abs() < 1e-12);
    }

    #[test]
    fn test_cancelled_tracing_gives_nan() {
        let cmap = FnColormap::new("rg", |x, y| Srgb::new(x, y, 0.4));
        let metric = RegionSizeVariance::new(10.0, GridSampling::new(6).unwrap())
            .unwrap()
            .tracer(RegionTracer::new(16, 0.01).unwrap())
            .distance(DistanceMetric::Cie76);

        // 36 point-set steps finish, then tracing stops after 4 regions
        let progress = CancelAfter::new(40);
        assert!(metric.quality(&cmap, &progress).unwrap().is_nan());
        assert!(progress.finished.load(std::sync::atomic::Ordering::SeqCst));

        // Stopped while building the point set
        assert!(metric.quality(&cmap, &CancelAfter::new(10)).unwrap().is_nan());
        assert!(metric.quality(&cmap, &SilentProgress).unwrap().is_finite());
    }
}
