use super::stats::Spread;
use super::QualityMetric;
use crate::api::EngineError;
use crate::color::{Lab, Lch};
use crate::colormap::{color_at, Colormap};
use crate::jnd::ProgressMonitor;
use crate::sampling::SamplingStrategy;

/// Spread of per-sample attention `sqrt(L² + C²)`.
///
/// A map whose colors vary strongly in attention pulls the eye toward some
/// regions regardless of the data. Lower is better.
pub struct AttentionVariance {
    sampling: Box<dyn SamplingStrategy>,
    spread: Spread,
}

impl AttentionVariance {
    pub fn new(sampling: impl SamplingStrategy + 'static) -> Self {
        Self {
            sampling: Box::new(sampling),
            spread: Spread::StdDev,
        }
    }

    pub fn spread(mut self, spread: Spread) -> Self {
        self.spread = spread;
        self
    }
}

impl QualityMetric for AttentionVariance {
    fn name(&self) -> &str {
        match self.spread {
            Spread::StdDev => "attention_stddev",
            Spread::Variance => "attention_variance",
        }
    }

    fn quality(
        &self,
        colormap: &dyn Colormap,
        _progress: &dyn ProgressMonitor,
    ) -> Result<f64, EngineError> {
        let attention: Vec<f64> = self
            .sampling
            .points()
            .map(|p| Lch::from(Lab::from(color_at(colormap, p))).attention())
            .collect();
        Ok(self.spread.of(&attention))
    }

    fn more_is_better(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jnd::SilentProgress;
    use crate::color::Srgb;
    use crate::colormap::{ConstantColormap, FnColormap};
    use crate::sampling::GridSampling;

    #[test]
    fn test_constant_has_no_spread() {
        let cmap = ConstantColormap::new("c", Srgb::new(0.8, 0.1, 0.3));
        let metric = AttentionVariance::new(GridSampling::new(9).unwrap());
        assert!(metric.quality(&cmap, &SilentProgress).unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_ramp_spreads_more_than_flat_band() {
        let grid = GridSampling::new(16).unwrap();
        let ramp = FnColormap::new("ramp", |x, _| Srgb::new(x, x, x));
        let band = FnColormap::new("band", |x, _| {
            let v = 0.45 + 0.1 * x;
            Srgb::new(v, v, v)
        });
        let metric = AttentionVariance::new(grid);
        let ramp_spread = metric.quality(&ramp, &SilentProgress).unwrap();
        assert!(ramp_spread > metric.quality(&band, &SilentProgress).unwrap());

        let var = AttentionVariance::new(grid).spread(Spread::Variance);
        let sd = metric.quality(&ramp, &SilentProgress).unwrap();
        assert!((var.quality(&ramp, &SilentProgress).unwrap() - sd * sd).abs() < 1e-6);
        assert_eq!(var.name(), "attention_variance");
    }
}
