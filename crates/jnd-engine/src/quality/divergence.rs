use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::stats::quantile;
use super::QualityMetric;
use crate::api::EngineError;
use crate::color::Lab;
use crate::colormap::{color_at, Colormap};
use crate::distance::{DistanceMetric, PerceptualDistance};
use crate::jnd::ProgressMonitor;
use crate::sampling::EvenDistancePairs;

/// Which order statistic of the distance ratios to report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DivergenceStatistic {
    /// A single quantile `q` of the ratios.
    Quantile { q: f64 },
    /// `quantile(upper) / quantile(lower)`, e.g. 95th over 5th percentile.
    Ratio { upper: f64, lower: f64 },
}

impl DivergenceStatistic {
    fn validate(self) -> Result<Self, EngineError> {
        let unit = |q: f64| (0.0..=1.0).contains(&q);
        match self {
            DivergenceStatistic::Quantile { q } if !unit(q) => Err(EngineError::invalid(
                "quantile",
                format!("quantile must be in [0, 1], got {q}"),
            )),
            DivergenceStatistic::Ratio { upper, lower }
                if !(unit(upper) && unit(lower) && lower < upper) =>
            {
                Err(EngineError::invalid(
                    "quantile",
                    format!("need 0 <= lower < upper <= 1, got lower {lower}, upper {upper}"),
                ))
            }
            ok => Ok(ok),
        }
    }
}

/// Distortion between map space and perceptual space.
///
/// For each sampled pair the ratio `perceptual distance / map distance` is
/// computed; the metric reports a quantile of the ratios, or the ratio of
/// two quantiles. Pairs with zero map distance are skipped. Lower is
/// better.
pub struct DivergenceQuantile {
    pairs: EvenDistancePairs,
    distance: Arc<dyn PerceptualDistance>,
    statistic: DivergenceStatistic,
}

impl DivergenceQuantile {
    /// # Errors
    ///
    /// Quantiles must lie in `[0,1]`, and for a ratio `lower < upper`.
    pub fn new(
        pairs: EvenDistancePairs,
        statistic: DivergenceStatistic,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            pairs,
            distance: Arc::new(DistanceMetric::default()),
            statistic: statistic.validate()?,
        })
    }

    pub fn distance(mut self, distance: impl PerceptualDistance + 'static) -> Self {
        self.distance = Arc::new(distance);
        self
    }

    /// Sorted ratios of perceptual to map distance.
    pub fn ratios(&self, colormap: &dyn Colormap) -> Vec<f64> {
        let mut ratios: Vec<f64> = self
            .pairs
            .pairs()
            .iter()
            .filter_map(|pair| {
                let spatial = pair.distance();
                if spatial <= 0.0 {
                    return None;
                }
                let a = Lab::from(color_at(colormap, pair.a));
                let b = Lab::from(color_at(colormap, pair.b));
                Some(self.distance.lab_distance(a, b) / spatial)
            })
            .collect();
        ratios.sort_by(f64::total_cmp);
        ratios
    }
}

impl QualityMetric for DivergenceQuantile {
    fn name(&self) -> &str {
        match self.statistic {
            DivergenceStatistic::Quantile { .. } => "divergence_quantile",
            DivergenceStatistic::Ratio { .. } => "divergence_ratio",
        }
    }

    fn quality(
        &self,
        colormap: &dyn Colormap,
        _progress: &dyn ProgressMonitor,
    ) -> Result<f64, EngineError> {
        let ratios = self.ratios(colormap);
        Ok(match self.statistic {
            DivergenceStatistic::Quantile { q } => quantile(&ratios, q),
            DivergenceStatistic::Ratio { upper, lower } => {
                quantile(&ratios, upper) / quantile(&ratios, lower)
            }
        })
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

    fn pairs(seed: u64) -> EvenDistancePairs {
        EvenDistancePairs::new(2000, seed)
            .unwrap()
            .range(0.01, 0.5)
            .unwrap()
    }

    #[test]
    fn test_statistic_validation() {
        let p = pairs(1);
        let q = |q| DivergenceStatistic::Quantile { q };
        assert!(DivergenceQuantile::new(p.clone(), q(1.5)).is_err());
        assert!(DivergenceQuantile::new(
            p.clone(),
            DivergenceStatistic::Ratio {
                upper: 0.05,
                lower: 0.95
            }
        )
        .is_err());
        assert!(DivergenceQuantile::new(p, q(0.5)).is_ok());
    }

    #[test]
    fn test_constant_map_has_zero_divergence() {
        let cmap = ConstantColormap::new("c", Srgb::new(0.3, 0.3, 0.9));
        let metric =
            DivergenceQuantile::new(pairs(3), DivergenceStatistic::Quantile { q: 0.9 }).unwrap();
        assert_eq!(metric.quality(&cmap, &SilentProgress).unwrap(), 0.0);

        // 0 / 0: kept as NaN for the ranking to exclude
        let ratio = DivergenceQuantile::new(
            pairs(3),
            DivergenceStatistic::Ratio {
                upper: 0.95,
                lower: 0.05,
            },
        )
        .unwrap();
        assert!(ratio.quality(&cmap, &SilentProgress).unwrap().is_nan());
    }

    #[test]
    fn test_ratios_sorted_and_positive() {
        let cmap = FnColormap::new("rg", |x, y| Srgb::new(x, y, 0.5));
        let metric =
            DivergenceQuantile::new(pairs(9), DivergenceStatistic::Quantile { q: 0.5 }).unwrap();
        let ratios = metric.ratios(&cmap);
        assert!(!ratios.is_empty());
        assert!(ratios.windows(2).all(|w| w[0] <= w[1]));
        assert!(ratios[0] >= 0.0);
    }
}
