//! Colormap quality metrics and cross-colormap ranking.
//!
//! Every metric reduces a colormap to one scalar and says whether larger is
//! better. Non-finite results are kept in the raw scores so callers can
//! report them, and [`normalize`] leaves them out of the ranking.
//!
//! | Metric | Measures | Better |
//! |--------|----------|--------|
//! | [`RegionSizeVariance`] | spread of JND region areas | lower |
//! | [`DivergenceQuantile`] | perceptual / spatial distance ratio | lower |
//! | [`AttentionVariance`] | spread of `sqrt(L² + C²)` | lower |
//! | [`ExtremalDistance`] | closest approach to black / white | higher |
//! | [`DistinguishableColors`] | size of the JND point set | higher |

mod attention;
mod distinguishable;
mod divergence;
mod extremal;
mod geometry;
mod ranking;
mod region_size;
mod stats;

use serde::{Deserialize, Serialize};

use crate::api::EngineError;
use crate::colormap::Colormap;
use crate::jnd::ProgressMonitor;

pub use attention::AttentionVariance;
pub use distinguishable::DistinguishableColors;
pub use divergence::{DivergenceQuantile, DivergenceStatistic};
pub use extremal::{Extremum, ExtremalDistance};
pub use geometry::polygon_area;
pub use ranking::{normalize, rank, ColormapScores, RankEntry};
pub use region_size::RegionSizeVariance;
pub use stats::{mean, quantile, variance, Spread};

/// A raw metric result together with its direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    pub value: f64,
    pub more_is_better: bool,
}

impl QualityScore {
    pub fn new(value: f64, more_is_better: bool) -> Self {
        Self {
            value,
            more_is_better,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

/// A scalar quality score over a colormap.
pub trait QualityMetric: Send + Sync {
    /// Short identifier used in reports.
    fn name(&self) -> &str;

    /// Raw metric value; may be NaN or infinite for pathological colormaps.
    ///
    /// Metrics that build point sets or trace regions poll `progress` after
    /// every unit of work and return NaN when it cancels them.
    fn quality(
        &self,
        colormap: &dyn Colormap,
        progress: &dyn ProgressMonitor,
    ) -> Result<f64, EngineError>;

    fn more_is_better(&self) -> bool;

    fn score(
        &self,
        colormap: &dyn Colormap,
        progress: &dyn ProgressMonitor,
    ) -> Result<QualityScore, EngineError> {
        Ok(QualityScore::new(
            self.quality(colormap, progress)?,
            self.more_is_better(),
        ))
    }
}

/// Score one colormap under every metric, in metric order.
///
/// An entry is `None` when cancellation skipped the metric or interrupted
/// it before it produced a finite value. `None` means "unknown", and a
/// colormap with any `None` entry was not fully evaluated.
///
/// # Errors
///
/// The first metric error.
pub fn score_all(
    colormap: &dyn Colormap,
    metrics: &[Box<dyn QualityMetric>],
    progress: &dyn ProgressMonitor,
) -> Result<Vec<Option<QualityScore>>, EngineError> {
    metrics
        .iter()
        .map(|metric| {
            if progress.is_cancelled() {
                return Ok(None);
            }
            let score = metric.score(colormap, progress)?;
            if !score.is_finite() && progress.is_cancelled() {
                tracing::debug!(
                    colormap = colormap.name(),
                    metric = metric.name(),
                    "Metric interrupted"
                );
                return Ok(None);
            }
            tracing::debug!(
                colormap = colormap.name(),
                metric = metric.name(),
                value = score.value,
                "Scored colormap"
            );
            Ok(Some(score))
        })
        .collect()
}
