use std::path::Path;

use jnd_engine::{
    AttentionVariance, CircularSampling, DistanceMetric, DistinguishableColors,
    DivergenceQuantile, DivergenceStatistic, EvenDistancePairs, ExtremalDistance, Extremum,
    GridSampling, QualityMetric, RandomSampling, RegionSizeVariance, RegionTracer,
    SamplingStrategy, Spread,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Application configuration loaded from config.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JND threshold in units of the chosen distance metric
    pub threshold: f64,

    /// Perceptual distance used everywhere
    pub distance: DistanceMetric,

    /// Use the rayon pool for tracing and evaluation
    pub parallel: bool,

    /// Seed for seeded samplers that do not set their own; drawn at random
    /// when absent
    pub seed: Option<u64>,

    /// Sampling used by `cmap2d jnd`
    pub jnd_sampling: SamplingConfig,

    /// Region tracing parameters
    pub region: RegionConfig,

    /// Colormaps evaluated when none are named on the command line
    pub colormaps: Vec<String>,

    /// Color of the `constant` colormap (hex)
    pub constant_color: String,

    /// Corner colors of the `bilinear` colormap
    pub bilinear: BilinearConfig,

    /// Metrics computed by `cmap2d evaluate`, in report order
    pub metrics: Vec<MetricConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            threshold: 3.0,
            distance: DistanceMetric::default(),
            parallel: true,
            seed: None,
            jnd_sampling: SamplingConfig::Grid { resolution: 50 },
            region: RegionConfig::default(),
            colormaps: vec![
                "grayscale".to_string(),
                "bilinear".to_string(),
                "lightness-hue".to_string(),
                "lab-plane".to_string(),
            ],
            constant_color: "#808080".to_string(),
            bilinear: BilinearConfig::default(),
            metrics: MetricConfig::defaults(),
        }
    }
}

/// Sampling strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SamplingConfig {
    Grid {
        resolution: usize,
    },
    Circular {
        rings: usize,
    },
    Random {
        count: usize,
        #[serde(default)]
        seed: Option<u64>,
    },
    Pairs {
        count: usize,
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default)]
        min_dist: f64,
        #[serde(default = "default_max_dist")]
        max_dist: f64,
    },
}

fn default_max_dist() -> f64 {
    1.0
}

fn default_metric_sampling() -> SamplingConfig {
    SamplingConfig::Grid { resolution: 40 }
}

impl SamplingConfig {
    /// Build the strategy; `seed` is used when the entry has none.
    pub fn build(&self, seed: u64) -> Result<Box<dyn SamplingStrategy>, AppError> {
        Ok(match *self {
            SamplingConfig::Grid { resolution } => Box::new(GridSampling::new(resolution)?),
            SamplingConfig::Circular { rings } => Box::new(CircularSampling::new(rings)?),
            SamplingConfig::Random { count, seed: own } => {
                Box::new(RandomSampling::new(count, own.unwrap_or(seed))?)
            }
            SamplingConfig::Pairs {
                count,
                seed: own,
                min_dist,
                max_dist,
            } => Box::new(pairs(count, own.unwrap_or(seed), min_dist, max_dist)?),
        })
    }
}

fn pairs(
    count: usize,
    seed: u64,
    min_dist: f64,
    max_dist: f64,
) -> Result<EvenDistancePairs, AppError> {
    Ok(EvenDistancePairs::new(count, seed)?.range(min_dist, max_dist)?)
}

/// Region tracing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Number of rays per region
    pub angles: usize,

    /// Radial step in map units
    pub step: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            angles: jnd_engine::jnd::DEFAULT_ANGLES,
            step: jnd_engine::jnd::DEFAULT_STEP,
        }
    }
}

impl RegionConfig {
    pub fn tracer(&self) -> Result<RegionTracer, AppError> {
        Ok(RegionTracer::new(self.angles, self.step)?)
    }
}

/// Corner colors of the bilinear colormap, as hex strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilinearConfig {
    /// Color at (0, 0)
    pub bottom_left: String,
    /// Color at (1, 0)
    pub bottom_right: String,
    /// Color at (0, 1)
    pub top_left: String,
    /// Color at (1, 1)
    pub top_right: String,
}

impl Default for BilinearConfig {
    fn default() -> Self {
        Self {
            bottom_left: "#2c7bb6".to_string(),
            bottom_right: "#d7191c".to_string(),
            top_left: "#ffffbf".to_string(),
            top_right: "#1a9641".to_string(),
        }
    }
}

/// One quality metric and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "snake_case")]
pub enum MetricConfig {
    RegionSize {
        #[serde(default = "default_region_sampling")]
        sampling: SamplingConfig,
        #[serde(default)]
        spread: Spread,
    },
    Divergence {
        #[serde(default = "default_pair_count")]
        pairs: usize,
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default)]
        min_dist: f64,
        #[serde(default = "default_max_dist")]
        max_dist: f64,
        #[serde(default = "default_statistic")]
        statistic: DivergenceStatistic,
    },
    Attention {
        #[serde(default = "default_metric_sampling")]
        sampling: SamplingConfig,
        #[serde(default)]
        spread: Spread,
    },
    Extremal {
        #[serde(default = "default_metric_sampling")]
        sampling: SamplingConfig,
        #[serde(default)]
        extremum: Extremum,
    },
    Distinguishable {
        #[serde(default = "default_metric_sampling")]
        sampling: SamplingConfig,
    },
}

fn default_region_sampling() -> SamplingConfig {
    SamplingConfig::Grid { resolution: 20 }
}

fn default_pair_count() -> usize {
    5000
}

fn default_statistic() -> DivergenceStatistic {
    DivergenceStatistic::Ratio {
        upper: 0.95,
        lower: 0.05,
    }
}

impl MetricConfig {
    /// The metric set used when the configuration names none
    pub fn defaults() -> Vec<MetricConfig> {
        vec![
            MetricConfig::RegionSize {
                sampling: default_region_sampling(),
                spread: Spread::StdDev,
            },
            MetricConfig::Divergence {
                pairs: default_pair_count(),
                seed: None,
                min_dist: 0.0,
                max_dist: default_max_dist(),
                statistic: default_statistic(),
            },
            MetricConfig::Attention {
                sampling: default_metric_sampling(),
                spread: Spread::StdDev,
            },
            MetricConfig::Extremal {
                sampling: default_metric_sampling(),
                extremum: Extremum::Both,
            },
            MetricConfig::Distinguishable {
                sampling: default_metric_sampling(),
            },
        ]
    }

    /// Build the metric with the run-wide threshold, distance and seed.
    pub fn build(
        &self,
        config: &AppConfig,
        seed: u64,
    ) -> Result<Box<dyn QualityMetric>, AppError> {
        let distance = config.distance;
        Ok(match self {
            MetricConfig::RegionSize { sampling, spread } => Box::new(
                RegionSizeVariance::new(config.threshold, sampling.build(seed)?)?
                    .distance(distance)
                    .tracer(config.region.tracer()?)
                    .spread(*spread)
                    .parallel(config.parallel),
            ),
            MetricConfig::Divergence {
                pairs: count,
                seed: own,
                min_dist,
                max_dist,
                statistic,
            } => Box::new(
                DivergenceQuantile::new(
                    pairs(*count, own.unwrap_or(seed), *min_dist, *max_dist)?,
                    *statistic,
                )?
                .distance(distance),
            ),
            MetricConfig::Attention { sampling, spread } => {
                Box::new(AttentionVariance::new(sampling.build(seed)?).spread(*spread))
            }
            MetricConfig::Extremal { sampling, extremum } => Box::new(
                ExtremalDistance::new(sampling.build(seed)?, *extremum).distance(distance),
            ),
            MetricConfig::Distinguishable { sampling } => Box::new(
                DistinguishableColors::new(config.threshold, sampling.build(seed)?)?
                    .distance(distance)
                    .parallel(config.parallel),
            ),
        })
    }
}

impl AppConfig {
    /// Parse a YAML document; missing fields take their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, AppError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`; built-in defaults when no path is
    /// given.
    ///
    /// # Errors
    ///
    /// A named file that cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            tracing::debug!("No config file given, using built-in defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            colormaps = config.colormaps.len(),
            metrics = config.metrics.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Check values that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(AppError::Config(format!(
                "threshold must be finite and positive, got {}",
                self.threshold
            )));
        }
        self.region.tracer()?;
        Ok(())
    }

    /// The configured seed, or a fresh random one.
    pub fn resolve_seed(&self) -> u64 {
        match self.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random();
                tracing::info!(seed, "No seed configured, drew one at random");
                seed
            }
        }
    }
}
