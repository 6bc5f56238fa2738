//! Test fixtures and constants.

use std::path::PathBuf;

use cmap2d::models::{AppConfig, MetricConfig, RegionConfig, SamplingConfig};
use jnd_engine::{DivergenceStatistic, Extremum, Spread};

/// Path of the sample configuration shipped with the repository
pub fn sample_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.yaml")
}

/// Small, seeded configuration that runs in well under a second
pub fn quick_config() -> AppConfig {
    AppConfig {
        seed: Some(7),
        jnd_sampling: SamplingConfig::Grid { resolution: 15 },
        region: RegionConfig {
            angles: 24,
            step: 0.004,
        },
        metrics: vec![
            MetricConfig::RegionSize {
                sampling: SamplingConfig::Grid { resolution: 6 },
                spread: Spread::StdDev,
            },
            MetricConfig::Divergence {
                pairs: 500,
                seed: None,
                min_dist: 0.05,
                max_dist: 1.0,
                statistic: DivergenceStatistic::Quantile { q: 0.5 },
            },
            MetricConfig::Attention {
                sampling: SamplingConfig::Grid { resolution: 10 },
                spread: Spread::StdDev,
            },
            MetricConfig::Extremal {
                sampling: SamplingConfig::Grid { resolution: 10 },
                extremum: Extremum::Both,
            },
            MetricConfig::Distinguishable {
                sampling: SamplingConfig::Circular { rings: 6 },
            },
        ],
        ..AppConfig::default()
    }
}

/// YAML equivalent of a minimal user configuration
pub const MINIMAL_YAML: &str = r#"
threshold: 4.0
distance: cie94
seed: 3
jnd_sampling:
  type: circular
  rings: 5
region:
  angles: 12
  step: 0.01
colormaps: [grayscale, lab-plane]
metrics:
  - metric: extremal
    extremum: black
    sampling:
      type: grid
      resolution: 5
"#;
