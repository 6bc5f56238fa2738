//! JSON reports written by the CLI.
//!
//! Non-finite metric values serialize as `null`; they are kept in the raw
//! scores and left out of the ranking.

use std::path::Path;

use chrono::{DateTime, Utc};
use jnd_engine::{Colormap, DesignSpace, DistanceMetric, JndAnalysis, RankEntry};
use serde::Serialize;

use crate::error::AppError;

/// Parameters shared by every report
#[derive(Debug, Clone, Serialize)]
pub struct RunInfo {
    pub generated_at: DateTime<Utc>,
    pub version: &'static str,
    pub threshold: f64,
    pub distance: DistanceMetric,
    pub parallel: bool,
    pub seed: u64,
    /// `false` when the run was cancelled
    pub complete: bool,
}

/// Identity of an analyzed colormap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColormapInfo {
    pub name: String,
    pub description: String,
    pub design_space: DesignSpace,
}

impl ColormapInfo {
    pub fn of(colormap: &dyn Colormap) -> Self {
        Self {
            name: colormap.name().to_string(),
            description: colormap.description().to_string(),
            design_space: colormap.color_space(),
        }
    }
}

/// Output of `cmap2d jnd`
#[derive(Debug, Clone, Serialize)]
pub struct JndReport {
    pub run: RunInfo,
    pub colormap: ColormapInfo,
    pub sampling: String,
    /// Area of each member's region, in member order; `null` when the
    /// region was not traced
    pub region_areas: Vec<Option<f64>>,
    pub analysis: JndAnalysis,
}

/// One raw metric value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricScore {
    pub metric: String,
    pub value: f64,
    pub more_is_better: bool,
}

/// Raw scores of one colormap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColormapEvaluation {
    pub colormap: ColormapInfo,
    /// Sampled points whose color fell outside the sRGB cube
    pub gamut_violations: usize,
    /// `false` when cancellation skipped this colormap
    pub evaluated: bool,
    pub scores: Vec<MetricScore>,
}

/// Output of `cmap2d evaluate`
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub run: RunInfo,
    pub metrics: Vec<String>,
    pub colormaps: Vec<ColormapEvaluation>,
    pub ranking: Vec<RankEntry>,
}

/// Write `value` as pretty JSON to `output`, or to stdout.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")?;
            tracing::info!(path = %path.display(), "Wrote report");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jnd_engine::ConstantColormap;
    use jnd_engine::Srgb;

    #[test]
    fn test_non_finite_scores_serialize_as_null() {
        let score = MetricScore {
            metric: "divergence_ratio".to_string(),
            value: f64::NAN,
            more_is_better: false,
        };
        let json = serde_json::to_value(&score).unwrap();
        assert!(json["value"].is_null());
    }

    #[test]
    fn test_colormap_info() {
        let cmap = ConstantColormap::new("flat", Srgb::WHITE);
        let info = ColormapInfo::of(&cmap);
        assert_eq!(info.name, "flat");
        assert_eq!(info.design_space, DesignSpace::Srgb);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["design_space"], "srgb");
    }

    #[test]
    fn test_write_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&vec![1, 2, 3], Some(&path)).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let back: Vec<u32> = serde_json::from_str(&content).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }
}
