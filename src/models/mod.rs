pub mod config;
pub mod report;

pub use config::{AppConfig, BilinearConfig, MetricConfig, RegionConfig, SamplingConfig};
pub use report::{
    write_json, ColormapEvaluation, ColormapInfo, EvaluationReport, JndReport, MetricScore,
    RunInfo,
};
