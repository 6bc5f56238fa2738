//! Runs JND analyses and metric evaluations for the CLI.

use chrono::Utc;
use jnd_engine::quality::score_all;
use jnd_engine::{
    gamut_violations, rank, CancellationToken, ColormapScores, Colormap, GridSampling,
    JndAnalyzer, ProgressMonitor, QualityMetric, QualityScore,
};
use rayon::prelude::*;

use crate::error::AppError;
use crate::models::{
    AppConfig, ColormapEvaluation, ColormapInfo, EvaluationReport, JndReport, MetricScore,
    RunInfo,
};
use crate::services::LogProgress;

/// Grid used to count gamut violations in evaluation reports
const GAMUT_CHECK_RESOLUTION: usize = 33;

/// Evaluates colormaps under one configuration.
///
/// The seed is fixed at construction so every sampler in a run shares it.
pub struct Evaluator {
    config: AppConfig,
    seed: u64,
}

impl Evaluator {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        config.validate()?;
        let seed = config.resolve_seed();
        Ok(Self { config, seed })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn analyzer(&self) -> Result<JndAnalyzer, AppError> {
        Ok(JndAnalyzer::new(self.config.threshold)?
            .distance(self.config.distance)
            .tracer(self.config.region.tracer()?)
            .parallel(self.config.parallel))
    }

    fn run_info(&self, complete: bool) -> RunInfo {
        RunInfo {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
            threshold: self.config.threshold,
            distance: self.config.distance,
            parallel: self.config.parallel,
            seed: self.seed,
            complete,
        }
    }

    /// JND point set and regions of one colormap.
    pub fn jnd(
        &self,
        colormap: &dyn Colormap,
        token: &CancellationToken,
    ) -> Result<JndReport, AppError> {
        let sampling = self.config.jnd_sampling.build(self.seed)?;
        let progress = LogProgress::new(format!("jnd {}", colormap.name()), token.clone());

        tracing::info!(
            colormap = colormap.name(),
            sampling = %sampling.label(),
            threshold = self.config.threshold,
            distance = %self.config.distance,
            "Running JND analysis"
        );
        let analysis = self.analyzer()?.analyze(colormap, &*sampling, &progress)?;
        tracing::info!(
            colormap = colormap.name(),
            points = analysis.point_set.len(),
            regions = analysis.regions.completed(),
            complete = analysis.is_complete(),
            "JND analysis done"
        );

        let region_areas = analysis
            .regions
            .iter()
            .map(|entry| entry.region.as_ref().map(|r| r.area()))
            .collect();

        Ok(JndReport {
            run: self.run_info(analysis.is_complete()),
            colormap: ColormapInfo::of(colormap),
            sampling: sampling.label(),
            region_areas,
            analysis,
        })
    }

    /// Score every colormap under the configured metrics and rank them.
    ///
    /// Metrics poll the token while they run. Skipped or interrupted
    /// metrics get NaN scores and mark their colormap as not evaluated; a
    /// colormap with no finite score ranks last.
    pub fn evaluate(
        &self,
        colormaps: &[Box<dyn Colormap>],
        token: &CancellationToken,
    ) -> Result<EvaluationReport, AppError> {
        let metrics = self
            .config
            .metrics
            .iter()
            .map(|m| m.build(&self.config, self.seed))
            .collect::<Result<Vec<_>, _>>()?;
        let names: Vec<String> = metrics.iter().map(|m| m.name().to_string()).collect();
        let gamut_grid = GridSampling::new(GAMUT_CHECK_RESOLUTION)?;

        let progress = LogProgress::new("evaluate", token.clone());
        progress.start(colormaps.len());

        let evaluate_one = |colormap: &Box<dyn Colormap>| {
            let result = self.evaluate_one(colormap.as_ref(), &metrics, &gamut_grid, token);
            progress.step();
            result
        };
        let evaluations: Vec<ColormapEvaluation> = if self.config.parallel {
            colormaps.par_iter().map(evaluate_one).collect::<Result<_, _>>()?
        } else {
            colormaps.iter().map(evaluate_one).collect::<Result<_, _>>()?
        };

        progress.finish();

        let table: Vec<ColormapScores> = evaluations
            .iter()
            .map(|e| ColormapScores {
                colormap: e.colormap.name.clone(),
                scores: e
                    .scores
                    .iter()
                    .map(|s| QualityScore::new(s.value, s.more_is_better))
                    .collect(),
            })
            .collect();
        let ranking = rank(&table);
        let complete = evaluations.iter().all(|e| e.evaluated);

        if let Some(best) = ranking.first() {
            tracing::info!(
                colormap = %best.colormap,
                overall = ?best.overall,
                ranked = ranking.len(),
                "Evaluation done"
            );
        }

        Ok(EvaluationReport {
            run: self.run_info(complete),
            metrics: names,
            colormaps: evaluations,
            ranking,
        })
    }

    fn evaluate_one(
        &self,
        colormap: &dyn Colormap,
        metrics: &[Box<dyn QualityMetric>],
        gamut_grid: &GridSampling,
        token: &CancellationToken,
    ) -> Result<ColormapEvaluation, AppError> {
        let info = ColormapInfo::of(colormap);

        if token.is_cancelled() {
            tracing::warn!(colormap = %info.name, "Skipped after cancellation");
            return Ok(ColormapEvaluation {
                colormap: info,
                gamut_violations: 0,
                evaluated: false,
                scores: metrics
                    .iter()
                    .map(|m| MetricScore {
                        metric: m.name().to_string(),
                        value: f64::NAN,
                        more_is_better: m.more_is_better(),
                    })
                    .collect(),
            });
        }

        let violations = gamut_violations(colormap, gamut_grid).len();
        if violations > 0 {
            tracing::warn!(colormap = %info.name, violations, "Colormap leaves the sRGB gamut");
        }

        let results = score_all(colormap, metrics, token)?;
        let evaluated = results.iter().all(Option::is_some);
        if !evaluated {
            tracing::warn!(colormap = %info.name, "Evaluation interrupted by cancellation");
        }

        let scores = results
            .into_iter()
            .zip(metrics)
            .map(|(score, metric)| {
                let score = score.unwrap_or(QualityScore::new(f64::NAN, metric.more_is_better()));
                if evaluated && !score.is_finite() {
                    tracing::warn!(
                        colormap = %info.name,
                        metric = metric.name(),
                        "Non-finite score, excluded from ranking"
                    );
                }
                MetricScore {
                    metric: metric.name().to_string(),
                    value: score.value,
                    more_is_better: score.more_is_better,
                }
            })
            .collect();

        Ok(ColormapEvaluation {
            colormap: info,
            gamut_violations: violations,
            evaluated,
            scores,
        })
    }
}
