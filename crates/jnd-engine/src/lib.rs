//! jnd-engine: perceptual quality analysis for 2D colormaps
//!
//! A 2D colormap assigns a color to every point of the unit square so that
//! two variables can be read from one color. This crate measures how well a
//! colormap serves human perception: how many colors it offers that an
//! observer can tell apart, how uniformly those colors are spread over the
//! square, and how the map distorts distances.
//!
//! # Quick Start
//!
//! The [`JndAnalyzer`] builder is the primary entry point:
//!
//! ```
//! use jnd_engine::{FnColormap, GridSampling, JndAnalyzer, SilentProgress, Srgb};
//!
//! let cmap = FnColormap::new("red-green", |x, y| Srgb::new(x, y, 0.5));
//! let grid = GridSampling::new(20).unwrap();
//!
//! let analyzer = JndAnalyzer::new(5.0).unwrap();
//! let analysis = analyzer.analyze(&cmap, &grid, &SilentProgress).unwrap();
//!
//! assert!(analysis.point_set.len() > 1);
//! assert_eq!(analysis.regions.len(), analysis.point_set.len());
//! ```
//!
//! # Pipeline
//!
//! ```text
//! SamplingStrategy ──> (x, y) ──> Colormap ──> Srgb ──> Xyz ──> Lab
//!                                                               |
//!                                          PerceptualDistance <─┘
//!                                                 |
//!                     +---------------------------+-------------------+
//!                     v                           v                   v
//!             build_point_set ──> RegionTracer    QualityMetric ──> rank
//! ```
//!
//! # Color Science
//!
//! Colormaps hand out gamma-encoded sRGB. Perceptual work happens in
//! CIELAB under the D65 white point, reached through CIE XYZ with the
//! IEC 61966-2-1 transfer function. Distances are CIE color differences:
//!
//! | Metric | Typical JND | Notes |
//! |--------|-------------|-------|
//! | ΔE*ab (CIE76) | 2.3 | Euclidean in Lab |
//! | ΔE*94 | ~1 to 2 | weights chroma and hue by chroma |
//! | ΔE00 (CIEDE2000) | ~1 to 2 | default; corrects the blue region |
//!
//! Thresholds between 1 and 5 are common. The engine does not assume a
//! particular metric; any [`PerceptualDistance`] can be supplied.
//!
//! # Cancellation
//!
//! Long operations take a [`ProgressMonitor`]. A [`CancellationToken`]
//! stops them cooperatively between units of work and the partial result
//! is returned: a point set flagged incomplete and regions left absent.
//!
//! # Parallelism
//!
//! With `parallel(true)` region tracing fans out over the rayon pool and
//! the point-set builder parallelises its "any accepted color too close?"
//! test. Results are bit-identical to the sequential run.

pub mod api;
pub mod color;
pub mod colormap;
pub mod distance;
pub mod jnd;
pub mod quality;
pub mod sampling;


pub use api::{EngineError, JndAnalysis, JndAnalyzer, ParseColorError};
pub use color::{GamutPolicy, Lab, Lch, Srgb, Xyz};
pub use colormap::{
    checked_color, gamut_violations, Colormap, ConstantColormap, DesignSpace, FnColormap,
};
pub use distance::{DistanceMetric, PerceptualDistance};
pub use jnd::{
    build_point_set, CancellationToken, JndPoint, JndPointSet, JndRegion, ProgressMonitor,
    RegionEntry, RegionMap, RegionTracer, SilentProgress,
};
pub use quality::{
    normalize, rank, AttentionVariance, ColormapScores, DistinguishableColors,
    DivergenceQuantile, DivergenceStatistic, ExtremalDistance, Extremum, QualityMetric,
    QualityScore, RankEntry, RegionSizeVariance, Spread,
};
pub use sampling::{
    CircularSampling, EvenDistancePairs, GridSampling, PointPair, RandomSampling, SamplePoint,
    SamplingStrategy,
};
