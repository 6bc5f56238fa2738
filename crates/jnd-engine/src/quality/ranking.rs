//! Cross-colormap normalization and ranking.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::stats::mean;
use super::QualityScore;

/// One colormap's raw scores, one per metric, in a shared metric order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColormapScores {
    pub colormap: String,
    pub scores: Vec<QualityScore>,
}

/// A colormap's place in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    /// 1-based position.
    pub rank: usize,
    pub colormap: String,
    /// Normalized score per metric; `None` for non-finite raw values.
    pub normalized: Vec<Option<f64>>,
    /// Mean of the available normalized scores.
    pub overall: Option<f64>,
}

/// Min–max normalize one metric's scores across colormaps into `[0,1]`,
/// 1 being best.
///
/// Non-finite values map to `None` and do not influence the range. When
/// all finite values are equal, each of them normalizes to 1.0.
pub fn normalize(scores: &[QualityScore]) -> Vec<Option<f64>> {
    let (min, max) = scores
        .iter()
        .filter(|s| s.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.value), hi.max(s.value))
        });
    let span = max - min;

    scores
        .iter()
        .map(|s| {
            if !s.is_finite() {
                return None;
            }
            if span <= 0.0 {
                return Some(1.0);
            }
            let up = (s.value - min) / span;
            Some(if s.more_is_better { up } else { 1.0 - up })
        })
        .collect()
}

/// Rank colormaps by the mean of their normalized metric scores.
///
/// Each metric column is normalized independently. Colormaps without any
/// finite score get `overall = None` and are placed last; ties keep input
/// order.
pub fn rank(table: &[ColormapScores]) -> Vec<RankEntry> {
    let columns = table.iter().map(|row| row.scores.len()).max().unwrap_or(0);

    let mut normalized: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(columns); table.len()];
    for col in 0..columns {
        let column: Vec<QualityScore> = table
            .iter()
            .map(|row| {
                row.scores
                    .get(col)
                    .copied()
                    .unwrap_or(QualityScore::new(f64::NAN, true))
            })
            .collect();
        for (row, value) in normalized.iter_mut().zip(normalize(&column)) {
            row.push(value);
        }
    }

    let mut entries: Vec<RankEntry> = table
        .iter()
        .zip(normalized)
        .map(|(row, normalized)| {
            let available: Vec<f64> = normalized.iter().flatten().copied().collect();
            let overall = (!available.is_empty()).then(|| mean(&available));
            RankEntry {
                rank: 0,
                colormap: row.colormap.clone(),
                normalized,
                overall,
            }
        })
        .collect();

    entries.sort_by(|a, b| match (a.overall, b.overall) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    entries
}
