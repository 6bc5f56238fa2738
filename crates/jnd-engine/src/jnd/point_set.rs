//! Greedy construction of a maximal set of mutually distinguishable colors.
//!
//! Candidates are visited in sampling order; a candidate is accepted when
//! its color is at least `threshold` away from every color accepted so far.
//! This is a deterministic greedy approximation of a maximum independent
//! set, not an optimum.
//!
//! The acceptance test for one candidate depends on every earlier
//! acceptance, so candidates are processed strictly in order. Only the
//! "is any accepted color too close?" test is parallelised, which leaves the
//! result unchanged.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::progress::ProgressMonitor;
use crate::api::EngineError;
use crate::color::{Lab, Srgb};
use crate::colormap::{color_at, Colormap};
use crate::distance::PerceptualDistance;
use crate::sampling::{SamplePoint, SamplingStrategy};

/// Below this many accepted colors the any-match test stays sequential;
/// rayon's fork/join costs more than the scan.
const PARALLEL_MIN_ACCEPTED: usize = 256;

/// An accepted sample and the color the colormap produced there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JndPoint {
    pub point: SamplePoint,
    pub color: Srgb,
}

/// Ordered set of mutually distinguishable samples.
///
/// For any two members `p`, `q`:
/// `distance(color(p), color(q)) >= threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JndPointSet {
    threshold: f64,
    members: Vec<JndPoint>,
    examined: usize,
    complete: bool,
}

impl JndPointSet {
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Members in acceptance order.
    pub fn members(&self) -> &[JndPoint] {
        &self.members
    }

    pub fn points(&self) -> impl Iterator<Item = SamplePoint> + '_ {
        self.members.iter().map(|m| m.point)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of candidates tested before the run ended.
    pub fn examined(&self) -> usize {
        self.examined
    }

    /// `false` when the run was cancelled before every candidate was seen.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn contains(&self, point: SamplePoint) -> bool {
        self.members.iter().any(|m| m.point == point)
    }
}

/// Greedily select mutually distinguishable samples.
///
/// Progress is reported once per candidate; cancellation is checked before
/// each candidate and yields a partial, still valid set with
/// [`JndPointSet::is_complete`] returning `false`.
///
/// # Errors
///
/// `threshold` must be finite and positive.
pub fn build_point_set(
    colormap: &dyn Colormap,
    sampling: &dyn SamplingStrategy,
    threshold: f64,
    distance: &dyn PerceptualDistance,
    progress: &dyn ProgressMonitor,
    parallel: bool,
) -> Result<JndPointSet, EngineError> {
    validate_threshold(threshold)?;

    progress.start(sampling.len());

    let mut members = Vec::new();
    let mut accepted: Vec<Lab> = Vec::new();
    let mut examined = 0;
    let mut complete = true;

    for point in sampling.points() {
        if progress.is_cancelled() {
            complete = false;
            break;
        }

        let color = color_at(colormap, point);
        let lab = Lab::from(color);
        let too_close = |q: &Lab| distance.lab_distance(lab, *q) < threshold;

        let clash = if parallel && accepted.len() >= PARALLEL_MIN_ACCEPTED {
            accepted.par_iter().any(too_close)
        } else {
            accepted.iter().any(too_close)
        };

        if !clash {
            tracing::trace!(
                x = point.x,
                y = point.y,
                accepted = members.len() + 1,
                "Accepted JND point"
            );
            members.push(JndPoint { point, color });
            accepted.push(lab);
        }

        examined += 1;
        progress.step();
    }

    progress.finish();

    tracing::debug!(
        colormap = colormap.name(),
        sampling = %sampling.label(),
        threshold,
        examined,
        accepted = members.len(),
        complete,
        "Built JND point set"
    );

    Ok(JndPointSet {
        threshold,
        members,
        examined,
        complete,
    })
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<(), EngineError> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid(
            "threshold",
            format!("JND threshold must be finite and positive, got {threshold}"),
        ))
    }
}
