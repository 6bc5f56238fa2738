//! Concentric-ring sampling around the center of the unit square.

use std::f64::consts::{FRAC_1_SQRT_2, TAU};

use super::point::{in_unit_interval, SamplePoint};
use super::SamplingStrategy;
use crate::api::EngineError;

/// Rings of increasing radius from `(0.5, 0.5)` out to `√2/2`.
///
/// Ring `k` (1-based) has radius `k · step` with `step = (√2/2) / rings`
/// and carries `max(1, round(2πr / step))` points, starting at angle 0 and
/// proceeding counter-clockwise. Points falling outside the unit square are
/// skipped. The center is always the first point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircularSampling {
    rings: usize,
}

impl CircularSampling {
    /// # Errors
    ///
    /// At least one ring is required.
    pub fn new(rings: usize) -> Result<Self, EngineError> {
        if rings == 0 {
            return Err(EngineError::invalid("rings", "ring count must be positive"));
        }
        Ok(Self { rings })
    }

    pub fn rings(&self) -> usize {
        self.rings
    }

    #[inline]
    fn step(&self) -> f64 {
        FRAC_1_SQRT_2 / self.rings as f64
    }

    /// Number of angular positions on ring `k` (before clipping).
    #[inline]
    fn ring_count(&self, k: usize) -> usize {
        // 2πr/step with r = k·step
        ((TAU * k as f64).round() as usize).max(1)
    }

    fn ring_point(&self, k: usize, i: usize) -> Option<SamplePoint> {
        let r = k as f64 * self.step();
        let theta = TAU * i as f64 / self.ring_count(k) as f64;
        let x = 0.5 + r * theta.cos();
        let y = 0.5 + r * theta.sin();
        (in_unit_interval(x) && in_unit_interval(y)).then(|| SamplePoint::new_unchecked(x, y))
    }
}

impl SamplingStrategy for CircularSampling {
    fn points(&self) -> Box<dyn Iterator<Item = SamplePoint> + '_> {
        let rings = (1..=self.rings)
            .flat_map(move |k| (0..self.ring_count(k)).filter_map(move |i| self.ring_point(k, i)));
        Box::new(std::iter::once(SamplePoint::CENTER).chain(rings))
    }

    fn len(&self) -> usize {
        // Clipping depends on the exact angles, so count rather than estimate
        self.points().count()
    }

    fn label(&self) -> String {
        format!("circular {} rings", self.rings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_rings() {
        assert!(CircularSampling::new(0).is_err());
    }

    #[test]
    fn test_center_first() {
        let sampling = CircularSampling::new(5).unwrap();
        assert_eq!(sampling.points().next(), Some(SamplePoint::CENTER));
    }

    #[test]
    fn test_radius_increases_and_points_stay_inside() {
        let sampling = CircularSampling::new(20).unwrap();
        let mut last_radius = 0.0;
        for p in sampling.points() {
            assert!(in_unit_interval(p.x) && in_unit_interval(p.y), "{p:?} outside");
            let r = p.distance(SamplePoint::CENTER);
            assert!(r + 1e-12 >= last_radius, "radius decreased: {r} < {last_radius}");
            last_radius = r;
        }
        assert!(last_radius <= FRAC_1_SQRT_2 + 1e-12);
    }

    #[test]
    fn test_ring_counts_follow_circumference() {
        let sampling = CircularSampling::new(10).unwrap();
        // ring 1 fully inside: round(2π) = 6 points
        let ring1: Vec<_> = (0..sampling.ring_count(1))
            .filter_map(|i| sampling.ring_point(1, i))
            .collect();
        assert_eq!(ring1.len(), 6);
        assert_eq!(sampling.ring_count(3), 19);
    }

    #[test]
    fn test_outer_ring_is_clipped() {
        // The outermost ring touches only the four corners region
        let sampling = CircularSampling::new(4).unwrap();
        let outer = (0..sampling.ring_count(4))
            .filter_map(|i| sampling.ring_point(4, i))
            .count();
        assert!(outer < sampling.ring_count(4));
    }

    #[test]
    fn test_len_matches_iteration() {
        let sampling = CircularSampling::new(12).unwrap();
        assert_eq!(sampling.len(), sampling.points().count());
        assert!(sampling.len() > 1);
    }
}
