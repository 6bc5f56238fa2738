//! Point pairs with uniformly distributed separation.
//!
//! Drawing two independent uniform points gives a separation distribution
//! heavily skewed toward ~0.5. Distance-ratio statistics need every
//! separation equally represented, so the distance is drawn first and the
//! pair is placed around it.

use std::f64::consts::{SQRT_2, TAU};
use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::point::SamplePoint;
use super::SamplingStrategy;
use crate::api::EngineError;

/// Default bound on direction draws per target distance.
pub const DEFAULT_MAX_RETRIES: usize = 1000;

/// Two points of the unit square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointPair {
    pub a: SamplePoint,
    pub b: SamplePoint,
}

impl PointPair {
    #[inline]
    pub fn distance(&self) -> f64 {
        self.a.distance(self.b)
    }
}

/// Pairs whose Euclidean separation is uniform over `[min_dist, max_dist]`.
///
/// For each pair a target distance `d` is drawn uniformly; then a direction
/// is rejection-sampled (at most `max_retries` times) until a segment of
/// length `d` in that direction fits in the unit square, and the first
/// endpoint is placed uniformly in the region where it fits. When no
/// direction is found the distance is redrawn. The whole run is bounded by
/// `count · max_retries` direction draws.
///
/// The pairs are generated on first use and cached, so [`len`] and
/// [`points`] agree without sampling twice.
///
/// [`len`]: SamplingStrategy::len
/// [`points`]: SamplingStrategy::points
///
/// ```
/// use jnd_engine::EvenDistancePairs;
///
/// let pairs = EvenDistancePairs::new(500, 42).unwrap().range(0.1, 0.3).unwrap();
/// for pair in pairs.pairs() {
///     let d = pair.distance();
///     assert!(d >= 0.1 - 1e-9 && d <= 0.3 + 1e-9);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EvenDistancePairs {
    count: usize,
    seed: u64,
    min_dist: f64,
    max_dist: f64,
    max_retries: usize,
    generated: OnceLock<Vec<PointPair>>,
}

impl PartialEq for EvenDistancePairs {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count
            && self.seed == other.seed
            && self.min_dist == other.min_dist
            && self.max_dist == other.max_dist
            && self.max_retries == other.max_retries
    }
}

impl EvenDistancePairs {
    /// Separations uniform over `[0, 1]`.
    ///
    /// # Errors
    ///
    /// `count` must be positive.
    pub fn new(count: usize, seed: u64) -> Result<Self, EngineError> {
        if count == 0 {
            return Err(EngineError::invalid("pairs", "pair count must be positive"));
        }
        Ok(Self {
            count,
            seed,
            min_dist: 0.0,
            max_dist: 1.0,
            max_retries: DEFAULT_MAX_RETRIES,
            generated: OnceLock::new(),
        })
    }

    /// Restrict separations to `[min_dist, max_dist]`.
    ///
    /// # Errors
    ///
    /// Requires `0 ≤ min_dist < max_dist ≤ √2`.
    pub fn range(mut self, min_dist: f64, max_dist: f64) -> Result<Self, EngineError> {
        if !(min_dist >= 0.0 && min_dist < max_dist && max_dist <= SQRT_2) {
            return Err(EngineError::invalid(
                "range",
                format!("expected 0 <= min < max <= sqrt(2), got [{min_dist}, {max_dist}]"),
            ));
        }
        self.min_dist = min_dist;
        self.max_dist = max_dist;
        self.generated = OnceLock::new();
        Ok(self)
    }

    /// Bound on direction draws per target distance.
    ///
    /// # Errors
    ///
    /// Must be positive.
    pub fn max_retries(mut self, retries: usize) -> Result<Self, EngineError> {
        if retries == 0 {
            return Err(EngineError::invalid("max_retries", "retry bound must be positive"));
        }
        self.max_retries = retries;
        self.generated = OnceLock::new();
        Ok(self)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn distance_range(&self) -> (f64, f64) {
        (self.min_dist, self.max_dist)
    }

    /// The pairs. Identical parameters give identical pairs.
    pub fn pairs(&self) -> &[PointPair] {
        self.generated.get_or_init(|| self.generate())
    }

    fn generate(&self) -> Vec<PointPair> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut pairs = Vec::with_capacity(self.count);
        let mut budget = self.count.saturating_mul(self.max_retries);

        'pairs: while pairs.len() < self.count {
            let d = rng.gen_range(self.min_dist..=self.max_dist);
            for _ in 0..self.max_retries {
                if budget == 0 {
                    break 'pairs;
                }
                budget -= 1;

                let theta = rng.gen_range(0.0..TAU);
                let dx = d * theta.cos();
                let dy = d * theta.sin();
                if dx.abs() > 1.0 || dy.abs() > 1.0 {
                    continue;
                }

                // Feasible range for the first endpoint along each axis
                let x = rng.gen_range((-dx).max(0.0)..=(1.0 - dx).min(1.0));
                let y = rng.gen_range((-dy).max(0.0)..=(1.0 - dy).min(1.0));
                // Clamp only absorbs rounding; the endpoint is inside by construction
                let bx = (x + dx).clamp(0.0, 1.0);
                let by = (y + dy).clamp(0.0, 1.0);
                pairs.push(PointPair {
                    a: SamplePoint::new_unchecked(x, y),
                    b: SamplePoint::new_unchecked(bx, by),
                });
                continue 'pairs;
            }
        }

        if pairs.len() < self.count {
            tracing::warn!(
                requested = self.count,
                produced = pairs.len(),
                min_dist = self.min_dist,
                max_dist = self.max_dist,
                "Pair sampling exhausted its retry budget"
            );
        }
        pairs
    }
}

impl SamplingStrategy for EvenDistancePairs {
    /// Both endpoints of every pair, pair by pair.
    fn points(&self) -> Box<dyn Iterator<Item = SamplePoint> + '_> {
        Box::new(self.pairs().iter().flat_map(|p| [p.a, p.b]))
    }

    fn len(&self) -> usize {
        2 * self.pairs().len()
    }

    fn label(&self) -> String {
        format!(
            "{} pairs in [{}, {}] (seed {})",
            self.count, self.min_dist, self.max_dist, self.seed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert!(EvenDistancePairs::new(0, 1).is_err());
        let pairs = EvenDistancePairs::new(10, 1).unwrap();
        assert!(pairs.clone().range(0.5, 0.5).is_err());
        assert!(pairs.clone().range(-0.1, 0.5).is_err());
        assert!(pairs.clone().range(0.2, 1.5).is_err());
        assert!(pairs.clone().range(0.0, SQRT_2).is_ok());
        assert!(pairs.max_retries(0).is_err());
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = EvenDistancePairs::new(200, 5).unwrap();
        let b = EvenDistancePairs::new(200, 5).unwrap();
        assert_eq!(a.pairs(), b.pairs());
        let c = EvenDistancePairs::new(200, 6).unwrap();
        assert_ne!(a.pairs(), c.pairs());
    }

    #[test]
    fn test_endpoints_inside_and_distance_in_range() {
        let sampler = EvenDistancePairs::new(2000, 11).unwrap().range(0.2, 1.2).unwrap();
        let pairs = sampler.pairs();
        assert_eq!(pairs.len(), 2000);
        for pair in pairs {
            for p in [pair.a, pair.b] {
                assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
            }
            let d = pair.distance();
            assert!((0.2 - 1e-9..=1.2 + 1e-9).contains(&d), "distance {d} out of range");
        }
    }

    #[test]
    fn test_distances_are_roughly_uniform() {
        let sampler = EvenDistancePairs::new(10_000, 3).unwrap();
        let mut buckets = [0usize; 4];
        for pair in sampler.pairs() {
            let idx = ((pair.distance() * 4.0) as usize).min(3);
            buckets[idx] += 1;
        }
        // Expected 2500 per bucket; independent uniform points would put
        // far fewer in the top quarter.
        for (i, &n) in buckets.iter().enumerate() {
            assert!((2200..=2800).contains(&n), "bucket {i} has {n} pairs");
        }
    }

    #[test]
    fn test_near_diagonal_distances_respect_budget() {
        // Only directions within a sliver of the diagonals fit; with one
        // retry per distance most draws fail, and the run must still end.
        let sampler = EvenDistancePairs::new(50, 9)
            .unwrap()
            .range(1.40, SQRT_2)
            .unwrap()
            .max_retries(1)
            .unwrap();
        let pairs = sampler.pairs();
        assert!(pairs.len() <= 50);
        for pair in pairs {
            assert!(pair.distance() >= 1.40 - 1e-9);
        }
        // Short runs still report their exact length
        assert_eq!(sampler.len(), 2 * pairs.len());
        assert_eq!(sampler.points().count(), sampler.len());
    }

    #[test]
    fn test_builders_reset_generated_pairs() {
        let sampler = EvenDistancePairs::new(100, 4).unwrap();
        assert!(sampler.pairs().iter().any(|p| p.distance() > 0.5));
        let narrowed = sampler.clone().range(0.0, 0.5).unwrap();
        assert_eq!(narrowed, EvenDistancePairs::new(100, 4).unwrap().range(0.0, 0.5).unwrap());
        assert!(narrowed.pairs().iter().all(|p| p.distance() <= 0.5 + 1e-9));
        assert_eq!(sampler.pairs().len(), 100);
    }

    #[test]
    fn test_points_flatten_pairs() {
        let sampler = EvenDistancePairs::new(3, 1).unwrap();
        let pairs = sampler.pairs();
        let points: Vec<_> = sampler.points().collect();
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], pairs[0].a);
        assert_eq!(points[1], pairs[0].b);
        assert_eq!(sampler.len(), 6);
    }
}
