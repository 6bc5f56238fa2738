//! Seeded uniform random sampling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::point::SamplePoint;
use super::SamplingStrategy;
use crate::api::EngineError;

/// `count` points drawn uniformly from `[0,1]²`.
///
/// The RNG is re-seeded on every [`points`](SamplingStrategy::points) call,
/// so the sequence is restartable and identical for identical seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSampling {
    count: usize,
    seed: u64,
}

impl RandomSampling {
    /// # Errors
    ///
    /// `count` must be positive.
    pub fn new(count: usize, seed: u64) -> Result<Self, EngineError> {
        if count == 0 {
            return Err(EngineError::invalid("count", "sample count must be positive"));
        }
        Ok(Self { count, seed })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl SamplingStrategy for RandomSampling {
    fn points(&self) -> Box<dyn Iterator<Item = SamplePoint> + '_> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        Box::new((0..self.count).map(move |_| {
            let x = rng.gen_range(0.0..=1.0);
            let y = rng.gen_range(0.0..=1.0);
            SamplePoint::new_unchecked(x, y)
        }))
    }

    fn len(&self) -> usize {
        self.count
    }

    fn label(&self) -> String {
        format!("random {} (seed {})", self.count, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_points() {
        let a = RandomSampling::new(100, 7).unwrap();
        let b = RandomSampling::new(100, 7).unwrap();
        assert_eq!(a.points().collect::<Vec<_>>(), b.points().collect::<Vec<_>>());
        // restartable
        assert_eq!(a.points().collect::<Vec<_>>(), a.points().collect::<Vec<_>>());
    }

    #[test]
    fn test_different_seed_different_points() {
        let a: Vec<_> = RandomSampling::new(10, 1).unwrap().points().collect();
        let b: Vec<_> = RandomSampling::new(10, 2).unwrap().points().collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_points_in_range() {
        let sampling = RandomSampling::new(1000, 99).unwrap();
        assert_eq!(sampling.points().count(), 1000);
        assert!(sampling
            .points()
            .all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)));
    }

    #[test]
    fn test_rejects_zero_count() {
        assert!(RandomSampling::new(0, 1).is_err());
    }
}
