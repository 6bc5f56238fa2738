//! Sampling strategies over the unit square.
//!
//! Every strategy is a small immutable value implementing
//! [`SamplingStrategy`]. Iteration order matters: the greedy JND builder
//! accepts the first of any two indistinguishable candidates, so different
//! strategies generally yield different point sets for the same colormap.
//!
//! | Strategy | Order | Determinism |
//! |----------|-------|-------------|
//! | [`GridSampling`] | row-major | fixed |
//! | [`CircularSampling`] | center, then rings outward | fixed |
//! | [`RandomSampling`] | draw order | seed |
//! | [`EvenDistancePairs`] | pair by pair | seed |

mod circular;
mod grid;
mod pairs;
mod point;
mod random;

pub use circular::CircularSampling;
pub use grid::GridSampling;
pub use pairs::{EvenDistancePairs, PointPair, DEFAULT_MAX_RETRIES};
pub(crate) use point::in_unit_interval;
pub use point::SamplePoint;
pub use random::RandomSampling;

/// Produces a finite, restartable sequence of points in `[0,1]²`.
pub trait SamplingStrategy: Send + Sync {
    /// A fresh iterator over the points, from the beginning.
    fn points(&self) -> Box<dyn Iterator<Item = SamplePoint> + '_>;

    /// Exact number of points [`points`](Self::points) yields.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable description for logs and reports.
    fn label(&self) -> String;
}

impl<S: SamplingStrategy + ?Sized> SamplingStrategy for Box<S> {
    fn points(&self) -> Box<dyn Iterator<Item = SamplePoint> + '_> {
        (**self).points()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}
