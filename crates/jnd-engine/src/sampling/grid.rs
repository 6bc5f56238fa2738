//! Regular grid sampling.

use super::point::SamplePoint;
use super::SamplingStrategy;
use crate::api::EngineError;

/// `n × n` evenly spaced points covering `[0,1]²`, corners included.
///
/// Iteration is row-major: `y` is the outer loop, `x` the inner one.
///
/// ```
/// use jnd_engine::{GridSampling, SamplingStrategy};
///
/// let grid = GridSampling::new(3).unwrap();
/// let xs: Vec<f64> = grid.points().take(3).map(|p| p.x).collect();
/// assert_eq!(xs, vec![0.0, 0.5, 1.0]);
/// assert_eq!(grid.len(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSampling {
    resolution: usize,
}

impl GridSampling {
    /// # Errors
    ///
    /// `resolution` below 2 cannot include both corners of an axis.
    pub fn new(resolution: usize) -> Result<Self, EngineError> {
        if resolution < 2 {
            return Err(EngineError::invalid(
                "resolution",
                format!("grid resolution must be at least 2, got {resolution}"),
            ));
        }
        Ok(Self { resolution })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    fn coordinate(&self, i: usize) -> f64 {
        // Exact endpoints rather than i * step, which can land at 1 - ε
        if i + 1 == self.resolution {
            1.0
        } else {
            i as f64 / (self.resolution - 1) as f64
        }
    }
}

impl SamplingStrategy for GridSampling {
    fn points(&self) -> Box<dyn Iterator<Item = SamplePoint> + '_> {
        let n = self.resolution;
        Box::new((0..n).flat_map(move |j| {
            (0..n).map(move |i| SamplePoint::new_unchecked(self.coordinate(i), self.coordinate(j)))
        }))
    }

    fn len(&self) -> usize {
        self.resolution * self.resolution
    }

    fn label(&self) -> String {
        format!("grid {0}x{0}", self.resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_small_resolution() {
        assert!(GridSampling::new(0).is_err());
        assert!(GridSampling::new(1).is_err());
        assert!(GridSampling::new(2).is_ok());
    }

    #[test]
    fn test_covers_corners_in_row_major_order() {
        let grid = GridSampling::new(4).unwrap();
        let points: Vec<SamplePoint> = grid.points().collect();
        assert_eq!(points.len(), 16);
        assert_eq!(points[0], SamplePoint::new(0.0, 0.0).unwrap());
        assert_eq!(points[3], SamplePoint::new(1.0, 0.0).unwrap());
        assert_eq!(points[12], SamplePoint::new(0.0, 1.0).unwrap());
        assert_eq!(points[15], SamplePoint::new(1.0, 1.0).unwrap());
        // second row starts after the first is exhausted
        assert_eq!(points[4].y, points[5].y);
        assert!(points[4].y > 0.0);
    }

    #[test]
    fn test_restartable() {
        let grid = GridSampling::new(5).unwrap();
        let first: Vec<SamplePoint> = grid.points().collect();
        let second: Vec<SamplePoint> = grid.points().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_label() {
        assert_eq!(GridSampling::new(50).unwrap().label(), "grid 50x50");
    }
}
