//! Radial tracing of the indistinguishability region around JND points.
//!
//! From each accepted point, `K` rays are cast at equal angular steps. Each
//! ray advances by `Δ` while the color stays within half the acceptance
//! threshold of the center color; the last such position becomes that ray's
//! vertex. Half the threshold keeps neighboring regions from overlapping.
//! A ray whose next step would leave the unit square collapses onto the
//! center instead, so every vertex lies in `[0,1]²` and regions touching
//! the border shrink rather than grow.

use std::f64::consts::TAU;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::point_set::{validate_threshold, JndPointSet};
use super::progress::ProgressMonitor;
use crate::api::EngineError;
use crate::color::Lab;
use crate::colormap::{color_at, Colormap};
use crate::distance::PerceptualDistance;
use crate::quality::polygon_area;
use crate::sampling::{in_unit_interval, SamplePoint};

pub const DEFAULT_ANGLES: usize = 96;
pub const DEFAULT_STEP: f64 = 0.0005;

/// Closed polygon approximating where a JND point's color is
/// indistinguishable from itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JndRegion {
    pub center: SamplePoint,
    /// One vertex per ray, in counter-clockwise angular order.
    pub vertices: Vec<SamplePoint>,
}

impl JndRegion {
    /// Shoelace area of the polygon.
    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices)
    }
}

/// A traced region, or `None` when tracing was cancelled before reaching
/// this point. `None` means "unknown", never "empty".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub point: SamplePoint,
    pub region: Option<JndRegion>,
}

/// Regions for every member of a [`JndPointSet`], in member order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionMap {
    entries: Vec<RegionEntry>,
}

impl RegionMap {
    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Region for `point`; the outer `None` means the point is not a member.
    pub fn get(&self, point: SamplePoint) -> Option<Option<&JndRegion>> {
        self.entries
            .iter()
            .find(|e| e.point == point)
            .map(|e| e.region.as_ref())
    }

    /// Number of regions actually traced.
    pub fn completed(&self) -> usize {
        self.entries.iter().filter(|e| e.region.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.completed() == self.entries.len()
    }

    /// Areas of the traced regions; absent regions are skipped.
    pub fn areas(&self) -> Vec<f64> {
        self.entries
            .iter()
            .filter_map(|e| e.region.as_ref().map(JndRegion::area))
            .collect()
    }
}

/// Ray-casting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionTracer {
    angles: usize,
    step: f64,
}

impl Default for RegionTracer {
    fn default() -> Self {
        Self {
            angles: DEFAULT_ANGLES,
            step: DEFAULT_STEP,
        }
    }
}

impl RegionTracer {
    /// # Errors
    ///
    /// Requires at least 3 rays and a step in `(0, 1)`.
    pub fn new(angles: usize, step: f64) -> Result<Self, EngineError> {
        if angles < 3 {
            return Err(EngineError::invalid(
                "angles",
                format!("a polygon needs at least 3 rays, got {angles}"),
            ));
        }
        if !(step > 0.0 && step < 1.0) {
            return Err(EngineError::invalid(
                "step",
                format!("radial step must be in (0, 1), got {step}"),
            ));
        }
        Ok(Self { angles, step })
    }

    pub fn angles(&self) -> usize {
        self.angles
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Trace the region around `center` for a JND `threshold`.
    ///
    /// # Errors
    ///
    /// `threshold` must be finite and positive.
    pub fn trace(
        &self,
        colormap: &dyn Colormap,
        center: SamplePoint,
        threshold: f64,
        distance: &dyn PerceptualDistance,
    ) -> Result<JndRegion, EngineError> {
        validate_threshold(threshold)?;
        Ok(self.trace_unchecked(colormap, center, threshold, distance))
    }

    fn trace_unchecked(
        &self,
        colormap: &dyn Colormap,
        center: SamplePoint,
        threshold: f64,
        distance: &dyn PerceptualDistance,
    ) -> JndRegion {
        let center_lab = Lab::from(color_at(colormap, center));
        let limit = threshold / 2.0;

        let vertices = (0..self.angles)
            .map(|k| {
                let theta = TAU * k as f64 / self.angles as f64;
                let (sin, cos) = theta.sin_cos();
                let mut vertex = center;
                for i in 1u64.. {
                    // i·Δ rather than repeated addition keeps runs bit-identical
                    let t = i as f64 * self.step;
                    let x = center.x + t * cos;
                    let y = center.y + t * sin;
                    if !in_unit_interval(x) || !in_unit_interval(y) {
                        vertex = center;
                        break;
                    }
                    let p = SamplePoint::new_unchecked(x, y);
                    let d = distance.lab_distance(center_lab, Lab::from(color_at(colormap, p)));
                    if d >= limit {
                        break;
                    }
                    vertex = p;
                }
                vertex
            })
            .collect();

        JndRegion { center, vertices }
    }

    /// Trace the region of every member of `set`.
    ///
    /// Regions are independent, so with `parallel` they are traced on the
    /// rayon pool; the map is identical either way. Cancellation is checked
    /// before each region, and untraced regions are left as `None`.
    pub fn trace_all(
        &self,
        colormap: &dyn Colormap,
        set: &JndPointSet,
        distance: &dyn PerceptualDistance,
        progress: &dyn ProgressMonitor,
        parallel: bool,
    ) -> RegionMap {
        let threshold = set.threshold();
        progress.start(set.len());

        let trace_one = |point: SamplePoint| {
            if progress.is_cancelled() {
                return RegionEntry { point, region: None };
            }
            let region = self.trace_unchecked(colormap, point, threshold, distance);
            progress.step();
            RegionEntry {
                point,
                region: Some(region),
            }
        };

        let entries: Vec<RegionEntry> = if parallel {
            set.members().par_iter().map(|m| trace_one(m.point)).collect()
        } else {
            set.members().iter().map(|m| trace_one(m.point)).collect()
        };

        progress.finish();

        let map = RegionMap { entries };
        tracing::debug!(
            colormap = colormap.name(),
            regions = map.len(),
            completed = map.completed(),
            angles = self.angles,
            step = self.step,
            "Traced JND regions"
        );
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;
    use crate::colormap::{ConstantColormap, FnColormap};
    use crate::distance::DistanceMetric;
    use crate::jnd::point_set::build_point_set;
    use crate::jnd::progress::testing::CancelAfter;
    use crate::jnd::progress::SilentProgress;
    use crate::sampling::GridSampling;

    #[test]
    fn test_validation() {
        assert!(RegionTracer::new(2, 0.01).is_err());
        assert!(RegionTracer::new(8, 0.0).is_err());
        assert!(RegionTracer::new(8, 1.0).is_err());
        assert!(RegionTracer::new(8, f64::NAN).is_err());
        let tracer = RegionTracer::new(8, 0.01).unwrap();
        assert_eq!(tracer.angles(), 8);
        assert_eq!(RegionTracer::default().angles(), DEFAULT_ANGLES);
    }

    #[test]
    fn test_constant_colormap_region_collapses_to_center() {
        let cmap = ConstantColormap::new("c", Srgb::new(0.2, 0.4, 0.6));
        let tracer = RegionTracer::new(8, 0.01).unwrap();
        let region = tracer
            .trace(&cmap, SamplePoint::CENTER, 3.0, &DistanceMetric::Ciede2000)
            .unwrap();
        assert_eq!(region.vertices.len(), 8);
        // Every ray reaches the border without a color change
        for v in &region.vertices {
            assert_eq!(*v, SamplePoint::CENTER);
        }
        assert_eq!(region.area(), 0.0);
    }

    #[test]
    fn test_gray_ramp_region_is_a_vertical_band() {
        let cmap = FnColormap::new("gray", |x, _| Srgb::new(x, x, x));
        let tracer = RegionTracer::new(4, 0.001).unwrap();
        let region = tracer
            .trace(&cmap, SamplePoint::CENTER, 3.0, &DistanceMetric::Cie76)
            .unwrap();
        // Rays: +x, +y, -x, -y
        let v = &region.vertices;
        assert!(v[0].x > 0.5 && v[0].x < 0.52, "east vertex {:?}", v[0]);
        assert!(v[2].x < 0.5 && v[2].x > 0.48, "west vertex {:?}", v[2]);
        // No color change along y: rays reach the border and collapse
        assert_eq!(v[1], SamplePoint::CENTER);
        assert_eq!(v[3], SamplePoint::CENTER);
    }

    #[test]
    fn test_corner_center_stays_inside() {
        let cmap = FnColormap::new("rg", |x, y| Srgb::new(x, y, 0.0));
        let tracer = RegionTracer::new(32, 0.002).unwrap();
        let corner = SamplePoint::new(1.0, 1.0).unwrap();
        let region = tracer.trace(&cmap, corner, 3.0, &DistanceMetric::Cie76).unwrap();
        for v in &region.vertices {
            assert!(in_unit_interval(v.x) && in_unit_interval(v.y), "{v:?} outside");
        }
        // Rays pointing out of the square collapse onto the center
        assert_eq!(region.vertices[0], corner);
    }

    #[test]
    fn test_trace_all_parallel_matches_sequential() {
        let cmap = FnColormap::new("rg", |x, y| Srgb::new(x, 0.5 * y, 1.0 - x));
        let grid = GridSampling::new(10).unwrap();
        let metric = DistanceMetric::Ciede2000;
        let set = build_point_set(&cmap, &grid, 10.0, &metric, &SilentProgress, false).unwrap();
        let tracer = RegionTracer::new(24, 0.002).unwrap();

        let seq = tracer.trace_all(&cmap, &set, &metric, &SilentProgress, false);
        let par = tracer.trace_all(&cmap, &set, &metric, &SilentProgress, true);
        assert_eq!(seq, par);
        assert_eq!(seq.len(), set.len());
        assert!(seq.is_complete());
        for (entry, member) in seq.iter().zip(set.members()) {
            assert_eq!(entry.point, member.point);
        }
    }

    #[test]
    fn test_cancelled_regions_are_absent() {
        let cmap = FnColormap::new("rg", |x, y| Srgb::new(x, y, 0.3));
        let grid = GridSampling::new(8).unwrap();
        let metric = DistanceMetric::Cie76;
        let set = build_point_set(&cmap, &grid, 8.0, &metric, &SilentProgress, false).unwrap();
        assert!(set.len() > 3);

        let tracer = RegionTracer::new(16, 0.005).unwrap();
        let progress = CancelAfter::new(2);
        let map = tracer.trace_all(&cmap, &set, &metric, &progress, false);

        assert_eq!(map.len(), set.len());
        assert_eq!(map.completed(), 2);
        assert!(!map.is_complete());
        assert_eq!(map.areas().len(), 2);
        let last = set.members().last().unwrap().point;
        assert_eq!(map.get(last), Some(None));
        let first = set.members()[0].point;
        assert!(matches!(map.get(first), Some(Some(_))));
    }
}
