//! Just-noticeable-difference analysis: greedy point sets and the regions
//! around them.

mod point_set;
mod progress;
mod region;

pub use point_set::{build_point_set, JndPoint, JndPointSet};
pub(crate) use point_set::validate_threshold;
pub use progress::{CancellationToken, ProgressMonitor, SilentProgress};
#[cfg(test)]
pub(crate) use progress::testing;
pub use region::{JndRegion, RegionEntry, RegionMap, RegionTracer, DEFAULT_ANGLES, DEFAULT_STEP};
