#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod assess;
pub mod config;
pub mod diagnostics;
pub mod types;
pub mod volume;

// “Expert” modules – still public, but considered unstable internals.
pub mod cursor;
pub mod exclusion;
pub mod flood;
pub mod stats;
pub mod walk;

// --- High-level re-exports -------------------------------------------------

// Main entry points: assessor + results.
pub use crate::assess::{AssessParams, AssessmentMode, ExclusionParams, RoiAssessor};
pub use crate::types::{ObjectRecord, RoiCountingResult};

// High-level diagnostics returned by the assessor.
pub use crate::diagnostics::{AssessmentReport, AssessmentTrace};

// The flood engine and its vocabulary are generally useful on their own.
pub use crate::flood::{Connectivity, FloodEngine, Object3d};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use disector::prelude::*;
///
/// # fn main() {
/// let (w, h, d) = (32usize, 32usize, 8usize);
/// let mut voxels = vec![0u8; w * h * d];
///
/// let roi = PixelPolygon::new(vec![
///     Point2i::new(0, 0),
///     Point2i::new(31, 0),
///     Point2i::new(31, 31),
///     Point2i::new(0, 31),
/// ]);
///
/// let mut assessor = RoiAssessor::new(AssessParams::default());
/// let mut volume = VolumeMut::new(w, h, d, &mut voxels);
/// let report = assessor.assess(&mut volume, None, &[roi]);
/// println!("objects={} latency_ms={:.3}", report.objects.len(), report.trace.timings.total_ms);
/// # }
/// ```
pub mod prelude {
    pub use crate::assess::{AssessParams, AssessmentMode, RoiAssessor};
    pub use crate::flood::{Connectivity, FloodEngine};
    pub use crate::types::Coord3;
    pub use crate::volume::{VolumeMut, VolumeRef};
    pub use crate::walk::{PixelPolygon, Point2i};
}
