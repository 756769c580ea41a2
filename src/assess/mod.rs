//! ROI assessment orchestrator.
//!
//! Composes the boundary-walk extraction, the exclusion-zone cropper and
//! the flood engine into the disector counting workflow:
//!
//! 1. Rasterize each ROI into a pixel-exact boundary walk.
//! 2. Crop the exclusion zone from whichever image edges the walk touches
//!    (when XY exclusion is enabled), and derive the Z guard slab from the
//!    calibrated depth.
//! 3. Expand the counting frame for contiguity with adjacent ROIs.
//! 4. Flood every foreground object once per ROI pass, decide membership
//!    by majority vote (or clip to the in-frame fragment), and measure the
//!    accepted objects.
//! 5. Aggregate per-object attributes into per-ROI descriptive statistics.
//!
//! Modules
//! - [`params`] - configuration consumed from the surrounding UI/settings.
//! - `pipeline` - the [`RoiAssessor`] implementation.
//! - `workspace` - per-pass visited plane reused across ROIs.

pub mod params;
mod pipeline;
mod workspace;

pub use params::{AssessParams, AssessmentMode, ExclusionParams};
pub use pipeline::RoiAssessor;
pub use workspace::AssessorWorkspace;
