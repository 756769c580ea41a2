//! Parameter types configuring the ROI assessment.
//!
//! These are the knobs the surrounding configuration UI produces and this
//! core consumes: connectivity mode, exclusion depths and switches, the
//! assessment mode, and the voxel calibration. Defaults match the common
//! single-image workflow: full 26-connectivity, no exclusion, whole-object
//! assessment on an uncalibrated stack.

use serde::{Deserialize, Serialize};

use crate::flood::Connectivity;
use crate::types::VoxelSpacing;

/// How border-straddling objects contribute to an ROI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentMode {
    /// The majority vote assigns the whole object to one side.
    WholeObject,
    /// The in-ROI fragment of a straddling object is measured and counted
    /// on its own; the vote is not applied.
    ObjectAndFragments,
}

/// Exclusion-zone configuration.
///
/// Depths along x and y are in pixels; the depth along z is in calibrated
/// units and converted through [`VoxelSpacing::dz`] so the guard is
/// comparable to the in-plane depths on anisotropic stacks.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ExclusionParams {
    /// Crop depth from a contacted x edge, in pixels.
    pub depth_x: i32,
    /// Crop depth from a contacted y edge, in pixels.
    pub depth_y: i32,
    /// Guard depth at each end of the stack, in calibrated units.
    pub depth_z: f64,
    /// Enables the in-plane exclusion crop.
    pub apply_xy: bool,
    /// Enables the Z guard slabs.
    pub apply_z: bool,
}

impl Default for ExclusionParams {
    fn default() -> Self {
        Self {
            depth_x: 0,
            depth_y: 0,
            depth_z: 0.0,
            apply_xy: false,
            apply_z: false,
        }
    }
}

/// Assessor-wide parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssessParams {
    /// Neighbor set followed by the flood engine.
    pub connectivity: Connectivity,
    /// Voxel value treated as background. Seeds at this value are skipped.
    pub background: u16,
    /// Exclusion-zone depths and switches.
    pub exclusion: ExclusionParams,
    /// Whole-object vote versus per-fragment counting.
    pub mode: AssessmentMode,
    /// Physical voxel size of the stack.
    pub spacing: VoxelSpacing,
}

impl Default for AssessParams {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Vertex26,
            background: 0,
            exclusion: ExclusionParams::default(),
            mode: AssessmentMode::WholeObject,
            spacing: VoxelSpacing::default(),
        }
    }
}
