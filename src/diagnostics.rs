//! Serializable report and trace data model returned by the assessor.
//!
//! [`AssessmentReport`] is the main entry point: the per-ROI counting
//! results plus an [`AssessmentTrace`] describing what every stage did and
//! how long it took.

use serde::{Deserialize, Serialize};

use crate::exclusion::EdgeCrop;
use crate::types::{ObjectRecord, RoiCountingResult};

/// Timing entry describing a single stage of the assessment.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one assessment run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Shape of the volume and ROI set the assessor ran on.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub rois: usize,
}

/// Per-ROI stage outcome.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiStage {
    pub roi_index: usize,
    /// Points in the rasterized boundary walk.
    pub walk_points: usize,
    /// Exclusion crop classification for the x and y axis.
    pub crop: [EdgeCrop; 2],
    /// Excluded slice count at each end of the stack.
    pub z_guard_slices: usize,
    /// Foreground seeds probed in the scan.
    pub seeds_probed: usize,
    /// Distinct objects flooded.
    pub objects_found: usize,
    /// Objects assigned to the ROI.
    pub accepted: usize,
    /// Objects voted outside the counting frame.
    pub rejected_outside: usize,
    /// Objects touching the excluded Z slabs.
    pub rejected_z: usize,
    /// Objects skipped after a measurement failure.
    pub skipped: usize,
    pub elapsed_ms: f64,
}

/// Structured trace describing every stage of an assessment run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub rois: Vec<RoiStage>,
}

/// Result of one assessment run: per-ROI counting results, the flat object
/// table, and the stage trace.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub rois: Vec<RoiCountingResult>,
    pub objects: Vec<ObjectRecord>,
    pub trace: AssessmentTrace,
}
