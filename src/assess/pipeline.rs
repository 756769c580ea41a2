//! ROI assessment pipeline driving the counting end-to-end.
//!
//! For every ROI the assessor rasterizes the boundary walk, applies the
//! exclusion-zone crop, expands the cropped outline for contiguity, floods
//! every foreground object once, votes it in or out of the counting frame,
//! measures the accepted ones and aggregates their attributes into a
//! [`RoiCountingResult`]. A measurement failure flags and skips the object
//! without aborting the ROI or the run.
//!
//! Typical usage:
//! ```no_run
//! use disector::{AssessParams, RoiAssessor};
//! use disector::volume::VolumeMut;
//! use disector::walk::{PixelPolygon, Point2i};
//!
//! # fn example(mut voxels: Vec<u8>) {
//! let roi = PixelPolygon::new(vec![
//!     Point2i::new(0, 0),
//!     Point2i::new(63, 0),
//!     Point2i::new(63, 63),
//!     Point2i::new(0, 63),
//! ]);
//! let mut assessor = RoiAssessor::new(AssessParams::default());
//! let mut volume = VolumeMut::new(64, 64, 16, &mut voxels);
//! let report = assessor.assess(&mut volume, None, &[roi]);
//! println!("objects: {}", report.objects.len());
//! # }
//! ```

use std::time::Instant;

use log::{debug, warn};

use super::params::{AssessParams, AssessmentMode};
use super::workspace::AssessorWorkspace;
use crate::diagnostics::{
    AssessmentReport, AssessmentTrace, InputDescriptor, RoiStage, TimingBreakdown,
};
use crate::exclusion::{EdgeCrop, ExclusionCropper, ExclusionZoneResult};
use crate::flood::{measure_voxels, FloodEngine, Object3d, VoteMarks};
use crate::stats::SummaryStats;
use crate::types::{
    AttributeSummary, Coord3, ObjectRecord, RoiCountingResult, VoxelSpacing,
};
use crate::volume::{VolumeMut, VolumeRef, VoxelValue};
use crate::walk::{trace_boundary, ExpandedRoi, PixelPolygon, RoiTest};

/// Numeric object attributes aggregated per ROI.
const ATTRIBUTES: [(&str, fn(&Object3d) -> f64); 9] = [
    ("volume", |o| o.volume_voxels as f64),
    ("surface", |o| o.surface_voxels as f64),
    ("compactness", |o| o.compactness),
    ("sphericity", |o| o.sphericity),
    ("elongation", |o| o.elongation),
    ("flatness", |o| o.flatness),
    ("ellipsoid_ratio", |o| o.ellipsoid_ratio),
    ("solidity", |o| o.solidity),
    ("convexity", |o| o.convexity),
];

/// Per-ROI assessment orchestrator.
///
/// Owns the flood engine and the per-pass workspace so buffers are reused
/// across ROIs and runs. Each ROI and each object is fully processed before
/// the next begins; the assessor is strictly single-threaded over the
/// shared buffer.
pub struct RoiAssessor {
    params: AssessParams,
    engine: FloodEngine,
    workspace: AssessorWorkspace,
}

struct RoiScan {
    accepted: Vec<Object3d>,
    seeds_probed: usize,
    objects_found: usize,
    rejected_outside: usize,
    rejected_z: usize,
    skipped: usize,
}

impl RoiAssessor {
    pub fn new(params: AssessParams) -> Self {
        Self {
            params,
            engine: FloodEngine::new(),
            workspace: AssessorWorkspace::new(),
        }
    }

    pub fn params(&self) -> &AssessParams {
        &self.params
    }

    /// Update the connectivity mode for subsequent runs.
    pub fn set_connectivity(&mut self, connectivity: crate::flood::Connectivity) {
        self.params.connectivity = connectivity;
    }

    /// Update the exclusion depths and switches.
    pub fn set_exclusion(&mut self, exclusion: super::params::ExclusionParams) {
        self.params.exclusion = exclusion;
    }

    /// Update the assessment mode.
    pub fn set_mode(&mut self, mode: AssessmentMode) {
        self.params.mode = mode;
    }

    /// Update the voxel calibration.
    pub fn set_spacing(&mut self, spacing: VoxelSpacing) {
        self.params.spacing = spacing;
    }

    /// Update the background value.
    pub fn set_background(&mut self, background: u16) {
        self.params.background = background;
    }

    /// Runs the assessment over every ROI and returns the full report.
    ///
    /// The voxel buffer is treated as thresholded foreground over
    /// `params.background`; it is only mutated by vote repaints, which this
    /// pipeline does not request, so the buffer content survives the run.
    pub fn assess<T: VoxelValue>(
        &mut self,
        vol: &mut VolumeMut<'_, T>,
        intensity: Option<&VolumeRef<'_, T>>,
        rois: &[PixelPolygon],
    ) -> AssessmentReport {
        let total_start = Instant::now();
        let (w, h, d) = (vol.w, vol.h, vol.d);
        debug!(
            "RoiAssessor::assess start {}x{}x{} rois={} mode={:?}",
            w,
            h,
            d,
            rois.len(),
            self.params.mode
        );

        let z_guard = self.z_guard_slices();
        let background = T::from_u16_lossy(self.params.background);

        let mut walk_ms = 0.0f64;
        let mut crop_ms = 0.0f64;
        let mut scan_ms = 0.0f64;

        let mut roi_stages = Vec::with_capacity(rois.len());
        let mut results = Vec::with_capacity(rois.len());
        let mut records: Vec<ObjectRecord> = Vec::new();
        let mut object_number = 0usize;

        for (roi_index, roi) in rois.iter().enumerate() {
            let roi_start = Instant::now();

            let walk_start = Instant::now();
            let walk = trace_boundary(roi, w as i32, h as i32);
            walk_ms += walk_start.elapsed().as_secs_f64() * 1000.0;

            let crop_start = Instant::now();
            let outcome = if self.params.exclusion.apply_xy {
                ExclusionCropper::new(
                    w as i32,
                    h as i32,
                    self.params.exclusion.depth_x,
                    self.params.exclusion.depth_y,
                )
                .crop(&walk)
            } else {
                ExclusionZoneResult {
                    polygon: roi.clone(),
                    crop: [EdgeCrop::None, EdgeCrop::None],
                }
            };
            crop_ms += crop_start.elapsed().as_secs_f64() * 1000.0;

            let scan_start = Instant::now();
            let scan = self.scan_roi(vol, intensity, &outcome.polygon, background, z_guard);
            scan_ms += scan_start.elapsed().as_secs_f64() * 1000.0;

            let mut volume_voxels = 0usize;
            for obj in &scan.accepted {
                volume_voxels += obj.volume_voxels;
                object_number += 1;
                records.push(object_record(obj, object_number, roi_index));
            }
            results.push(RoiCountingResult {
                roi_index,
                object_count: scan.accepted.len(),
                volume_voxels,
                attributes: summarize(&scan.accepted),
            });

            debug!(
                "RoiAssessor::roi {} found={} accepted={} rejected={} skipped={}",
                roi_index,
                scan.objects_found,
                scan.accepted.len(),
                scan.rejected_outside + scan.rejected_z,
                scan.skipped
            );
            roi_stages.push(RoiStage {
                roi_index,
                walk_points: walk.len(),
                crop: outcome.crop,
                z_guard_slices: z_guard,
                seeds_probed: scan.seeds_probed,
                objects_found: scan.objects_found,
                accepted: scan.accepted.len(),
                rejected_outside: scan.rejected_outside,
                rejected_z: scan.rejected_z,
                skipped: scan.skipped,
                elapsed_ms: roi_start.elapsed().as_secs_f64() * 1000.0,
            });
        }

        let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        let mut timings = TimingBreakdown::with_total(total_ms);
        if walk_ms > 0.0 {
            timings.push("boundary_walk", walk_ms);
        }
        if crop_ms > 0.0 {
            timings.push("exclusion_crop", crop_ms);
        }
        if scan_ms > 0.0 {
            timings.push("flood_scan", scan_ms);
        }
        debug!(
            "RoiAssessor::assess done objects={} latency_ms={:.3}",
            records.len(),
            total_ms
        );

        AssessmentReport {
            rois: results,
            objects: records,
            trace: AssessmentTrace {
                input: InputDescriptor {
                    width: w,
                    height: h,
                    depth: d,
                    rois: rois.len(),
                },
                timings,
                rois: roi_stages,
            },
        }
    }

    /// One full seed scan of the volume against a single counting frame.
    fn scan_roi<T: VoxelValue>(
        &mut self,
        vol: &mut VolumeMut<'_, T>,
        intensity: Option<&VolumeRef<'_, T>>,
        frame: &PixelPolygon,
        background: T,
        z_guard: usize,
    ) -> RoiScan {
        let (w, h, d) = (vol.w, vol.h, vol.d);
        let conn = self.params.connectivity;
        let mode = self.params.mode;
        let test = ExpandedRoi::new(frame);
        let z_lo = z_guard as i32;
        let z_hi = d as i32 - 1 - z_guard as i32;

        self.workspace.reset(w, h, d);
        let mut scan = RoiScan {
            accepted: Vec::new(),
            seeds_probed: 0,
            objects_found: 0,
            rejected_outside: 0,
            rejected_z: 0,
            skipped: 0,
        };

        for idx in 0..vol.len() {
            let seed = vol.coord_of(idx);
            if vol.get(seed) == background {
                continue;
            }
            scan.seeds_probed += 1;
            if self.workspace.is_seen(idx) {
                continue;
            }
            scan.objects_found += 1;

            match mode {
                AssessmentMode::WholeObject => {
                    let Some(vote) = self.engine.border_vote(
                        vol,
                        seed,
                        conn,
                        &test,
                        background,
                        &VoteMarks::tally_only(),
                    ) else {
                        scan.skipped += 1;
                        continue;
                    };
                    self.workspace.mark(self.engine.last_members());
                    if !vote.is_inside {
                        scan.rejected_outside += 1;
                        continue;
                    }
                    if z_guard > 0 && touches_z_guard(self.engine.last_members(), z_lo, z_hi) {
                        scan.rejected_z += 1;
                        continue;
                    }
                    match self
                        .engine
                        .assess(&vol.as_ref(), intensity, seed, conn, background)
                    {
                        Some(obj) => scan.accepted.push(obj),
                        None => {
                            warn!(
                                "RoiAssessor::scan_roi measurement failed at ({},{},{}), object skipped",
                                seed.x, seed.y, seed.z
                            );
                            scan.skipped += 1;
                        }
                    }
                }
                AssessmentMode::ObjectAndFragments => {
                    let members = self.engine.select(&vol.as_ref(), seed, conn);
                    self.workspace.mark(&members);
                    let fragment: Vec<Coord3> = members
                        .iter()
                        .copied()
                        .filter(|c| {
                            test.contains(c.x, c.y)
                                && (z_guard == 0 || (c.z >= z_lo && c.z <= z_hi))
                        })
                        .collect();
                    if fragment.is_empty() {
                        scan.rejected_outside += 1;
                        continue;
                    }
                    match measure_voxels(&fragment, intensity) {
                        Some(obj) => scan.accepted.push(obj),
                        None => {
                            warn!(
                                "RoiAssessor::scan_roi fragment measurement failed at ({},{},{}), object skipped",
                                seed.x, seed.y, seed.z
                            );
                            scan.skipped += 1;
                        }
                    }
                }
            }
        }
        scan
    }

    /// Number of guard slices excluded at each end of the stack, derived
    /// from the calibrated Z depth.
    fn z_guard_slices(&self) -> usize {
        if !self.params.exclusion.apply_z {
            return 0;
        }
        let dz = self.params.spacing.dz;
        if dz <= 0.0 {
            return 0;
        }
        (self.params.exclusion.depth_z / dz).round().max(0.0) as usize
    }
}

/// Whether any member voxel lies inside an excluded Z slab.
fn touches_z_guard(members: &[Coord3], z_lo: i32, z_hi: i32) -> bool {
    members.iter().any(|c| c.z < z_lo || c.z > z_hi)
}

fn object_record(obj: &Object3d, number: usize, roi_index: usize) -> ObjectRecord {
    ObjectRecord {
        object: number,
        roi_index,
        first_voxel: obj.first_voxel,
        centroid: obj.centroid,
        bounding_box: obj.bounding_box,
        volume_voxels: obj.volume_voxels,
        surface_voxels: obj.surface_voxels,
        compactness: obj.compactness,
        sphericity: obj.sphericity,
        elongation: obj.elongation,
        flatness: obj.flatness,
        ellipsoid_ratio: obj.ellipsoid_ratio,
        moment_invariants: obj.moment_invariants,
        solidity: obj.solidity,
        convexity: obj.convexity,
        intensity_mean: obj.intensity.map(|i| i.mean),
        intensity_sd: obj.intensity.map(|i| i.sd),
        intensity_min: obj.intensity.map(|i| i.min),
        intensity_max: obj.intensity.map(|i| i.max),
        intensity_sum: obj.intensity.map(|i| i.sum),
    }
}

/// Aggregates every numeric attribute of the accepted objects.
fn summarize(accepted: &[Object3d]) -> Vec<AttributeSummary> {
    let mut out = Vec::new();
    if accepted.is_empty() {
        return out;
    }
    for (name, extract) in ATTRIBUTES {
        let values: Vec<f64> = accepted.iter().map(extract).collect();
        if let Some(stats) = SummaryStats::from_samples(&values) {
            out.push(AttributeSummary { name, stats });
        }
    }
    let intensity: Vec<f64> = accepted
        .iter()
        .filter_map(|o| o.intensity.map(|i| i.mean))
        .collect();
    if let Some(stats) = SummaryStats::from_samples(&intensity) {
        out.push(AttributeSummary {
            name: "intensity_mean",
            stats,
        });
    }
    out
}
