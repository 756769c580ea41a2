use serde::{Deserialize, Serialize};

use crate::stats::SummaryStats;

/// Integer voxel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord3 {
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Sort key establishing the canonical `(z, y, x)` lexicographic order
    /// used to pick an object's first voxel.
    #[inline]
    pub fn zyx_key(self) -> (i32, i32, i32) {
        (self.z, self.y, self.x)
    }
}

/// Axis-aligned voxel bounding box, inclusive on all faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
    pub z_min: i32,
    pub z_max: i32,
}

impl BoundingBox {
    /// Degenerate box containing only `c`.
    pub fn at(c: Coord3) -> Self {
        Self {
            x_min: c.x,
            x_max: c.x,
            y_min: c.y,
            y_max: c.y,
            z_min: c.z,
            z_max: c.z,
        }
    }

    /// Grows the box to contain `c`.
    pub fn include(&mut self, c: Coord3) {
        self.x_min = self.x_min.min(c.x);
        self.x_max = self.x_max.max(c.x);
        self.y_min = self.y_min.min(c.y);
        self.y_max = self.y_max.max(c.y);
        self.z_min = self.z_min.min(c.z);
        self.z_max = self.z_max.max(c.z);
    }

    #[inline]
    pub fn contains(&self, c: Coord3) -> bool {
        c.x >= self.x_min
            && c.x <= self.x_max
            && c.y >= self.y_min
            && c.y <= self.y_max
            && c.z >= self.z_min
            && c.z <= self.z_max
    }

    /// Extent in voxels along each axis.
    #[inline]
    pub fn extents(&self) -> [i32; 3] {
        [
            self.x_max - self.x_min + 1,
            self.y_max - self.y_min + 1,
            self.z_max - self.z_min + 1,
        ]
    }
}

/// Physical size of one voxel, used to convert the calibrated Z exclusion
/// depth into a slice count comparable to the XY pixel depths.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VoxelSpacing {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Default for VoxelSpacing {
    fn default() -> Self {
        Self {
            dx: 1.0,
            dy: 1.0,
            dz: 1.0,
        }
    }
}

/// Flat per-object row handed to the tabular attribute sink.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    /// Sequential object number within the run.
    pub object: usize,
    /// Index of the ROI the object was assigned to.
    pub roi_index: usize,
    /// Canonical first voxel, the object's external reference key.
    pub first_voxel: Coord3,
    pub centroid: [f64; 3],
    pub bounding_box: BoundingBox,
    pub volume_voxels: usize,
    pub surface_voxels: usize,
    pub compactness: f64,
    pub sphericity: f64,
    pub elongation: f64,
    pub flatness: f64,
    pub ellipsoid_ratio: f64,
    pub moment_invariants: [f64; 3],
    pub solidity: f64,
    pub convexity: f64,
    pub intensity_mean: Option<f64>,
    pub intensity_sd: Option<f64>,
    pub intensity_min: Option<f64>,
    pub intensity_max: Option<f64>,
    pub intensity_sum: Option<f64>,
}

/// Named summary over one numeric object attribute within an ROI.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSummary {
    pub name: &'static str,
    pub stats: SummaryStats,
}

/// Per-ROI counting outcome.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiCountingResult {
    pub roi_index: usize,
    /// Number of objects assigned to the ROI.
    pub object_count: usize,
    /// Total voxel volume over the assigned objects.
    pub volume_voxels: usize,
    /// Descriptive statistics per numeric attribute, empty when the ROI
    /// received no objects.
    pub attributes: Vec<AttributeSummary>,
}
