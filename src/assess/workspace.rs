//! Per-pass scratch state reused across ROIs and volumes.

use crate::types::Coord3;

/// Visited plane scoped to one seed scan.
///
/// Each ROI pass floods objects from raw seeds; the plane remembers which
/// voxels already belong to a flooded object so a label is processed once
/// per pass, replacing the processed-value bookkeeping that would otherwise
/// leak across independent volumes. `reset` must be called when the volume
/// (or ROI) changes.
pub struct AssessorWorkspace {
    dims: (usize, usize, usize),
    seen: Vec<u8>,
}

impl Default for AssessorWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessorWorkspace {
    pub fn new() -> Self {
        Self {
            dims: (0, 0, 0),
            seen: Vec::new(),
        }
    }

    /// Clears the plane and sizes it for a `w x h x d` volume.
    pub fn reset(&mut self, w: usize, h: usize, d: usize) {
        self.dims = (w, h, d);
        self.seen.clear();
        self.seen.resize(w * h * d, 0);
    }

    #[inline]
    pub fn is_seen(&self, idx: usize) -> bool {
        self.seen[idx] != 0
    }

    /// Marks the member list of a flooded object.
    pub fn mark(&mut self, members: &[Coord3]) {
        let (w, h, _) = self.dims;
        for &c in members {
            self.seen[(c.z as usize * h + c.y as usize) * w + c.x as usize] = 1;
        }
    }
}
