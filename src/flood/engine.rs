use std::collections::VecDeque;

use log::debug;

use super::connectivity::Connectivity;
use super::object::{measure_voxels, Object3d};
use crate::types::Coord3;
use crate::volume::{VolumeMut, VolumeRef, VoxelValue};
use crate::walk::RoiTest;

/// Outcome of the in/out majority vote over one object.
#[derive(Clone, Copy, Debug)]
pub struct BorderVote {
    /// Voxels whose slice position passed the ROI test.
    pub inside: usize,
    /// Voxels that failed it.
    pub outside: usize,
    /// Total visited voxels; always `inside + outside`.
    pub visited: usize,
    /// Majority decision. A tie counts as inside.
    pub is_inside: bool,
}

/// Repaint actions applied after a border vote. `None` leaves the voxels
/// at their original value.
#[derive(Clone, Copy, Debug)]
pub struct VoteMarks<T> {
    pub inside: Option<T>,
    pub outside: Option<T>,
}

impl<T> VoteMarks<T> {
    /// Count without touching the buffer.
    pub fn tally_only() -> Self {
        Self {
            inside: None,
            outside: None,
        }
    }

    /// Repaint to `in_val` or `out_val` depending on the vote.
    pub fn repaint(in_val: T, out_val: T) -> Self {
        Self {
            inside: Some(in_val),
            outside: Some(out_val),
        }
    }
}

/// Seeded breadth-first flood over a voxel buffer.
///
/// The engine owns its traversal state: a FIFO frontier, the member list of
/// the current object, and a visited plane shadowing the buffer, so the
/// stored voxel values are never used as traversal markers. After every
/// operation the visited plane is released voxel-by-voxel from the member
/// list, which keeps the cost proportional to the object rather than the
/// volume.
///
/// Traversal guarantees: visitation order is breadth-first, every voxel is
/// enqueued at most once, and membership is recorded before any repaint
/// touches the buffer.
pub struct FloodEngine {
    dims: (usize, usize, usize),
    visited: Vec<u8>,
    pass: Vec<u8>,
    queue: VecDeque<Coord3>,
    members: Vec<Coord3>,
}

impl Default for FloodEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FloodEngine {
    pub fn new() -> Self {
        Self {
            dims: (0, 0, 0),
            visited: Vec::new(),
            pass: Vec::new(),
            queue: VecDeque::new(),
            members: Vec::new(),
        }
    }

    /// Member list of the most recent flood, in breadth-first order.
    pub fn last_members(&self) -> &[Coord3] {
        &self.members
    }

    /// Relabels the object reachable from `seed` to `new_value` and returns
    /// its voxel count. Flooding a background region is legitimate here and
    /// clears or fills it like any other value class.
    pub fn relabel<T: VoxelValue>(
        &mut self,
        vol: &mut VolumeMut<'_, T>,
        seed: Coord3,
        conn: Connectivity,
        new_value: T,
    ) -> usize {
        self.collect(&vol.as_ref(), seed, conn);
        for &c in &self.members {
            vol.set(c, new_value);
        }
        let count = self.members.len();
        self.release(vol.w, vol.h);
        count
    }

    /// Clears the object reachable from `seed` to the background value.
    pub fn clear<T: VoxelValue>(
        &mut self,
        vol: &mut VolumeMut<'_, T>,
        seed: Coord3,
        conn: Connectivity,
    ) -> usize {
        self.relabel(vol, seed, conn, T::ZERO)
    }

    /// Collects the object's voxel list without mutating the buffer.
    pub fn select<T: VoxelValue>(
        &mut self,
        vol: &VolumeRef<'_, T>,
        seed: Coord3,
        conn: Connectivity,
    ) -> Vec<Coord3> {
        self.collect(vol, seed, conn);
        let out = self.members.clone();
        self.release(vol.w, vol.h);
        out
    }

    /// Floods the object at `seed`, classifying every voxel against the ROI
    /// test and deciding membership by majority. Voxels are then repainted
    /// per `marks`. Returns `None` when the seed holds the background value.
    ///
    /// Under 26-connectivity the ROI test is border-inclusive: a voxel
    /// whose own position fails the test still counts as inside when one of
    /// its four in-slice face neighbors passes, so diagonal boundary pixels
    /// are not systematically undercounted.
    pub fn border_vote<T: VoxelValue, R: RoiTest + ?Sized>(
        &mut self,
        vol: &mut VolumeMut<'_, T>,
        seed: Coord3,
        conn: Connectivity,
        roi: &R,
        background: T,
        marks: &VoteMarks<T>,
    ) -> Option<BorderVote> {
        if vol.as_ref().get_checked(seed)? == background {
            return None;
        }
        self.collect(&vol.as_ref(), seed, conn);

        let mut inside = 0usize;
        for &c in &self.members {
            if roi_accepts(roi, c, conn) {
                inside += 1;
            }
        }
        let visited = self.members.len();
        let outside = visited - inside;
        let is_inside = inside >= outside;

        let paint = if is_inside { marks.inside } else { marks.outside };
        if let Some(value) = paint {
            for &c in &self.members {
                vol.set(c, value);
            }
        }
        self.release(vol.w, vol.h);

        debug!(
            "FloodEngine::border_vote seed=({},{},{}) inside={} outside={} -> {}",
            seed.x,
            seed.y,
            seed.z,
            inside,
            outside,
            if is_inside { "inside" } else { "outside" }
        );
        Some(BorderVote {
            inside,
            outside,
            visited,
            is_inside,
        })
    }

    /// Majority vote with unconditional repaint to one of two caller
    /// values, for downstream classification pipelines.
    pub fn border_filter<T: VoxelValue, R: RoiTest + ?Sized>(
        &mut self,
        vol: &mut VolumeMut<'_, T>,
        seed: Coord3,
        conn: Connectivity,
        roi: &R,
        background: T,
        in_val: T,
        out_val: T,
    ) -> Option<BorderVote> {
        self.border_vote(
            vol,
            seed,
            conn,
            roi,
            background,
            &VoteMarks::repaint(in_val, out_val),
        )
    }

    /// Floods the object at `seed` and measures it into an [`Object3d`]
    /// record, leaving the buffer untouched. Returns `None` when the seed
    /// is out of bounds, holds the background value, or the measurement
    /// degenerates.
    pub fn assess<T: VoxelValue>(
        &mut self,
        vol: &VolumeRef<'_, T>,
        intensity: Option<&VolumeRef<'_, T>>,
        seed: Coord3,
        conn: Connectivity,
        background: T,
    ) -> Option<Object3d> {
        if vol.get_checked(seed)? == background {
            return None;
        }
        self.collect(vol, seed, conn);
        let object = measure_voxels(&self.members, intensity);
        self.release(vol.w, vol.h);
        object
    }

    /// Relabels every non-background object in the volume with sequential
    /// labels starting at `first_label`, returning the object count.
    /// Labels are truncated to the element width for `u8` volumes.
    pub fn label_all<T: VoxelValue>(
        &mut self,
        vol: &mut VolumeMut<'_, T>,
        conn: Connectivity,
        background: T,
        first_label: u16,
    ) -> usize {
        let n = vol.len();
        self.pass.clear();
        self.pass.resize(n, 0);

        let mut next = first_label;
        let mut count = 0usize;
        for idx in 0..n {
            if self.pass[idx] != 0 {
                continue;
            }
            let seed = vol.coord_of(idx);
            if vol.get(seed) == background {
                continue;
            }
            self.collect(&vol.as_ref(), seed, conn);
            let label = T::from_u16_lossy(next);
            let (w, h) = (vol.w, vol.h);
            for &c in &self.members {
                vol.set(c, label);
                self.pass[(c.z as usize * h + c.y as usize) * w + c.x as usize] = 1;
            }
            self.release(w, h);
            next = next.wrapping_add(1);
            count += 1;
        }
        debug!("FloodEngine::label_all labeled {} objects", count);
        count
    }

    /// Breadth-first collection of the object at `seed` into `members`.
    fn collect<T: VoxelValue>(
        &mut self,
        vol: &VolumeRef<'_, T>,
        seed: Coord3,
        conn: Connectivity,
    ) {
        self.members.clear();
        self.queue.clear();
        self.ensure_plane(vol.w, vol.h, vol.d);
        if !vol.contains(seed) {
            return;
        }
        let origin = vol.get(seed);
        let (w, h) = (vol.w, vol.h);
        let index = |c: Coord3| (c.z as usize * h + c.y as usize) * w + c.x as usize;

        self.visited[index(seed)] = 1;
        self.queue.push_back(seed);
        while let Some(c) = self.queue.pop_front() {
            self.members.push(c);
            for &(dx, dy, dz) in conn.offsets() {
                let nb = c.offset(dx, dy, dz);
                if !vol.contains(nb) {
                    continue;
                }
                let ni = index(nb);
                if self.visited[ni] == 0 && vol.get(nb) == origin {
                    self.visited[ni] = 1;
                    self.queue.push_back(nb);
                }
            }
        }
    }

    /// Clears the visited plane entries of the current member list.
    fn release(&mut self, w: usize, h: usize) {
        for &c in &self.members {
            self.visited[(c.z as usize * h + c.y as usize) * w + c.x as usize] = 0;
        }
    }

    fn ensure_plane(&mut self, w: usize, h: usize, d: usize) {
        let dims = (w, h, d);
        if self.dims != dims {
            self.dims = dims;
            self.visited.clear();
            self.visited.resize(w * h * d, 0);
        }
    }
}

/// ROI membership of a voxel's slice position, with the border-inclusive
/// relaxation under 26-connectivity.
fn roi_accepts<R: RoiTest + ?Sized>(roi: &R, c: Coord3, conn: Connectivity) -> bool {
    if roi.contains(c.x, c.y) {
        return true;
    }
    conn == Connectivity::Vertex26
        && (roi.contains(c.x + 1, c.y)
            || roi.contains(c.x - 1, c.y)
            || roi.contains(c.x, c.y + 1)
            || roi.contains(c.x, c.y - 1))
}
