use serde::{Deserialize, Serialize};

/// Which of the 26 integer offsets around a voxel count as adjacent.
///
/// The neighbor sets are strictly nested: `Face6` is a subset of `Edge18`,
/// which is a subset of `Vertex26`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connectivity {
    /// Face-sharing neighbors only (6).
    Face6,
    /// Face- and edge-sharing neighbors (18).
    Edge18,
    /// All neighbors including corners (26).
    Vertex26,
}

const OFFSETS_6: [(i32, i32, i32); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

const OFFSETS_18: [(i32, i32, i32); 18] = [
    (0, 0, -1),
    (0, -1, 0),
    (-1, 0, 0),
    (1, 0, 0),
    (0, 1, 0),
    (0, 0, 1),
    (0, -1, -1),
    (-1, 0, -1),
    (1, 0, -1),
    (0, 1, -1),
    (-1, -1, 0),
    (1, -1, 0),
    (-1, 1, 0),
    (1, 1, 0),
    (0, -1, 1),
    (-1, 0, 1),
    (1, 0, 1),
    (0, 1, 1),
];

const OFFSETS_26: [(i32, i32, i32); 26] = [
    (-1, -1, -1),
    (0, -1, -1),
    (1, -1, -1),
    (-1, 0, -1),
    (0, 0, -1),
    (1, 0, -1),
    (-1, 1, -1),
    (0, 1, -1),
    (1, 1, -1),
    (-1, -1, 0),
    (0, -1, 0),
    (1, -1, 0),
    (-1, 0, 0),
    (1, 0, 0),
    (-1, 1, 0),
    (0, 1, 0),
    (1, 1, 0),
    (-1, -1, 1),
    (0, -1, 1),
    (1, -1, 1),
    (-1, 0, 1),
    (0, 0, 1),
    (1, 0, 1),
    (-1, 1, 1),
    (0, 1, 1),
    (1, 1, 1),
];

impl Connectivity {
    /// Parses the conventional 6/18/26 neighbor count.
    pub fn from_neighbor_count(count: u8) -> Option<Self> {
        match count {
            6 => Some(Self::Face6),
            18 => Some(Self::Edge18),
            26 => Some(Self::Vertex26),
            _ => None,
        }
    }

    /// Neighbor offsets followed during flood traversal.
    #[inline]
    pub fn offsets(self) -> &'static [(i32, i32, i32)] {
        match self {
            Self::Face6 => &OFFSETS_6,
            Self::Edge18 => &OFFSETS_18,
            Self::Vertex26 => &OFFSETS_26,
        }
    }

    /// Whether the offset `(dx, dy, dz)` is adjacent under this mode:
    /// exactly one nonzero component for `Face6`, at least one zero
    /// component for `Edge18`, anything but the center for `Vertex26`.
    #[inline]
    pub fn admits(self, dx: i32, dy: i32, dz: i32) -> bool {
        if dx == 0 && dy == 0 && dz == 0 {
            return false;
        }
        match self {
            Self::Face6 => (dx != 0) as u8 + (dy != 0) as u8 + (dz != 0) as u8 == 1,
            Self::Edge18 => dx == 0 || dy == 0 || dz == 0,
            Self::Vertex26 => true,
        }
    }
}
