//! Connected-component flood engine.
//!
//! Everything here operates on one primitive: a seeded breadth-first flood
//! over voxels sharing the seed's original value under a configurable
//! [`Connectivity`]. The variants built on it are:
//!
//! - [`FloodEngine::relabel`] / [`FloodEngine::clear`]: repaint the object
//!   to a caller value or to background.
//! - [`FloodEngine::border_vote`] / [`FloodEngine::border_filter`]: classify
//!   every voxel as in or out of an ROI while flooding, then decide the
//!   whole object by majority and repaint accordingly. This is the rule
//!   that settles border-straddling objects for the counting frame.
//! - [`FloodEngine::select`] / [`FloodEngine::assess`]: collect the voxel
//!   list, or measure it into a full [`Object3d`] record (shape, moments,
//!   convex-hull and intensity measures).
//! - [`FloodEngine::label_all`]: whole-volume sweep giving every object a
//!   sequential label.
//!
//! Traversal state lives in the engine (visited plane, FIFO frontier,
//! member list), never in the voxel values themselves, so measurement and
//! repaint decisions stay decoupled from bookkeeping.
//!
//! Complexity: each flood visits every member voxel once and inspects its
//! neighbor set, giving O(k * members) per object; the visited plane is
//! released member-by-member, not cleared wholesale.

mod connectivity;
mod engine;
mod hull;
mod object;

pub use connectivity::Connectivity;
pub use engine::{BorderVote, FloodEngine, VoteMarks};
pub use hull::{convex_hull_metrics, HullMetrics};
pub use object::{measure_voxels, IntensityStats, Object3d};
