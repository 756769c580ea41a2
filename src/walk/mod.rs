//! Pixel-exact ROI boundary walks.
//!
//! The exclusion-zone engine works on an ROI's outline as a closed sequence
//! of unit-step pixel coordinates rather than on the vertex polygon itself:
//!
//! - [`trace_boundary`] rasterizes a [`PixelPolygon`] into a
//!   [`BoundaryWalk`], synthesizing every intermediate pixel between
//!   consecutive vertices one axis at a time so that neighboring walk points
//!   never differ by more than one unit per axis.
//! - [`EdgeContact`] scans a walk for maximal runs lying on a single
//!   image-edge coordinate (x = 0, x = w-1, y = 0 or y = h-1), including
//!   runs spanning the cyclic seam of the walk.
//! - [`EdgeBreach`] is the small predicate deciding when a coordinate has
//!   crossed from an image edge past the exclusion buffer, with the
//!   comparison direction fixed once at construction.
//!
//! The walk is cyclic: the last point connects back to the first and no
//! duplicate closing point is stored.

mod breach;
mod extractor;
mod runs;
mod types;

pub use breach::EdgeBreach;
pub use extractor::trace_boundary;
pub use runs::{EdgeContact, EdgeContactRun};
pub use types::{Axis, BoundaryWalk, ExpandedRoi, PixelPolygon, Point2i, RoiFn, RoiTest};
