//! Stereological exclusion zones.
//!
//! An ROI touching the image boundary samples a volume whose objects were
//! already trimmed by the physical edge of the stack. The unbiased counting
//! frame compensates by cropping such an ROI inward by a calibrated depth
//! along each axis whose edge it touches, so the counting frame never leans
//! on the truncated boundary.
//!
//! [`ExclusionCropper`] implements the crop on a pixel-exact
//! [`BoundaryWalk`](crate::walk::BoundaryWalk): per axis it measures the
//! walk's contact with both image edges, picks the edge with the longer
//! contact, and retracts every on-edge run to the buffer line
//! `|edge - depth|`, pinning the retraction endpoints so the rebuilt
//! polygon stays aligned with the surviving outline.

mod cropper;

pub use cropper::{EdgeCrop, ExclusionCropper, ExclusionZoneResult};
