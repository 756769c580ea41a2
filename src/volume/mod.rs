//! Borrowed 3D voxel buffer views.
//!
//! Buffers are owned by the surrounding image-handling code; the crate only
//! borrows them. [`VolumeMut`] is the mutable view the flood engine paints
//! into, [`VolumeRef`] the read-only view used for measurement and for the
//! companion intensity stack. Element widths are 8 or 16 bit unsigned, see
//! [`VoxelValue`].
//!
//! Indexing is x-fastest: `index = (z * height + y) * width + x`.

mod buffer;
mod traits;

pub use buffer::{VolumeMut, VolumeRef};
pub use traits::VoxelValue;
