mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// Scalar voxel element. Implemented for `u8` and `u16`, the two element
/// widths the counting pipeline supports.
pub trait VoxelValue: Copy + Eq + Ord + Into<u16> + sealed::Sealed + 'static {
    /// The background/cleared value.
    const ZERO: Self;

    /// Narrowing conversion used when assigning sequential labels.
    /// Truncates for `u8` once the label count exceeds the value range.
    fn from_u16_lossy(value: u16) -> Self;
}

impl VoxelValue for u8 {
    const ZERO: Self = 0;

    #[inline]
    fn from_u16_lossy(value: u16) -> Self {
        value as u8
    }
}

impl VoxelValue for u16 {
    const ZERO: Self = 0;

    #[inline]
    fn from_u16_lossy(value: u16) -> Self {
        value
    }
}
