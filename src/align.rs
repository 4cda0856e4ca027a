//! Alignment of a start address relative to a block size.

/// Position of a buffer start inside its enclosing aligned block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    /// Bytes between the aligned block start and the buffer start.
    pub misalignment: usize,
    /// One bit per lane of the first block; lanes before the buffer start are
    /// clear.
    pub first_block_valid_mask: u32,
}

impl Alignment {
    /// Compute the alignment of `address` for `block`-byte loads.
    ///
    /// `block` must be a power of two no larger than 32.
    #[inline]
    pub const fn compute(address: usize, block: usize) -> Self {
        debug_assert!(block.is_power_of_two() && block <= 32);
        let misalignment = address & (block - 1);
        let all_lanes = u32::MAX >> (32 - block);
        Self {
            misalignment,
            first_block_valid_mask: (all_lanes << misalignment) & all_lanes,
        }
    }

    /// Whether `address` is already on a block boundary.
    #[inline]
    pub const fn is_aligned(address: usize, block: usize) -> bool {
        address & (block - 1) == 0
    }
}
