//! Scan kernels.
//!
//! This module holds the algorithms behind the searchers. Each kernel finds
//! the first occurrence of a [`Pattern`] in a length-bounded buffer. Zero
//! bytes are ordinary data; nothing stops at a terminator.
//!
//! ## Kernels
//!
//! | Kernel | Module | Block | Match detection |
//! |--------|--------|-------|-----------------|
//! | Bytewise | [`bytewise`] | 1 byte | compare |
//! | Word | [`swar`] | 4 or 8 bytes | xor + borrow trick |
//! | Vector | [`vector`] | 16 bytes | SSE2 `pcmpeqb`/`pmovmskb`, NEON `cmeq`/`shrn` |
//! | Pair | [`pair`] | any of the above | two masks + one carried lane |
//!
//! ## Over-reads
//!
//! Block kernels only ever load blocks aligned to their own size. A block is
//! loaded only when it contains at least one byte of the buffer, so it lies in
//! the same page as that byte and the load cannot fault, even when part of it
//! is before the start or past the end of the buffer. Lanes before the start
//! are masked or skipped by a bytewise prologue; candidates past the end are
//! rejected by [`crate::guard`].
//!
//! ```text
//!   aligned blocks:  |.......|.......|.......|
//!   buffer:              [=============]
//!   first block:     |xxxx===|           masked (lanes before start) or prologue
//!   last block:                  |=====xx|   result clamped to len
//! ```

pub(crate) mod block;
pub mod bytewise;
pub(crate) mod pair;
pub(crate) mod swar;
pub(crate) mod vector;


use crate::strategy::{Entry, Kernel, PairMethod, Strategy};

pub use bytewise::scan_linear;

/// What to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// A single byte.
    Byte(u8),
    /// Two adjacent bytes, first then second.
    Pair(u8, u8),
}

impl Pattern {
    /// Bytes covered by one occurrence.
    pub const fn span(self) -> usize {
        match self {
            Self::Byte(_) => 1,
            Self::Pair(..) => 2,
        }
    }

    /// # Safety
    /// `i + self.span() <= buf.len`.
    #[inline(always)]
    pub(crate) unsafe fn matches_at(self, buf: Buffer, i: usize) -> bool {
        match self {
            Self::Byte(b) => buf.byte(i) == b,
            Self::Pair(a, b) => buf.byte(i) == a && buf.byte(i + 1) == b,
        }
    }
}

/// Caller-owned bytes `[ptr, ptr + len)`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Buffer {
    pub ptr: *const u8,
    pub len: usize,
}

impl Buffer {
    #[inline(always)]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            ptr: bytes.as_ptr(),
            len: bytes.len(),
        }
    }

    #[inline(always)]
    pub const fn from_raw(ptr: *const u8, len: usize) -> Self {
        Self { ptr, len }
    }

    /// # Safety
    /// `i < self.len`.
    #[inline(always)]
    pub unsafe fn byte(self, i: usize) -> u8 {
        *self.ptr.add(i)
    }

    #[inline(always)]
    pub fn address(self, i: usize) -> usize {
        (self.ptr as usize).wrapping_add(i)
    }

    /// Pointer to the block whose first lane has logical index `offset`.
    /// May point before the buffer for the masked first block.
    #[inline(always)]
    pub fn block(self, offset: isize) -> *const u8 {
        self.ptr.wrapping_offset(offset)
    }
}

/// One aligned load-and-compare step.
///
/// Match masks are returned in the engine's own lane encoding: lane `k`
/// occupies bits `k * LANE_BITS .. (k + 1) * LANE_BITS`, so the lowest set bit
/// always belongs to the lowest matching address.
pub(crate) trait BlockEngine {
    /// Bytes per load; also the required alignment.
    const WIDTH: usize;
    /// Mask bits per lane.
    const LANE_BITS: u32;
    /// Bit offset of the highest lane.
    const TOP_LANE_SHIFT: u32 = (Self::WIDTH as u32 - 1) * Self::LANE_BITS;
    /// Mask bits per block.
    const BLOCK_BITS: u32 = Self::WIDTH as u32 * Self::LANE_BITS;
    /// Bits of lane 0.
    const LANE0: u64 = (1 << Self::LANE_BITS) - 1;

    type Splat: Copy;
    type Block: Copy;

    unsafe fn splat(byte: u8) -> Self::Splat;

    /// # Safety
    /// `ptr` is aligned to `WIDTH` and the block holds at least one readable
    /// byte (hence all of it is readable).
    unsafe fn load(ptr: *const u8) -> Self::Block;

    /// Lanes equal to the splatted byte. Only the lowest flagged lane is
    /// guaranteed to be a real match.
    unsafe fn first_match(block: Self::Block, splat: Self::Splat) -> u64;

    /// Lanes equal to the splatted byte, every flagged lane exact.
    unsafe fn all_matches(block: Self::Block, splat: Self::Splat) -> u64;

    /// Widen a one-bit-per-lane mask to this engine's encoding.
    #[inline(always)]
    fn lane_mask(lanes: u32) -> u64 {
        let mut mask = 0;
        for lane in 0..Self::WIDTH {
            if lanes >> lane & 1 != 0 {
                mask |= Self::LANE0 << (lane as u32 * Self::LANE_BITS);
            }
        }
        mask
    }

    /// Lane index of the lowest set bit of a non-zero mask.
    #[inline(always)]
    fn lowest_lane(mask: u64) -> usize {
        (mask.trailing_zeros() / Self::LANE_BITS) as usize
    }
}

/// Run a single-byte search with `strategy`.
///
/// # Safety
/// `buf` describes readable memory, and the aligned block around every byte
/// of it is readable. `strategy` was checked against the target's
/// capabilities.
pub(crate) unsafe fn find_byte(buf: Buffer, needle: u8, strategy: Strategy) -> Option<usize> {
    use swar::WordSize::{Eight, Four};

    match strategy {
        Strategy::Bytewise => bytewise::scan_buffer(buf, Pattern::Byte(needle)),
        Strategy::Block { kernel, entry } => match (kernel, entry) {
            (Kernel::Word4, Entry::Masked) => swar::scan_word_aligned(buf, needle, Four),
            (Kernel::Word4, Entry::Prologued) => swar::scan_word_prologued(buf, needle, Four),
            (Kernel::Word8, Entry::Masked) => swar::scan_word_aligned(buf, needle, Eight),
            (Kernel::Word8, Entry::Prologued) => swar::scan_word_prologued(buf, needle, Eight),
            (Kernel::Vector16, Entry::Masked) => vector::scan_vector_aligned(buf, needle),
            (Kernel::Vector16, Entry::Prologued) => vector::scan_vector_prologued(buf, needle),
        },
        Strategy::Stepped => vector::scan_stepped(buf, needle),
    }
}

/// Run a pair search with `strategy`.
///
/// # Safety
/// Same as [`find_byte`].
pub(crate) unsafe fn find_pair(
    buf: Buffer,
    first: u8,
    second: u8,
    strategy: Strategy,
    method: PairMethod,
) -> Option<usize> {
    match strategy {
        Strategy::Block {
            kernel: Kernel::Word4,
            entry,
        } => pair::scan_pair::<swar::Word4>(buf, first, second, entry, method),
        Strategy::Block {
            kernel: Kernel::Word8,
            entry,
        } => pair::scan_pair::<swar::Word8>(buf, first, second, entry, method),
        Strategy::Block {
            kernel: Kernel::Vector16,
            entry,
        } => pair::scan_pair::<vector::Native>(buf, first, second, entry, method),
        // Searchers never hold `Stepped` for pairs; the byte loop keeps this total.
        Strategy::Bytewise | Strategy::Stepped => {
            bytewise::scan_buffer(buf, Pattern::Pair(first, second))
        }
    }
}
