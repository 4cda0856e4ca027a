//! SWAR word scanning: 4 or 8 bytes per step using integer arithmetic.
//!
//! XOR-ing a word with the needle repeated in every lane turns matching lanes
//! into zero bytes. Two detectors then flag zero lanes by their top bit:
//!
//! - borrow test `(x - 0x01..) & !x & 0x80..`: cheap, and the lowest flagged
//!   lane is always a real zero. A lane directly above a zero that holds
//!   `0x01` is flagged too, because the borrow runs into it.
//! - carry-free test `!(((x & 0x7f..) + 0x7f..) | x | 0x7f..)`: no lane can
//!   affect another, so every flagged lane is a real zero.
//!
//! Words are always loaded in little-endian lane order, so the lowest set bit
//! belongs to the lowest address on every target.

use super::{block, BlockEngine, Buffer};

/// Word width for the SWAR kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WordSize {
    Four,
    Eight,
}

macro_rules! word_engine {
    ($(#[$doc:meta])* $name:ident, $word:ty, $width:literal) => {
        $(#[$doc])*
        pub(crate) struct $name;

        impl $name {
            const LO: $word = <$word>::from_ne_bytes([0x01; $width]);
            const HI: $word = <$word>::from_ne_bytes([0x80; $width]);
            const LOW7: $word = <$word>::from_ne_bytes([0x7f; $width]);
        }

        impl BlockEngine for $name {
            const WIDTH: usize = $width;
            const LANE_BITS: u32 = 8;

            type Splat = $word;
            type Block = $word;

            #[inline(always)]
            unsafe fn splat(byte: u8) -> $word {
                <$word>::from_ne_bytes([byte; $width])
            }

            #[inline(always)]
            unsafe fn load(ptr: *const u8) -> $word {
                <$word>::from_le(ptr.cast::<$word>().read())
            }

            #[inline(always)]
            unsafe fn first_match(block: $word, splat: $word) -> u64 {
                let x = block ^ splat;
                u64::from(x.wrapping_sub(Self::LO) & !x & Self::HI)
            }

            #[inline(always)]
            unsafe fn all_matches(block: $word, splat: $word) -> u64 {
                let x = block ^ splat;
                u64::from(!(((x & Self::LOW7) + Self::LOW7) | x | Self::LOW7))
            }
        }
    };
}

word_engine!(
    /// 32-bit words.
    Word4,
    u32,
    4
);
word_engine!(
    /// 64-bit words.
    Word8,
    u64,
    8
);

/// Masked-first-load word scan.
///
/// # Safety
/// `buf` is readable, and so is the aligned word around each of its bytes.
pub(crate) unsafe fn scan_word_aligned(buf: Buffer, needle: u8, size: WordSize) -> Option<usize> {
    match size {
        WordSize::Four => block::scan_masked::<Word4>(buf, needle),
        WordSize::Eight => block::scan_masked::<Word8>(buf, needle),
    }
}

/// Bytewise prologue, then aligned word scan.
///
/// # Safety
/// Same as [`scan_word_aligned`].
pub(crate) unsafe fn scan_word_prologued(
    buf: Buffer,
    needle: u8,
    size: WordSize,
) -> Option<usize> {
    match size {
        WordSize::Four => block::scan_prologued::<Word4>(buf, needle),
        WordSize::Eight => block::scan_prologued::<Word8>(buf, needle),
    }
}
