//! 16-byte vector scanning.
//!
//! Compare all 16 lanes against the splatted needle in one instruction, then
//! pack the per-lane results into an integer:
//!
//! - x86/x86_64 (SSE2): `pcmpeqb` + `pmovmskb`, one bit per lane.
//! - aarch64 (NEON): `cmeq` + `shrn #4`, four bits per lane.
//!
//! On other targets [`Native`] is the 8-byte word kernel and [`AVAILABLE`] is
//! false, so strategy checks reject vector strategies before any scan runs.

use super::{block, swar, BlockEngine, Buffer};

/// Whether a 16-byte compare-and-extract kernel is compiled in.
pub const AVAILABLE: bool = cfg!(any(
    target_arch = "x86_64",
    all(target_arch = "x86", target_feature = "sse2"),
    all(target_arch = "aarch64", target_feature = "neon"),
));

/// SSE2 implementation, guaranteed available on x86_64.
#[cfg(any(target_arch = "x86_64", all(target_arch = "x86", target_feature = "sse2")))]
mod sse2 {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::{
        __m128i, _mm_cmpeq_epi8, _mm_load_si128, _mm_movemask_epi8, _mm_set1_epi8,
    };
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::{
        __m128i, _mm_cmpeq_epi8, _mm_load_si128, _mm_movemask_epi8, _mm_set1_epi8,
    };

    use crate::scan::BlockEngine;

    pub(crate) struct Sse2;

    impl BlockEngine for Sse2 {
        const WIDTH: usize = 16;
        const LANE_BITS: u32 = 1;

        type Splat = __m128i;
        type Block = __m128i;

        #[inline(always)]
        unsafe fn splat(byte: u8) -> __m128i {
            _mm_set1_epi8(byte as i8)
        }

        #[inline(always)]
        unsafe fn load(ptr: *const u8) -> __m128i {
            _mm_load_si128(ptr.cast::<__m128i>())
        }

        #[inline(always)]
        unsafe fn first_match(block: __m128i, splat: __m128i) -> u64 {
            u64::from(_mm_movemask_epi8(_mm_cmpeq_epi8(block, splat)) as u16)
        }

        #[inline(always)]
        unsafe fn all_matches(block: __m128i, splat: __m128i) -> u64 {
            Self::first_match(block, splat)
        }

        #[inline(always)]
        fn lane_mask(lanes: u32) -> u64 {
            u64::from(lanes & 0xffff)
        }
    }
}

/// NEON implementation. NEON has no movemask; narrowing the compare result
/// by 4 bits leaves one nibble per lane in a `u64`.
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon {
    use core::arch::aarch64::{
        uint8x16_t, vceqq_u8, vdupq_n_u8, vget_lane_u64, vld1q_u8, vreinterpret_u64_u8,
        vreinterpretq_u16_u8, vshrn_n_u16,
    };

    use crate::scan::BlockEngine;

    pub(crate) struct Neon;

    impl BlockEngine for Neon {
        const WIDTH: usize = 16;
        const LANE_BITS: u32 = 4;

        type Splat = uint8x16_t;
        type Block = uint8x16_t;

        #[inline(always)]
        unsafe fn splat(byte: u8) -> uint8x16_t {
            vdupq_n_u8(byte)
        }

        #[inline(always)]
        unsafe fn load(ptr: *const u8) -> uint8x16_t {
            vld1q_u8(ptr)
        }

        #[inline(always)]
        unsafe fn first_match(block: uint8x16_t, splat: uint8x16_t) -> u64 {
            let eq = vceqq_u8(block, splat);
            let nibbles = vshrn_n_u16(vreinterpretq_u16_u8(eq), 4);
            vget_lane_u64(vreinterpret_u64_u8(nibbles), 0)
        }

        #[inline(always)]
        unsafe fn all_matches(block: uint8x16_t, splat: uint8x16_t) -> u64 {
            Self::first_match(block, splat)
        }
    }
}

#[cfg(any(target_arch = "x86_64", all(target_arch = "x86", target_feature = "sse2")))]
pub(crate) use sse2::Sse2 as Native;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub(crate) use neon::Neon as Native;

#[cfg(not(any(
    target_arch = "x86_64",
    all(target_arch = "x86", target_feature = "sse2"),
    all(target_arch = "aarch64", target_feature = "neon"),
)))]
pub(crate) use swar::Word8 as Native;

/// Masked-first-load vector scan.
///
/// # Safety
/// `buf` is readable, and so is the aligned 16-byte block around each of its
/// bytes.
pub(crate) unsafe fn scan_vector_aligned(buf: Buffer, needle: u8) -> Option<usize> {
    block::scan_masked::<Native>(buf, needle)
}

/// Bytewise prologue, then aligned vector scan.
///
/// # Safety
/// Same as [`scan_vector_aligned`].
pub(crate) unsafe fn scan_vector_prologued(buf: Buffer, needle: u8) -> Option<usize> {
    block::scan_prologued::<Native>(buf, needle)
}

/// Bytewise to 4-byte alignment, 4-byte words to 16-byte alignment, then
/// vector blocks.
///
/// # Safety
/// Same as [`scan_vector_aligned`].
pub(crate) unsafe fn scan_stepped(buf: Buffer, needle: u8) -> Option<usize> {
    block::scan_stepped::<swar::Word4, Native>(buf, needle)
}
