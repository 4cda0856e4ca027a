//! Generic single-byte block loops shared by the word and vector kernels.

use super::bytewise::{scan_prologue, Prologue};
use super::{BlockEngine, Buffer, Pattern};
use crate::align::Alignment;
use crate::guard;

/// Aligned loads only; the first block's leading lanes are masked.
///
/// # Safety
/// `buf` is readable, and so is the aligned block around each of its bytes.
#[inline(always)]
pub(crate) unsafe fn scan_masked<E: BlockEngine>(buf: Buffer, needle: u8) -> Option<usize> {
    if buf.len == 0 {
        return None;
    }
    let splat = E::splat(needle);
    let align = Alignment::compute(buf.ptr as usize, E::WIDTH);
    let len = buf.len as isize;

    // Logical index of the current block's lane 0. Negative for a misaligned
    // first block.
    let mut base = -(align.misalignment as isize);
    // Lanes before the start must not borrow into valid lanes, so the first
    // block uses the exact detector before masking.
    let mut hits = E::all_matches(E::load(buf.block(base)), splat)
        & E::lane_mask(align.first_block_valid_mask);
    loop {
        if hits != 0 {
            return guard::clamp((base + E::lowest_lane(hits) as isize) as usize, buf.len);
        }
        base += E::WIDTH as isize;
        if base >= len {
            return None;
        }
        hits = E::first_match(E::load(buf.block(base)), splat);
    }
}

/// Bytewise up to the first `E::WIDTH` boundary, then aligned loads.
///
/// # Safety
/// Same as [`scan_masked`].
#[inline(always)]
pub(crate) unsafe fn scan_prologued<E: BlockEngine>(buf: Buffer, needle: u8) -> Option<usize> {
    match scan_prologue(buf, Pattern::Byte(needle), 0, E::WIDTH) {
        Prologue::Found(i) => Some(i),
        Prologue::Exhausted => None,
        Prologue::Aligned(start) => scan_aligned_from::<E>(buf, needle, start),
    }
}

/// Aligned loop starting at `start`, whose address is a multiple of
/// `E::WIDTH`.
///
/// # Safety
/// Same as [`scan_masked`].
#[inline(always)]
pub(crate) unsafe fn scan_aligned_from<E: BlockEngine>(
    buf: Buffer,
    needle: u8,
    start: usize,
) -> Option<usize> {
    let splat = E::splat(needle);
    let mut base = start;
    while base < buf.len {
        let hits = E::first_match(E::load(buf.ptr.add(base)), splat);
        if hits != 0 {
            return guard::clamp(base + E::lowest_lane(hits), buf.len);
        }
        base += E::WIDTH;
    }
    None
}

/// Bytewise to a `W` boundary, `W` blocks up to a `V` boundary, then `V`
/// blocks. `V::WIDTH` must be a multiple of `W::WIDTH`.
///
/// # Safety
/// Same as [`scan_masked`].
#[inline(always)]
pub(crate) unsafe fn scan_stepped<W: BlockEngine, V: BlockEngine>(
    buf: Buffer,
    needle: u8,
) -> Option<usize> {
    let mut base = match scan_prologue(buf, Pattern::Byte(needle), 0, W::WIDTH) {
        Prologue::Found(i) => return Some(i),
        Prologue::Exhausted => return None,
        Prologue::Aligned(i) => i,
    };
    let splat = W::splat(needle);
    while base < buf.len && !Alignment::is_aligned(buf.address(base), V::WIDTH) {
        let hits = W::first_match(W::load(buf.ptr.add(base)), splat);
        if hits != 0 {
            return guard::clamp(base + W::lowest_lane(hits), buf.len);
        }
        base += W::WIDTH;
    }
    scan_aligned_from::<V>(buf, needle, base)
}
