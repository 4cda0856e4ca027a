//! Adjacent byte pair scanning on top of the block engines.
//!
//! Per block, the first-byte mask moved up one lane and ANDed with the
//! second-byte mask marks every in-block pair by its second byte. A pair whose
//! first byte is the top lane of one block and whose second byte is lane 0 of
//! the next is invisible to that AND, so one lane of state crosses each block
//! boundary:
//!
//! - [`PairMethod::ShiftCombine`] keeps the previous top-lane bit as a flag
//!   and tests it against lane 0 before the in-block AND.
//! - [`PairMethod::Rolling`] keeps first-byte hits in a wider register, adds
//!   each new mask one lane up, and shifts the register down one block per
//!   step, so the top lane lands on the next block's lane 0 by itself.
//!
//! Both use the carry-free detector: a borrow false positive in the first
//! mask would pair up with a real second byte.

use super::bytewise::{scan_prologue, Prologue};
use super::{BlockEngine, Buffer, Pattern};
use crate::align::Alignment;
use crate::guard;
use crate::strategy::{Entry, PairMethod};

/// First `i` with `first` at `i` and `second` at `i + 1`, both inside `buf`.
///
/// # Safety
/// `buf` is readable, and so is the aligned block around each of its bytes.
#[inline(always)]
pub(crate) unsafe fn scan_pair<E: BlockEngine>(
    buf: Buffer,
    first: u8,
    second: u8,
    entry: Entry,
    method: PairMethod,
) -> Option<usize> {
    if buf.len < 2 {
        return None;
    }
    let (base, first_valid) = match entry {
        Entry::Masked => {
            let align = Alignment::compute(buf.ptr as usize, E::WIDTH);
            (
                -(align.misalignment as isize),
                E::lane_mask(align.first_block_valid_mask),
            )
        }
        Entry::Prologued => {
            match scan_prologue(buf, Pattern::Pair(first, second), 0, E::WIDTH) {
                Prologue::Found(i) => return Some(i),
                Prologue::Exhausted => return None,
                // The prologue already tested the pair ending at `i`, so
                // nothing needs to be carried into the first block.
                Prologue::Aligned(i) => (i as isize, u64::MAX),
            }
        }
    };
    match method {
        PairMethod::ShiftCombine => shift_combine::<E>(buf, first, second, base, first_valid),
        PairMethod::Rolling => rolling::<E>(buf, first, second, base, first_valid),
    }
}

#[inline(always)]
unsafe fn shift_combine<E: BlockEngine>(
    buf: Buffer,
    first: u8,
    second: u8,
    mut base: isize,
    mut valid: u64,
) -> Option<usize> {
    let s1 = E::splat(first);
    let s2 = E::splat(second);
    let len = buf.len as isize;
    let mut carry = false;

    while base < len {
        let block = E::load(buf.block(base));
        let firsts = E::all_matches(block, s1) & valid;
        let seconds = E::all_matches(block, s2);

        if carry && seconds & E::LANE0 != 0 {
            return guard::clamp_pair((base - 1) as usize, buf.len);
        }
        let combined = (firsts << E::LANE_BITS) & seconds;
        if combined != 0 {
            let candidate = base + E::lowest_lane(combined) as isize - 1;
            return guard::clamp_pair(candidate as usize, buf.len);
        }

        carry = firsts >> E::TOP_LANE_SHIFT != 0;
        valid = u64::MAX;
        base += E::WIDTH as isize;
    }
    None
}

#[inline(always)]
unsafe fn rolling<E: BlockEngine>(
    buf: Buffer,
    first: u8,
    second: u8,
    mut base: isize,
    mut valid: u64,
) -> Option<usize> {
    let s1 = E::splat(first);
    let s2 = E::splat(second);
    let len = buf.len as isize;
    // Wide enough to hold a full 64-bit mask shifted up one lane.
    let mut pending: u128 = 0;

    while base < len {
        let block = E::load(buf.block(base));
        // The bits left over from the previous block sit below lane 1, and
        // the shifted new mask starts at lane 1, so the add never carries.
        pending += u128::from(E::all_matches(block, s1) & valid) << E::LANE_BITS;
        let combined = pending & u128::from(E::all_matches(block, s2));
        if combined != 0 {
            let lane = (combined.trailing_zeros() / E::LANE_BITS) as isize;
            return guard::clamp_pair((base + lane - 1) as usize, buf.len);
        }

        pending >>= E::BLOCK_BITS;
        valid = u64::MAX;
        base += E::WIDTH as isize;
    }
    None
}
