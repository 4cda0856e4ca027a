//! Byte-at-a-time scanning.
//!
//! Used as the prologue of block scanners and as the oracle every other
//! strategy is tested against.

use super::{Buffer, Pattern};
use crate::align::Alignment;

/// Outcome of a prologue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Prologue {
    /// The pattern occurs at this index.
    Found(usize),
    /// No match before this index, which sits on the alignment boundary.
    Aligned(usize),
    /// The buffer ended before the boundary without a match.
    Exhausted,
}

/// First index at which `pattern` occurs in `haystack`.
///
/// # Example
///
/// ```rust
/// use bytescan::{scan_linear, Pattern};
///
/// let text = b"Now is the time *# for all good men";
/// assert_eq!(scan_linear(text, Pattern::Byte(b'*')), Some(16));
/// assert_eq!(scan_linear(text, Pattern::Pair(b'*', b'#')), Some(16));
/// assert_eq!(scan_linear(&text[..16], Pattern::Byte(b'*')), None);
/// ```
pub fn scan_linear(haystack: &[u8], pattern: Pattern) -> Option<usize> {
    match pattern {
        Pattern::Byte(b) => haystack.iter().position(|&x| x == b),
        Pattern::Pair(a, b) => haystack.windows(2).position(|w| w[0] == a && w[1] == b),
    }
}

/// [`scan_linear`] over a raw buffer.
///
/// # Safety
/// `buf` is readable.
pub(crate) unsafe fn scan_buffer(buf: Buffer, pattern: Pattern) -> Option<usize> {
    let end = (buf.len + 1).saturating_sub(pattern.span());
    (0..end).find(|&i| pattern.matches_at(buf, i))
}

/// Compare positions from `start` until the address of the current position
/// is a multiple of `boundary`.
///
/// Only positions where the whole pattern fits inside `buf` are compared, so
/// nothing outside the buffer is read.
///
/// # Safety
/// `buf` is readable.
#[inline]
pub(crate) unsafe fn scan_prologue(
    buf: Buffer,
    pattern: Pattern,
    start: usize,
    boundary: usize,
) -> Prologue {
    let end = (buf.len + 1).saturating_sub(pattern.span());
    let mut i = start;
    while i < end {
        if Alignment::is_aligned(buf.address(i), boundary) {
            return Prologue::Aligned(i);
        }
        if pattern.matches_at(buf, i) {
            return Prologue::Found(i);
        }
        i += 1;
    }
    Prologue::Exhausted
}
