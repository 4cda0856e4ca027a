//! Logical length check for block scanners.
//!
//! Block scanners read whole aligned blocks and may see a match in the bytes
//! past the declared length. Every block path funnels its candidate through
//! [`clamp`] or [`clamp_pair`] before returning it.

/// Raw "not found" value returned by the `scan` entry points.
///
/// Negative, so no index of any slice can collide with it.
pub const NOT_FOUND: isize = -127;

/// Accept a single-byte candidate only if it lies inside `len`.
#[inline(always)]
pub const fn clamp(candidate: usize, len: usize) -> Option<usize> {
    if candidate < len {
        Some(candidate)
    } else {
        None
    }
}

/// Accept a pair candidate only if both bytes lie inside `len`.
#[inline(always)]
pub const fn clamp_pair(candidate: usize, len: usize) -> Option<usize> {
    if len >= 2 && candidate < len - 1 {
        Some(candidate)
    } else {
        None
    }
}

/// Encode a result for the raw interface.
#[inline]
pub const fn to_sentinel(result: Option<usize>) -> isize {
    match result {
        Some(index) => index as isize,
        None => NOT_FOUND,
    }
}

/// Decode a raw result.
#[inline]
pub const fn from_sentinel(raw: isize) -> Option<usize> {
    if raw < 0 {
        None
    } else {
        Some(raw as usize)
    }
}
