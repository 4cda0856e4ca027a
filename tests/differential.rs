//! Property-based agreement tests
//!
//! Every available strategy and pair method must return exactly what the
//! byte-at-a-time reference returns, for arbitrary contents, start offsets
//! and lengths. Haystacks are biased toward bytes that trip up arithmetic
//! zero-byte detection: the target itself, the target with one bit flipped,
//! and values one or two away.

use bytescan::{
    scan_linear, ByteSearcher, Capabilities, PairMethod, PairSearcher, Pattern,
    Strategy as ScanStrategy,
};
use proptest::prelude::*;

// =============================================================================
// PROPERTY TEST GENERATORS
// =============================================================================

const ARENA: usize = 256;
/// Room kept free on both sides so every aligned block touched stays inside
/// the arena.
const MARGIN: usize = 16;

#[repr(align(64))]
struct Arena([u8; ARENA]);

/// A byte that is often the target or a near miss of it.
fn near_miss(target: u8) -> impl Strategy<Value = u8> {
    prop_oneof![
        3 => Just(target),
        2 => Just(target ^ 0x80),
        2 => Just(target ^ 0x01),
        1 => Just(target.wrapping_add(1)),
        1 => Just(target.wrapping_sub(1)),
        1 => Just(target.wrapping_add(2)),
        4 => any::<u8>(),
    ]
}

/// (contents, start, len) with `start..start + len` inside the margins.
fn haystack(target: u8) -> impl Strategy<Value = (Vec<u8>, usize, usize)> {
    (MARGIN..MARGIN + 16)
        .prop_flat_map(move |start| {
            let max_len = ARENA - MARGIN - start;
            (
                prop::collection::vec(near_miss(target), ARENA),
                Just(start),
                0..=max_len,
            )
        })
}

/// Sparse haystacks: mostly one filler byte with a few planted targets.
fn sparse(first: u8, second: u8) -> impl Strategy<Value = (Vec<u8>, usize, usize)> {
    (
        any::<u8>(),
        prop::collection::vec((0..ARENA, prop::bool::ANY), 0..6),
        MARGIN..MARGIN + 16,
    )
        .prop_flat_map(move |(filler, plants, start)| {
            let mut bytes = vec![filler; ARENA];
            for (pos, whole) in plants {
                bytes[pos] = first;
                if whole && pos + 1 < ARENA {
                    bytes[pos + 1] = second;
                }
            }
            (Just(bytes), Just(start), 0..=ARENA - MARGIN - start)
        })
}

fn arena(bytes: &[u8]) -> Box<Arena> {
    let mut arena = Box::new(Arena([0; ARENA]));
    arena.0.copy_from_slice(bytes);
    arena
}

fn strategies() -> Vec<ScanStrategy> {
    ScanStrategy::available(Capabilities::detect()).collect()
}

fn check_byte(bytes: &[u8], start: usize, len: usize, needle: u8) -> Result<(), TestCaseError> {
    let arena = arena(bytes);
    let hay = &arena.0[start..start + len];
    let expect = scan_linear(hay, Pattern::Byte(needle));
    for strategy in strategies() {
        let searcher = ByteSearcher::with_strategy(needle, strategy).unwrap();
        prop_assert_eq!(searcher.find(hay), expect, "{} start {} len {}", strategy, start, len);
    }
    prop_assert_eq!(bytescan::find_byte(hay, needle), expect);
    Ok(())
}

fn check_pair(
    bytes: &[u8],
    start: usize,
    len: usize,
    first: u8,
    second: u8,
) -> Result<(), TestCaseError> {
    let arena = arena(bytes);
    let hay = &arena.0[start..start + len];
    let expect = scan_linear(hay, Pattern::Pair(first, second));
    for strategy in strategies().into_iter().filter(|s| s.supports_pairs()) {
        for method in [PairMethod::ShiftCombine, PairMethod::Rolling] {
            let searcher = PairSearcher::with_strategy(first, second, strategy, method).unwrap();
            prop_assert_eq!(
                searcher.find(hay),
                expect,
                "{}/{} start {} len {}",
                strategy,
                method,
                start,
                len
            );
        }
    }
    prop_assert_eq!(bytescan::find_pair(hay, first, second), expect);
    Ok(())
}

// =============================================================================
// SINGLE BYTE
// =============================================================================

proptest! {
    #[test]
    fn prop_byte_matches_reference(
        needle in any::<u8>(),
        (bytes, start, len) in any::<u8>().prop_flat_map(haystack),
    ) {
        check_byte(&bytes, start, len, needle)?;
    }

    #[test]
    fn prop_byte_near_miss_haystacks(
        (needle, (bytes, start, len)) in any::<u8>().prop_flat_map(|t| (Just(t), haystack(t))),
    ) {
        check_byte(&bytes, start, len, needle)?;
    }

    #[test]
    fn prop_byte_sparse(
        (needle, (bytes, start, len)) in any::<u8>().prop_flat_map(|t| (Just(t), sparse(t, t))),
    ) {
        check_byte(&bytes, start, len, needle)?;
    }
}

// =============================================================================
// BYTE PAIRS
// =============================================================================

proptest! {
    #[test]
    fn prop_pair_near_miss_haystacks(
        ((first, second), (bytes, start, len)) in (any::<u8>(), any::<u8>())
            .prop_flat_map(|(a, b)| {
                // Mix near misses of both bytes.
                let hay = prop_oneof![haystack(a), haystack(b)];
                (Just((a, b)), hay)
            }),
    ) {
        check_pair(&bytes, start, len, first, second)?;
    }

    #[test]
    fn prop_pair_sparse(
        ((first, second), (bytes, start, len)) in (any::<u8>(), any::<u8>())
            .prop_flat_map(|(a, b)| (Just((a, b)), sparse(a, b))),
    ) {
        check_pair(&bytes, start, len, first, second)?;
    }

    #[test]
    fn prop_pair_two_symbol_alphabet(
        bits in prop::collection::vec(prop::bool::ANY, ARENA),
        start in MARGIN..MARGIN + 16,
        len in 0..ARENA - 2 * MARGIN - 16,
    ) {
        // Only '*' and '#': pairs, lone first bytes and reversed pairs everywhere.
        let bytes: Vec<u8> = bits.iter().map(|&b| if b { b'*' } else { b'#' }).collect();
        check_pair(&bytes, start, len, b'*', b'#')?;
        check_pair(&bytes, start, len, b'#', b'*')?;
        check_pair(&bytes, start, len, b'*', b'*')?;
    }
}

// =============================================================================
// RAW INTERFACE
// =============================================================================

proptest! {
    #[test]
    fn prop_raw_sentinel_agrees(
        (needle, (bytes, start, len)) in any::<u8>().prop_flat_map(|t| (Just(t), haystack(t))),
    ) {
        let arena = arena(&bytes);
        let hay = &arena.0[start..start + len];
        let searcher = ByteSearcher::new(needle);
        // SAFETY: pointer and length come from a live slice
        let raw = unsafe { searcher.scan(hay.as_ptr(), hay.len()) };
        prop_assert_eq!(bytescan::from_sentinel(raw), searcher.find(hay));
        if searcher.find(hay).is_none() {
            prop_assert_eq!(raw, bytescan::NOT_FOUND);
        }
    }
}
