//! Over-read safety against real page boundaries.
//!
//! Buffers are placed flush against inaccessible guard pages, so any load
//! that leaves the aligned blocks around the buffer faults the test.

#![cfg(unix)]

use bytescan::{
    scan_linear, ByteSearcher, Capabilities, PairMethod, PairSearcher, Pattern, Strategy,
};

/// Three pages: guard, data, guard.
struct GuardedPage {
    base: *mut u8,
    page: usize,
}

impl GuardedPage {
    fn new() -> Self {
        // SAFETY: plain anonymous mapping and protection changes on memory we own
        unsafe {
            let page = usize::try_from(libc::sysconf(libc::_SC_PAGESIZE)).unwrap();
            let base = libc::mmap(
                std::ptr::null_mut(),
                page * 3,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANON,
                -1,
                0,
            );
            assert_ne!(base, libc::MAP_FAILED, "mmap failed");
            let base = base.cast::<u8>();
            assert_eq!(libc::mprotect(base.cast(), page, libc::PROT_NONE), 0);
            assert_eq!(
                libc::mprotect(base.add(page * 2).cast(), page, libc::PROT_NONE),
                0
            );
            Self { base, page }
        }
    }

    fn data(&mut self) -> &mut [u8] {
        // SAFETY: the middle page is mapped read/write
        unsafe { std::slice::from_raw_parts_mut(self.base.add(self.page), self.page) }
    }
}

impl Drop for GuardedPage {
    fn drop(&mut self) {
        // SAFETY: unmapping the mapping created in `new`
        unsafe {
            libc::munmap(self.base.cast(), self.page * 3);
        }
    }
}

fn strategies() -> Vec<Strategy> {
    Strategy::available(Capabilities::detect()).collect()
}

fn check_all(hay: &[u8]) {
    let expect = scan_linear(hay, Pattern::Byte(b'*'));
    let expect_pair = scan_linear(hay, Pattern::Pair(b'*', b'#'));
    for strategy in strategies() {
        let byte = ByteSearcher::with_strategy(b'*', strategy).unwrap();
        assert_eq!(byte.find(hay), expect, "{strategy} len {}", hay.len());
        if strategy.supports_pairs() {
            for method in [PairMethod::ShiftCombine, PairMethod::Rolling] {
                let pair = PairSearcher::with_strategy(b'*', b'#', strategy, method).unwrap();
                assert_eq!(pair.find(hay), expect_pair, "{strategy}/{method} len {}", hay.len());
            }
        }
    }
}

#[test]
fn test_buffer_at_page_start() {
    let mut guarded = GuardedPage::new();
    let data = guarded.data();
    data.fill(b'a');
    for len in 0..40 {
        check_all(&data[..len]);
        for pos in 0..len {
            data[pos] = b'*';
            if pos + 1 < len {
                data[pos + 1] = b'#';
            }
            check_all(&data[..len]);
            data[pos] = b'a';
            data[pos + 1] = b'a';
        }
    }
}

#[test]
fn test_buffer_at_page_end() {
    let mut guarded = GuardedPage::new();
    let page = guarded.page;
    let data = guarded.data();
    data.fill(b'a');
    for len in 0..40 {
        let start = page - len;
        check_all(&data[start..]);
        for pos in start..page {
            data[pos] = b'*';
            if pos + 1 < page {
                data[pos + 1] = b'#';
            }
            check_all(&data[start..]);
            data[pos] = b'a';
            if pos + 1 < page {
                data[pos + 1] = b'a';
            }
        }
    }
}

#[test]
fn test_no_match_spans_whole_page() {
    let mut guarded = GuardedPage::new();
    let data = guarded.data();
    data.fill(b'*');
    // Every start offset within one vector block, up to the last byte.
    for start in 0..16 {
        check_all(&data[start..]);
        data[start] = b'a';
    }
    data.fill(b'a');
    for start in 0..16 {
        check_all(&data[start..]);
    }
}
