//! Public searchers.
//!
//! A searcher fixes its pattern and strategy at construction. Calls then go
//! straight to the chosen kernel.

use crate::error::Result;
use crate::guard;
use crate::scan::{self, Buffer};
use crate::strategy::{Capabilities, PairMethod, SearchOptions, SizeHint, Strategy};

/// Finds the first occurrence of one byte.
///
/// # Example
///
/// ```rust
/// use bytescan::ByteSearcher;
///
/// let star = ByteSearcher::new(b'*');
/// let text = b"Now is the time *# for all good men";
/// assert_eq!(star.find(text), Some(16));
/// assert_eq!(star.find(&text[..16]), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSearcher {
    needle: u8,
    strategy: Strategy,
}

impl ByteSearcher {
    /// Searcher with the default strategy for this target.
    pub fn new(needle: u8) -> Self {
        Self::selected(needle, SizeHint::Unknown)
    }

    fn selected(needle: u8, hint: SizeHint) -> Self {
        Self {
            needle,
            strategy: Strategy::select(Capabilities::detect(), hint),
        }
    }

    /// Searcher configured by `opts`.
    pub fn with_options(needle: u8, opts: &SearchOptions) -> Result<Self> {
        let strategy = opts.resolve(Capabilities::detect())?;
        log::debug!("byte searcher {:#04x}: {}", needle, strategy);
        Ok(Self { needle, strategy })
    }

    /// Searcher pinned to `strategy`.
    pub fn with_strategy(needle: u8, strategy: Strategy) -> Result<Self> {
        Self::with_options(
            needle,
            &SearchOptions {
                strategy: Some(strategy),
                ..Default::default()
            },
        )
    }

    /// The byte searched for.
    pub fn needle(&self) -> u8 {
        self.needle
    }

    /// Scanner in use.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Index of the first `needle` in `haystack`.
    #[inline]
    pub fn find(&self, haystack: &[u8]) -> Option<usize> {
        // SAFETY: the slice is readable. Block loads stay inside aligned
        // blocks that contain a byte of the slice, so they stay on its pages.
        unsafe { scan::find_byte(Buffer::from_slice(haystack), self.needle, self.strategy) }
    }

    /// [`find`](Self::find) over raw memory.
    ///
    /// # Safety
    /// `ptr..ptr + len` must be readable for the duration of the call.
    /// Bytes outside that range may be read, but only inside aligned blocks
    /// of at most 16 bytes that also contain a byte of the range.
    #[inline]
    pub unsafe fn find_raw(&self, ptr: *const u8, len: usize) -> Option<usize> {
        scan::find_byte(Buffer::from_raw(ptr, len), self.needle, self.strategy)
    }

    /// Raw interface: index of the first match, or [`NOT_FOUND`](crate::NOT_FOUND).
    ///
    /// # Safety
    /// Same as [`find_raw`](Self::find_raw).
    #[inline]
    pub unsafe fn scan(&self, ptr: *const u8, len: usize) -> isize {
        guard::to_sentinel(self.find_raw(ptr, len))
    }
}

/// Finds the first occurrence of two adjacent bytes.
///
/// # Example
///
/// ```rust
/// use bytescan::PairSearcher;
///
/// let marker = PairSearcher::new(b'*', b'#');
/// assert_eq!(marker.find(b"Now is the time *# for all good men"), Some(16));
/// assert_eq!(marker.find(b"a*#"), Some(1));
/// assert_eq!(marker.find(&b"a*#"[..1]), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSearcher {
    first: u8,
    second: u8,
    strategy: Strategy,
    method: PairMethod,
}

impl PairSearcher {
    /// Searcher with the default strategy for this target.
    pub fn new(first: u8, second: u8) -> Self {
        Self::selected(first, second, SizeHint::Unknown)
    }

    fn selected(first: u8, second: u8, hint: SizeHint) -> Self {
        Self {
            first,
            second,
            strategy: Strategy::select_pair(Capabilities::detect(), hint),
            method: PairMethod::default(),
        }
    }

    /// Searcher configured by `opts`.
    pub fn with_options(first: u8, second: u8, opts: &SearchOptions) -> Result<Self> {
        let strategy = opts.resolve_pair(Capabilities::detect())?;
        log::debug!(
            "pair searcher {:#04x}{:02x}: {} ({})",
            first,
            second,
            strategy,
            opts.pair_method
        );
        Ok(Self {
            first,
            second,
            strategy,
            method: opts.pair_method,
        })
    }

    /// Searcher pinned to `strategy` and `method`.
    pub fn with_strategy(
        first: u8,
        second: u8,
        strategy: Strategy,
        method: PairMethod,
    ) -> Result<Self> {
        Self::with_options(
            first,
            second,
            &SearchOptions {
                strategy: Some(strategy),
                pair_method: method,
                ..Default::default()
            },
        )
    }

    /// The pair searched for, first byte first.
    pub fn bytes(&self) -> (u8, u8) {
        (self.first, self.second)
    }

    /// Scanner in use.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Cross-block carry in use.
    pub fn method(&self) -> PairMethod {
        self.method
    }

    /// Index of the first `first, second` pair in `haystack`.
    #[inline]
    pub fn find(&self, haystack: &[u8]) -> Option<usize> {
        // SAFETY: see `ByteSearcher::find`
        unsafe { self.find_raw(haystack.as_ptr(), haystack.len()) }
    }

    /// [`find`](Self::find) over raw memory.
    ///
    /// # Safety
    /// Same as [`ByteSearcher::find_raw`].
    #[inline]
    pub unsafe fn find_raw(&self, ptr: *const u8, len: usize) -> Option<usize> {
        scan::find_pair(
            Buffer::from_raw(ptr, len),
            self.first,
            self.second,
            self.strategy,
            self.method,
        )
    }

    /// Raw interface: index of the first pair, or [`NOT_FOUND`](crate::NOT_FOUND).
    ///
    /// # Safety
    /// Same as [`ByteSearcher::find_raw`].
    #[inline]
    pub unsafe fn scan(&self, ptr: *const u8, len: usize) -> isize {
        guard::to_sentinel(self.find_raw(ptr, len))
    }
}

/// Index of the first `needle` in `haystack`, with a strategy picked for the
/// haystack's length.
#[inline]
pub fn find_byte(haystack: &[u8], needle: u8) -> Option<usize> {
    ByteSearcher::selected(needle, SizeHint::for_len(haystack.len())).find(haystack)
}

/// Index of the first `first, second` pair in `haystack`, with a strategy
/// picked for the haystack's length.
#[inline]
pub fn find_pair(haystack: &[u8], first: u8, second: u8) -> Option<usize> {
    PairSearcher::selected(first, second, SizeHint::for_len(haystack.len())).find(haystack)
}
