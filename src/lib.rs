//! Length-bounded byte and byte-pair search.
//!
//! Finds the first occurrence of a byte, or of two adjacent bytes, in a
//! buffer with an explicit length. Zero bytes are ordinary data.
//!
//! The fast scanners read memory in aligned blocks of 4, 8 or 16 bytes and
//! may touch bytes just before or after the buffer, inside the same aligned
//! block. Those reads never cross a page boundary, and their contents never
//! reach a result.
//!
//! ## Usage
//!
//! ```rust
//! use bytescan::{find_byte, find_pair};
//!
//! let text = b"Now is the time *# for all good men";
//! assert_eq!(find_byte(text, b'*'), Some(16));
//! assert_eq!(find_pair(text, b'*', b'#'), Some(16));
//! assert_eq!(find_pair(&text[..17], b'*', b'#'), None);
//! ```
//!
//! Reusable searchers pick their scanner once:
//!
//! ```rust
//! use bytescan::{PairMethod, PairSearcher, SearchOptions, Strategy, Kernel};
//!
//! let opts = SearchOptions {
//!     strategy: Some(Strategy::masked(Kernel::Word8)),
//!     pair_method: PairMethod::ShiftCombine,
//!     ..Default::default()
//! };
//! let marker = PairSearcher::with_options(b'*', b'#', &opts)?;
//! assert_eq!(marker.find(b"a*#"), Some(1));
//! # Ok::<(), bytescan::ScanError>(())
//! ```
//!
//! ## Features
//! - One runtime dependency (`log`)
//! - SSE2 on x86/x86_64, NEON on aarch64, portable word kernels everywhere

// Note: unsafe_code = "allow" in Cargo.toml; the scan kernels need raw loads.
// Every unsafe block carries a SAFETY comment.

mod align;
pub mod error;
mod guard;
mod scan;
mod search;
pub mod strategy;

pub use align::Alignment;
pub use error::{Result, ScanError};
pub use guard::{from_sentinel, to_sentinel, NOT_FOUND};
pub use scan::{scan_linear, Pattern};
pub use search::{find_byte, find_pair, ByteSearcher, PairSearcher};
pub use strategy::{
    Capabilities, Entry, Kernel, PairMethod, SearchOptions, SizeHint, Strategy,
};
