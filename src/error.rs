//! Error types for strategy selection.
//!
//! Scanning itself never fails: "not found" is an ordinary result. Errors only
//! arise when a searcher is built from a strategy that cannot run here, or when
//! a strategy name does not parse.
//!
//! ## Example
//!
//! ```rust
//! use bytescan::{ByteSearcher, ScanError, Strategy};
//!
//! match "vector16-masked".parse::<Strategy>() {
//!     Ok(strategy) => match ByteSearcher::with_strategy(b'*', strategy) {
//!         Ok(searcher) => assert_eq!(searcher.find(b"a*"), Some(1)),
//!         Err(ScanError::VectorUnavailable) => eprintln!("no SIMD on this target"),
//!         Err(e) => eprintln!("Error: {}", e),
//!     },
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;

use crate::strategy::Strategy;

/// Error type for building searchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The string does not name a known strategy.
    ///
    /// Valid names are `bytewise`, `stepped`, and `word4`, `word8` or
    /// `vector16` followed by `-prologued` or `-masked`.
    UnknownStrategy(String),

    /// The string does not name a pair method (`shift` or `rolling`).
    UnknownPairMethod(String),

    /// A vector kernel was requested but the target has no byte-compare
    /// and extract facility compiled in.
    VectorUnavailable,

    /// The strategy only exists for single-byte patterns.
    UnsupportedForPairs(Strategy),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStrategy(name) => write!(f, "Unknown scan strategy: {:?}", name),
            Self::UnknownPairMethod(name) => write!(f, "Unknown pair method: {:?}", name),
            Self::VectorUnavailable => {
                write!(f, "Vector kernel not available on this target")
            }
            Self::UnsupportedForPairs(strategy) => {
                write!(f, "Strategy {} cannot search for byte pairs", strategy)
            }
        }
    }
}

impl std::error::Error for ScanError {}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ScanError::UnknownStrategy("word3".into()).to_string(),
            "Unknown scan strategy: \"word3\""
        );
        assert_eq!(
            ScanError::UnsupportedForPairs(Strategy::Stepped).to_string(),
            "Strategy stepped cannot search for byte pairs"
        );
    }
}
