//! Strategy selection.
//!
//! Every scanner in this crate satisfies the same contract, so picking one is
//! purely a performance decision. It is made once: [`Capabilities::detect`]
//! probes the target, [`Strategy::select`] turns that plus a [`SizeHint`] into
//! a concrete [`Strategy`], and searchers carry the result around. Nothing on
//! the scan path branches on hardware features.
//!
//! ## Strategies
//!
//! | Name | Loads | Before the first aligned block |
//! |------|-------|--------------------------------|
//! | `bytewise` | 1 byte | nothing to align |
//! | `word4-prologued` / `word4-masked` | aligned `u32` | byte loop / lane mask |
//! | `word8-prologued` / `word8-masked` | aligned `u64` | byte loop / lane mask |
//! | `vector16-prologued` / `vector16-masked` | aligned 16 bytes | byte loop / lane mask |
//! | `stepped` | `u32`, then 16 bytes | byte loop (single bytes only) |

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{Result, ScanError};
use crate::scan::vector;

/// Block kernel used by the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// 4-byte word with the arithmetic zero-byte trick.
    Word4,
    /// 8-byte word with the arithmetic zero-byte trick.
    Word8,
    /// 16-byte hardware compare and extract.
    Vector16,
}

impl Kernel {
    /// Bytes per aligned load.
    pub const fn width(self) -> usize {
        match self {
            Self::Word4 => 4,
            Self::Word8 => 8,
            Self::Vector16 => 16,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Word4 => "word4",
            Self::Word8 => "word8",
            Self::Vector16 => "vector16",
        }
    }
}

/// How a block scanner gets from an arbitrary start address to its first
/// aligned block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entry {
    /// Compare bytes one at a time until the address is aligned.
    Prologued,
    /// Load the enclosing aligned block and mask off the lanes before the start.
    Masked,
}

impl Entry {
    const fn name(self) -> &'static str {
        match self {
            Self::Prologued => "prologued",
            Self::Masked => "masked",
        }
    }
}

/// A concrete scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One byte at a time. Never reads outside the buffer.
    Bytewise,
    /// Aligned block loop over a kernel.
    Block {
        /// Block kernel.
        kernel: Kernel,
        /// Entry into the aligned loop.
        entry: Entry,
    },
    /// Byte prologue to 4-byte alignment, `u32` words up to 16-byte
    /// alignment, then vector blocks. Single bytes only.
    Stepped,
}

impl Strategy {
    /// Block strategy with a bytewise prologue.
    pub const fn prologued(kernel: Kernel) -> Self {
        Self::Block {
            kernel,
            entry: Entry::Prologued,
        }
    }

    /// Block strategy with a masked first load.
    pub const fn masked(kernel: Kernel) -> Self {
        Self::Block {
            kernel,
            entry: Entry::Masked,
        }
    }

    /// Every strategy this crate implements, available or not.
    pub const ALL: [Self; 8] = [
        Self::Bytewise,
        Self::prologued(Kernel::Word4),
        Self::masked(Kernel::Word4),
        Self::prologued(Kernel::Word8),
        Self::masked(Kernel::Word8),
        Self::prologued(Kernel::Vector16),
        Self::masked(Kernel::Vector16),
        Self::Stepped,
    ];

    /// Whether the strategy needs the vector kernel.
    pub const fn needs_vector(self) -> bool {
        matches!(
            self,
            Self::Stepped
                | Self::Block {
                    kernel: Kernel::Vector16,
                    ..
                }
        )
    }

    /// Whether the strategy can search for byte pairs.
    pub const fn supports_pairs(self) -> bool {
        !matches!(self, Self::Stepped)
    }

    /// Strategies that can run with `caps`.
    pub fn available(caps: Capabilities) -> impl Iterator<Item = Self> {
        Self::ALL
            .into_iter()
            .filter(move |s| caps.vector || !s.needs_vector())
    }

    /// Fail if `caps` cannot run this strategy.
    pub fn check(self, caps: Capabilities) -> Result<Self> {
        if self.needs_vector() && !caps.vector {
            return Err(ScanError::VectorUnavailable);
        }
        Ok(self)
    }

    /// Default strategy for single-byte searches.
    pub fn select(caps: Capabilities, hint: SizeHint) -> Self {
        match hint {
            // One or two aligned words cover a short buffer without any
            // byte loop.
            SizeHint::Small => Self::masked(Kernel::Word8),
            SizeHint::Large | SizeHint::Unknown if caps.vector => Self::masked(Kernel::Vector16),
            SizeHint::Large | SizeHint::Unknown => Self::masked(Kernel::Word8),
        }
    }

    /// Default strategy for pair searches.
    pub fn select_pair(caps: Capabilities, hint: SizeHint) -> Self {
        match hint {
            // Word pair detection needs the exact detector on every block and
            // barely beats the byte loop on short inputs.
            SizeHint::Small => Self::Bytewise,
            SizeHint::Large | SizeHint::Unknown if caps.vector => Self::masked(Kernel::Vector16),
            SizeHint::Large | SizeHint::Unknown => Self::masked(Kernel::Word8),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytewise => f.write_str("bytewise"),
            Self::Block { kernel, entry } => write!(f, "{}-{}", kernel.name(), entry.name()),
            Self::Stepped => f.write_str("stepped"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "bytewise" => return Ok(Self::Bytewise),
            "stepped" => return Ok(Self::Stepped),
            _ => {}
        }
        let unknown = || ScanError::UnknownStrategy(s.to_string());
        let (kernel, entry) = name.split_once('-').ok_or_else(unknown)?;
        let kernel = match kernel {
            "word4" => Kernel::Word4,
            "word8" => Kernel::Word8,
            "vector16" => Kernel::Vector16,
            _ => return Err(unknown()),
        };
        let entry = match entry {
            "prologued" => Entry::Prologued,
            "masked" | "pure" => Entry::Masked,
            _ => return Err(unknown()),
        };
        Ok(Self::Block { kernel, entry })
    }
}

/// How byte pairs that straddle two blocks are carried across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PairMethod {
    /// Keep the previous block's top-lane bit and test it against lane 0.
    ShiftCombine,
    /// Accumulate first-byte hits in a register shifted down one block per step.
    #[default]
    Rolling,
}

impl fmt::Display for PairMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShiftCombine => f.write_str("shift"),
            Self::Rolling => f.write_str("rolling"),
        }
    }
}

impl FromStr for PairMethod {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shift" | "shift-combine" => Ok(Self::ShiftCombine),
            "rolling" | "rolling-accumulate" => Ok(Self::Rolling),
            _ => Err(ScanError::UnknownPairMethod(s.to_string())),
        }
    }
}

/// Expected buffer size, used only to pick a default strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeHint {
    /// Mostly under 16 bytes.
    Small,
    /// Mostly hundreds of bytes or more.
    Large,
    /// No idea; treated like `Large`.
    #[default]
    Unknown,
}

impl SizeHint {
    /// Hint for buffers of roughly `len` bytes.
    pub const fn for_len(len: usize) -> Self {
        if len < 16 {
            Self::Small
        } else {
            Self::Large
        }
    }
}

/// What the target can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// A 16-byte compare-and-extract kernel is compiled in.
    pub vector: bool,
}

impl Capabilities {
    /// Only the portable word kernels.
    pub const PORTABLE: Self = Self { vector: false };

    /// Probe the target once per process.
    pub fn detect() -> Self {
        static DETECTED: OnceLock<Capabilities> = OnceLock::new();
        *DETECTED.get_or_init(|| {
            let caps = Self {
                vector: vector::AVAILABLE,
            };
            log::debug!("scan capabilities: vector16={}", caps.vector);
            caps
        })
    }
}

/// Options for building a searcher.
///
/// # Example
///
/// ```rust
/// use bytescan::{ByteSearcher, SearchOptions, SizeHint};
///
/// let opts = SearchOptions {
///     size_hint: SizeHint::Small,
///     ..Default::default()
/// };
/// let searcher = ByteSearcher::with_options(b'*', &opts).unwrap();
/// assert_eq!(searcher.find(b"ab*"), Some(2));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// Pin a strategy instead of selecting one.
    pub strategy: Option<Strategy>,
    /// Expected buffer size for automatic selection.
    pub size_hint: SizeHint,
    /// Cross-block carry for pair searches.
    pub pair_method: PairMethod,
}

impl SearchOptions {
    /// Resolve the strategy for a single-byte search.
    pub fn resolve(&self, caps: Capabilities) -> Result<Strategy> {
        match self.strategy {
            Some(strategy) => {
                log::trace!("using pinned strategy {}", strategy);
                strategy.check(caps)
            }
            None => Ok(Strategy::select(caps, self.size_hint)),
        }
    }

    /// Resolve the strategy for a pair search.
    pub fn resolve_pair(&self, caps: Capabilities) -> Result<Strategy> {
        match self.strategy {
            Some(strategy) if !strategy.supports_pairs() => {
                Err(ScanError::UnsupportedForPairs(strategy))
            }
            Some(strategy) => {
                log::trace!("using pinned pair strategy {}", strategy);
                strategy.check(caps)
            }
            None => Ok(Strategy::select_pair(caps, self.size_hint)),
        }
    }
}
