// SPDX-License-Identifier: MIT
//
// Error taxonomy for the styled-text engine.
//
// Validation is eager: every fallible operation checks its arguments at the
// call boundary and returns an error instead of clamping or truncating.
// These are programmer errors meant to surface immediately — nothing here
// is transient, and nothing is retried. The rendering pass itself performs
// no validation; it trusts the invariants the mutation layer maintains.
//
// Numeric domains that the type system already covers (color channels and
// palette indices are u8, escape counts are u16, erase modes are enums)
// carry no runtime check and no error variant.

use thiserror::Error;

/// Errors produced by buffer mutation and flag construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A buffer operation's start or length falls outside the buffer.
    ///
    /// `index` is the first offending offset; `len` is the buffer length
    /// at the time of the call.
    #[error("index {index} out of range for buffer of length {len}")]
    IndexOutOfRange {
        /// The offending character offset.
        index: usize,
        /// The buffer length the offset was checked against.
        len: usize,
    },

    /// A raw bit pattern contains bits outside the attribute-flag domain.
    #[error("undefined attribute flag bits {bits:#06x}")]
    InvalidFlag {
        /// The rejected bit pattern.
        bits: u16,
    },

    /// A structurally required parameter is missing or unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

// ─── Tests ───────────────────────────────────────────────────────────────────
