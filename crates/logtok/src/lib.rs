//! Split a single log line into delimiter-separated tokens and map each token
//! to a stable 32-bit FNV-1a identifier.
//!
//! The scanner runs in one pass over a bounded byte slice. Token ends are
//! located 16 bytes at a time with a SWAR comparison against the delimiter
//! set, falling back to a length-clamped scalar scan for the final partial
//! window, so no byte past the end of the slice is ever read.
//!
//! ```rust
//! use logtok::{Tokenizer, fnv1a};
//!
//! let tokenizer = Tokenizer::default();
//! let mut out = [0u32; 8];
//! let summary = tokenizer.tokenize(b"level=INFO msg=ok", &mut out);
//! assert_eq!(summary.written, 4);
//! assert!(!summary.truncated);
//! assert_eq!(out[0], fnv1a(b"level"));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod delimiters;
mod error;
mod hash;
mod options;
mod scanner;
mod sink;

#[cfg(test)]
mod tests;

pub use delimiters::{DEFAULT_DELIMITERS, DelimiterSet};
pub use error::{Capacity, ScanError};
pub use hash::{FNV_OFFSET_BASIS, FNV_PRIME, fnv1a};
pub use options::{ScanStrategy, TokenizerOptions};
pub use scanner::{CHUNK_WIDTH, Token, Tokenized, Tokenizer, Tokens};
pub use sink::{IdSink, SliceSink, VecSink};

/// Tokenizes `input` with the default delimiter set, writing identifiers
/// into `out`.
///
/// Shorthand for `Tokenizer::default().tokenize(input, out)`.
pub fn tokenize(input: &[u8], out: &mut [u32]) -> Tokenized {
    Tokenizer::default().tokenize(input, out)
}
