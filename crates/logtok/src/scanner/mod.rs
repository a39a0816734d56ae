//! Scanner: single-pass split of one line into hashed tokens.
//!
//! The scan is a two-state machine. `SkipDelim` steps over a run of
//! delimiter bytes one at a time (these runs are short). `ScanToken` hands
//! the token start to [`BoundaryFinder`], which searches 16 bytes per step
//! and finishes with a clamped scalar tail. The bytes between start and
//! boundary are hashed with FNV-1a and emitted; a delimiter boundary returns
//! to `SkipDelim`, end of input (or NUL when `stop_at_nul` is set) ends the
//! scan.
//!
//! Invariants
//! - Every emitted token is non-empty and lies inside the input slice.
//! - Tokens and the delimiter runs between them partition the scanned prefix
//!   of the input; no byte is visited by two tokens.
//! - No read past `input.len()`: windows are only formed from
//!   `first_chunk`, and all other reads go through `get`.

mod chunk;

#[cfg(test)]
mod tests;

use alloc::vec::Vec;
use core::{iter::FusedIterator, ops::Range};

pub use chunk::CHUNK_WIDTH;
use chunk::{BoundaryFinder, MAX_SPLATS};

use crate::{IdSink, ScanError, ScanStrategy, SliceSink, TokenizerOptions, VecSink, fnv1a};

/// One token of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// Byte offset of the token in the line.
    pub offset: usize,
    /// The token's bytes; never empty.
    pub bytes: &'src [u8],
    /// FNV-1a hash of `bytes`.
    pub id: u32,
}

impl Token<'_> {
    /// Byte range of the token in the line.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.bytes.len()
    }
}

/// Outcome of a bounded tokenize call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct Tokenized {
    /// Identifiers written to the output.
    pub written: usize,
    /// `true` if the output filled up while at least one more token remained
    /// in the line.
    pub truncated: bool,
}

/// Splits lines into FNV-1a token identifiers.
///
/// A `Tokenizer` is immutable once built and holds no per-call state, so one
/// instance can be shared by reference across threads.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    options: TokenizerOptions,
    finder: BoundaryFinder,
}

impl Default for Tokenizer {
    fn default() -> Self {
        let options = TokenizerOptions::default();
        let table = boundary_table(&options);
        let finder =
            BoundaryFinder::chunked(table).unwrap_or_else(|| BoundaryFinder::lookup(table));
        Self { options, finder }
    }
}

impl Tokenizer {
    /// Largest boundary set [`ScanStrategy::Chunked`] accepts. The boundary
    /// set is the delimiters plus NUL when `stop_at_nul` is enabled.
    pub const CHUNKED_MAX_BOUNDARIES: usize = MAX_SPLATS;

    /// Builds a tokenizer.
    ///
    /// # Errors
    ///
    /// [`ScanError::ChunkedSetTooLarge`] if [`ScanStrategy::Chunked`] is
    /// requested for more than [`Self::CHUNKED_MAX_BOUNDARIES`] boundary
    /// bytes. [`ScanStrategy::Auto`] never fails; it picks the lookup path
    /// for large sets.
    pub fn new(options: TokenizerOptions) -> Result<Self, ScanError> {
        let table = boundary_table(&options);
        let finder = match options.strategy {
            ScanStrategy::Auto => {
                BoundaryFinder::chunked(table).unwrap_or_else(|| BoundaryFinder::lookup(table))
            }
            ScanStrategy::Chunked => {
                BoundaryFinder::chunked(table).ok_or(ScanError::ChunkedSetTooLarge {
                    count: table.iter().filter(|&&hit| hit).count(),
                    max: MAX_SPLATS,
                })?
            }
            ScanStrategy::Lookup => BoundaryFinder::lookup(table),
        };
        Ok(Self { options, finder })
    }

    /// The options this tokenizer was built with.
    #[must_use]
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// The search path in use; [`ScanStrategy::Auto`] is resolved to
    /// `Chunked` or `Lookup`.
    #[must_use]
    pub fn strategy(&self) -> ScanStrategy {
        if self.finder.is_chunked() {
            ScanStrategy::Chunked
        } else {
            ScanStrategy::Lookup
        }
    }

    /// Lazily scans `input`, yielding tokens left to right.
    pub fn tokens<'src>(&self, input: &'src [u8]) -> Tokens<'_, 'src> {
        let input = match self.options.max_line_bytes {
            Some(max) if max < input.len() => &input[..max],
            _ => input,
        };
        Tokens {
            tokenizer: self,
            input,
            pos: 0,
            state: State::SkipDelim,
        }
    }

    /// Scans `input`, pushing identifiers into `sink` until the line ends or
    /// the sink is full.
    pub fn scan_into<S: IdSink + ?Sized>(&self, input: &[u8], sink: &mut S) -> Tokenized {
        let mut tokens = self.tokens(input);
        let mut written = 0;
        while sink.remaining() > 0 {
            let Some(token) = tokens.next() else {
                return Tokenized {
                    written,
                    truncated: false,
                };
            };
            sink.push(token.id);
            written += 1;
        }
        let truncated = tokens.has_remaining();
        #[cfg(feature = "tracing")]
        if truncated {
            tracing::trace!(
                written,
                offset = tokens.offset(),
                "token output full, rest of line dropped"
            );
        }
        Tokenized { written, truncated }
    }

    /// Writes identifiers into `out`; its length is the capacity.
    ///
    /// Entries past [`Tokenized::written`] are left untouched. Allocation
    /// free.
    pub fn tokenize(&self, input: &[u8], out: &mut [u32]) -> Tokenized {
        self.scan_into(input, &mut SliceSink::new(out))
    }

    /// Collects at most `capacity` identifiers into a new vector.
    #[must_use]
    pub fn tokenize_to_vec(&self, input: &[u8], capacity: usize) -> Vec<u32> {
        let mut ids = Vec::with_capacity(capacity.min(input.len().div_ceil(2)));
        let _ = self.scan_into(input, &mut VecSink::new(&mut ids, capacity));
        ids
    }
}

fn boundary_table(options: &TokenizerOptions) -> [bool; 256] {
    let mut table = *options.delimiters.table();
    if options.stop_at_nul {
        table[0] = true;
    }
    table
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SkipDelim,
    ScanToken,
    Done,
}

/// Iterator over the tokens of one line. See [`Tokenizer::tokens`].
#[derive(Debug, Clone)]
pub struct Tokens<'t, 'src> {
    tokenizer: &'t Tokenizer,
    input: &'src [u8],
    pos: usize,
    state: State,
}

impl<'src> Tokens<'_, 'src> {
    /// Read position: one past the last byte consumed so far.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Returns `true` if another token follows, without hashing it.
    #[must_use]
    pub fn has_remaining(&self) -> bool {
        match self.state {
            State::Done => false,
            State::ScanToken => true,
            State::SkipDelim => self.clone().skip_delimiters(),
        }
    }

    #[inline]
    fn is_end_marker(&self, b: u8) -> bool {
        self.tokenizer.options.stop_at_nul && b == 0
    }

    /// Steps over delimiters. Returns `true` at a token start, `false` (and
    /// moves to `Done`) at end of input.
    fn skip_delimiters(&mut self) -> bool {
        let delimiters = &self.tokenizer.options.delimiters;
        while let Some(&b) = self.input.get(self.pos) {
            if self.is_end_marker(b) {
                break;
            }
            if !delimiters.contains(b) {
                self.state = State::ScanToken;
                return true;
            }
            self.pos += 1;
        }
        self.state = State::Done;
        false
    }

    fn scan_token(&mut self) -> Token<'src> {
        let start = self.pos;
        let end = self.tokenizer.finder.find(self.input, start);
        debug_assert!(start < end && end <= self.input.len());
        let bytes = &self.input[start..end];

        self.state = match self.input.get(end) {
            Some(&b) if !self.is_end_marker(b) => {
                self.pos = end + 1;
                State::SkipDelim
            }
            _ => {
                self.pos = end;
                State::Done
            }
        };

        Token {
            offset: start,
            bytes,
            id: fnv1a(bytes),
        }
    }
}

impl<'src> Iterator for Tokens<'_, 'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::SkipDelim => {
                    if !self.skip_delimiters() {
                        return None;
                    }
                }
                State::ScanToken => return Some(self.scan_token()),
                State::Done => return None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            State::Done => (0, Some(0)),
            // At most one token per two bytes: each token after the first
            // needs a separator.
            _ => (0, Some((self.input.len() - self.pos).div_ceil(2))),
        }
    }
}

impl FusedIterator for Tokens<'_, '_> {}
