use crate::DelimiterSet;

/// How the scanner locates the end of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScanStrategy {
    /// Chunked when the boundary set is small enough, lookup otherwise.
    #[default]
    Auto,
    /// Compare 16 bytes per step against every boundary byte at once.
    ///
    /// Cost grows with the number of boundary bytes, so at most
    /// [`Tokenizer::CHUNKED_MAX_BOUNDARIES`](crate::Tokenizer::CHUNKED_MAX_BOUNDARIES)
    /// are accepted.
    Chunked,
    /// Test one byte per step against a 256-entry membership table.
    Lookup,
}

/// Configuration for a [`Tokenizer`](crate::Tokenizer).
///
/// # Examples
///
/// ```rust
/// use logtok::{DelimiterSet, ScanStrategy, Tokenizer, TokenizerOptions};
///
/// let tokenizer = Tokenizer::new(TokenizerOptions {
///     delimiters: DelimiterSet::new(b" |"),
///     strategy: ScanStrategy::Lookup,
///     ..Default::default()
/// })?;
/// assert_eq!(tokenizer.tokenize_to_vec(b"a|b c", 8).len(), 3);
/// # Ok::<(), logtok::ScanError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenizerOptions {
    /// Bytes that separate tokens.
    ///
    /// # Default
    ///
    /// Space, tab, `=`, `:`, `,`, `;`.
    pub delimiters: DelimiterSet,

    /// Token end search strategy.
    ///
    /// # Default
    ///
    /// [`ScanStrategy::Auto`]
    pub strategy: ScanStrategy,

    /// Scan at most this many leading bytes of each line.
    ///
    /// A token straddling the cut is shortened to the bytes before it.
    ///
    /// # Default
    ///
    /// `None`
    pub max_line_bytes: Option<usize>,

    /// Treat a NUL byte as the end of the line.
    ///
    /// Matches callers that hand over C strings copied into a larger buffer,
    /// where everything after the first NUL is stale.
    ///
    /// # Default
    ///
    /// `false`
    pub stop_at_nul: bool,
}
