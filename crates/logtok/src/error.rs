use thiserror::Error;

/// Contract violations detected where a tokenizer is configured or called
/// across a language boundary.
///
/// Scanning itself is total over well-formed input and never fails; an empty
/// or all-delimiter line is an empty result, not an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// A negative output capacity was supplied.
    #[error("invalid capacity {0}: capacity must be non-negative")]
    InvalidCapacity(i64),
    /// A region was declared with a length but no readable or writable
    /// memory backs it.
    #[error("bounds violation: {len} bytes declared but no buffer was supplied")]
    BoundsViolation {
        /// The declared length.
        len: usize,
    },
    /// [`ScanStrategy::Chunked`](crate::ScanStrategy::Chunked) was requested
    /// for a boundary set larger than the chunk matcher holds.
    #[error("chunked scan supports at most {max} boundary bytes, got {count}")]
    ChunkedSetTooLarge {
        /// Boundary bytes requested.
        count: usize,
        /// Upper limit for the chunked matcher.
        max: usize,
    },
}

/// A validated, non-negative output capacity.
///
/// Call boundaries carry capacities as signed integers; converting through
/// `Capacity` rejects negative values with [`ScanError::InvalidCapacity`].
///
/// ```rust
/// use logtok::{Capacity, ScanError};
///
/// assert_eq!(Capacity::try_from(64i32).map(Capacity::get), Ok(64));
/// assert_eq!(Capacity::try_from(-1i32), Err(ScanError::InvalidCapacity(-1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Capacity(usize);

impl Capacity {
    /// Wraps an already non-negative capacity.
    #[must_use]
    pub const fn new(n: usize) -> Self {
        Self(n)
    }

    /// The capacity as a `usize`.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for Capacity {
    fn from(n: usize) -> Self {
        Self(n)
    }
}

impl TryFrom<i64> for Capacity {
    type Error = ScanError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        usize::try_from(n)
            .map(Self)
            .map_err(|_| ScanError::InvalidCapacity(n))
    }
}

impl TryFrom<i32> for Capacity {
    type Error = ScanError;

    fn try_from(n: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(n))
    }
}
