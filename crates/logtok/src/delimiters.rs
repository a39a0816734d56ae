use core::fmt;

/// The six separator bytes of the classic log-line grammar: space, tab, `=`,
/// `:`, `,` and `;`.
pub const DEFAULT_DELIMITERS: [u8; 6] = [b' ', b'\t', b'=', b':', b',', b';'];

/// A set of byte values that separate tokens.
///
/// Membership is a single indexed load into a 256-entry table, so the set can
/// hold any combination of bytes without affecting lookup cost.
///
/// # Examples
///
/// ```rust
/// use logtok::DelimiterSet;
///
/// let set = DelimiterSet::new(b"|/");
/// assert!(set.contains(b'|'));
/// assert!(!set.contains(b' '));
/// assert_eq!(set.len(), 2);
/// ```
///
/// # Default
///
/// [`DEFAULT_DELIMITERS`].
#[derive(Clone, PartialEq, Eq)]
pub struct DelimiterSet {
    table: [bool; 256],
    len: u16,
}

impl DelimiterSet {
    /// Builds a set from `bytes`. Duplicates are ignored.
    #[must_use]
    pub const fn new(bytes: &[u8]) -> Self {
        let mut set = Self::empty();
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i] as usize;
            if !set.table[b] {
                set.table[b] = true;
                set.len += 1;
            }
            i += 1;
        }
        set
    }

    /// A set with no members. Every non-empty line scans as a single token.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            table: [false; 256],
            len: 0,
        }
    }

    /// Returns `true` if `byte` separates tokens.
    #[inline]
    #[must_use]
    pub const fn contains(&self, byte: u8) -> bool {
        self.table[byte as usize]
    }

    /// Number of distinct member bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds `byte`, returning `true` if it was not already present.
    pub fn insert(&mut self, byte: u8) -> bool {
        let slot = &mut self.table[byte as usize];
        if *slot {
            return false;
        }
        *slot = true;
        self.len += 1;
        true
    }

    /// Removes `byte`, returning `true` if it was present.
    pub fn remove(&mut self, byte: u8) -> bool {
        let slot = &mut self.table[byte as usize];
        if !*slot {
            return false;
        }
        *slot = false;
        self.len -= 1;
        true
    }

    /// Iterates over the member bytes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|&b| self.contains(b))
    }

    pub(crate) fn table(&self) -> &[bool; 256] {
        &self.table
    }
}

impl Default for DelimiterSet {
    fn default() -> Self {
        Self::new(&DEFAULT_DELIMITERS)
    }
}

impl From<&[u8]> for DelimiterSet {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl FromIterator<u8> for DelimiterSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::empty();
        for b in iter {
            set.insert(b);
        }
        set
    }
}

impl fmt::Debug for DelimiterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Escaped(u8);
        impl fmt::Debug for Escaped {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "'{}'", core::ascii::escape_default(self.0))
            }
        }
        f.debug_set().entries(self.iter().map(Escaped)).finish()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use alloc::{string::String, vec::Vec};

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::DelimiterSet;

    impl Serialize for DelimiterSet {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    /// Config files may spell the set either as a string (`" \t=:,;"`) or as
    /// a list of byte values.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Bytes(Vec<u8>),
    }

    impl<'de> Deserialize<'de> for DelimiterSet {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(match Repr::deserialize(deserializer)? {
                Repr::Text(s) => DelimiterSet::new(s.as_bytes()),
                Repr::Bytes(b) => DelimiterSet::new(&b),
            })
        }
    }
}
