//! Token end search.
//!
//! The chunked path loads 16 input bytes as one little-endian `u128` and
//! compares every lane against each boundary byte at once (SWAR). For each
//! boundary byte `d`, `word ^ splat(d)` has a zero lane exactly where the
//! input byte equals `d`; [`zero_lanes`] turns those lanes into a high-bit
//! mask. Lane 0 is the lowest-addressed byte, so the lowest set bit is the
//! earliest boundary.
//!
//! A window is only loaded when `first_chunk` proves 16 bytes remain. The
//! final partial window is scanned one byte at a time against the lookup
//! table, clamped to the slice length.

/// Bytes compared per chunked step.
pub const CHUNK_WIDTH: usize = 16;

/// Upper bound on boundary bytes for the chunked matcher. Each one costs an
/// xor and a zero-lane test per window.
pub(crate) const MAX_SPLATS: usize = 8;

const LANES: u128 = u128::from_ne_bytes([0x01; CHUNK_WIDTH]);
const LO7: u128 = u128::from_ne_bytes([0x7f; CHUNK_WIDTH]);
const HI: u128 = u128::from_ne_bytes([0x80; CHUNK_WIDTH]);

/// High bit set in every lane of `v` that is zero.
///
/// Carry-free: masking each lane to 7 bits and adding `0x7f` peaks at `0xfe`,
/// so no lane carries into its neighbour.
#[inline]
const fn zero_lanes(v: u128) -> u128 {
    !((v & LO7).wrapping_add(LO7) | v) & HI
}

#[inline]
const fn splat(b: u8) -> u128 {
    LANES * b as u128
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Chunked,
    Lookup,
}

/// Finds the next boundary byte at or after a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BoundaryFinder {
    table: [bool; 256],
    splats: [u128; MAX_SPLATS],
    splat_len: usize,
    mode: Mode,
}

impl BoundaryFinder {
    /// Chunked matcher over `table`, or `None` if it has more than
    /// [`MAX_SPLATS`] members.
    pub(crate) fn chunked(table: [bool; 256]) -> Option<Self> {
        let mut splats = [0u128; MAX_SPLATS];
        let mut splat_len = 0;
        for (b, _) in (0..=u8::MAX).zip(table).filter(|&(_, hit)| hit) {
            *splats.get_mut(splat_len)? = splat(b);
            splat_len += 1;
        }
        Some(Self {
            table,
            splats,
            splat_len,
            mode: Mode::Chunked,
        })
    }

    pub(crate) fn lookup(table: [bool; 256]) -> Self {
        Self {
            table,
            splats: [0; MAX_SPLATS],
            splat_len: 0,
            mode: Mode::Lookup,
        }
    }

    pub(crate) fn is_chunked(&self) -> bool {
        self.mode == Mode::Chunked
    }

    #[inline]
    pub(crate) fn is_boundary(&self, b: u8) -> bool {
        self.table[b as usize]
    }

    /// Index of the first boundary byte in `input[from..]`, or `input.len()`
    /// if there is none.
    #[inline]
    pub(crate) fn find(&self, input: &[u8], from: usize) -> usize {
        match self.mode {
            Mode::Chunked => {
                let at = self.find_chunked(input, from);
                #[cfg(feature = "fuzzing")]
                assert_eq!(at, self.find_scalar(input, from), "chunked search from {from}");
                at
            }
            Mode::Lookup => self.find_scalar(input, from),
        }
    }

    fn find_chunked(&self, input: &[u8], from: usize) -> usize {
        let mut pos = from;
        while let Some(window) = input.get(pos..).and_then(<[u8]>::first_chunk::<CHUNK_WIDTH>) {
            let hits = self.lane_mask(window);
            if hits != 0 {
                return pos + (hits.trailing_zeros() / 8) as usize;
            }
            pos += CHUNK_WIDTH;
        }
        self.find_scalar(input, pos)
    }

    fn find_scalar(&self, input: &[u8], from: usize) -> usize {
        input
            .get(from..)
            .and_then(|rest| rest.iter().position(|&b| self.is_boundary(b)))
            .map_or(input.len(), |i| from + i)
    }

    /// Boundary lanes of one window, as a high-bit-per-lane mask.
    #[inline]
    pub(crate) fn lane_mask(&self, window: &[u8; CHUNK_WIDTH]) -> u128 {
        let word = u128::from_le_bytes(*window);
        self.splats[..self.splat_len]
            .iter()
            .fold(0, |hits, &s| hits | zero_lanes(word ^ s))
    }
}
