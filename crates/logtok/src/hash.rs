/// 32-bit FNV offset basis.
pub const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// 32-bit FNV prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a hash of `bytes`.
///
/// Each byte is xor'd into the state before the multiply, so the result
/// depends on byte order. The hash of the empty slice is the offset basis.
///
/// ```rust
/// assert_eq!(logtok::fnv1a(b"a"), 0xe40c_292c);
/// assert_ne!(logtok::fnv1a(b"ab"), logtok::fnv1a(b"ba"));
/// ```
#[inline]
#[must_use]
pub const fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash = (hash ^ bytes[i] as u32).wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}
