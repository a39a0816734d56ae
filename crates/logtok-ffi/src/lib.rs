//! C ABI for [`logtok`].
//!
//! Every entry point takes flat pointer/length/capacity arguments and returns
//! the number of identifiers written, or a negative `LOGTOK_ERR_*` code.
//! Panics never unwind into the caller; they are reported as
//! [`LOGTOK_ERR_PANIC`]. The declarations live in `include/logtok.h`.
//!
//! Pointer rules shared by all functions:
//! - `input` must be readable for `input_len` bytes. It may be null only when
//!   `input_len` is 0.
//! - `out` must be writable for `out_capacity` `uint32_t`s. It may be null
//!   only when `out_capacity` is 0. Entries past the returned count are not
//!   written.

use std::{
    ffi::{CStr, c_char},
    panic::{self, AssertUnwindSafe},
    ptr, slice,
    sync::LazyLock,
};

use logtok::{Capacity, DelimiterSet, ScanError, Tokenized, Tokenizer, TokenizerOptions};

/// `out_capacity` was negative.
pub const LOGTOK_ERR_INVALID_CAPACITY: i32 = -1;
/// A null pointer was passed with a non-zero length or capacity.
pub const LOGTOK_ERR_BOUNDS: i32 = -2;
/// The tokenizer panicked; the output buffer contents are unspecified.
pub const LOGTOK_ERR_PANIC: i32 = -3;
/// The requested tokenizer configuration was rejected.
pub const LOGTOK_ERR_CONFIG: i32 = -4;

static DEFAULT_TOKENIZER: LazyLock<Tokenizer> = LazyLock::new(Tokenizer::default);

fn error_code(err: ScanError) -> i32 {
    match err {
        ScanError::InvalidCapacity(_) => LOGTOK_ERR_INVALID_CAPACITY,
        ScanError::BoundsViolation { .. } => LOGTOK_ERR_BOUNDS,
        ScanError::ChunkedSetTooLarge { .. } => LOGTOK_ERR_CONFIG,
    }
}

/// # Safety
///
/// When `len > 0` and `ptr` is non-null, `ptr` must be valid for reads of
/// `len` bytes for `'a`.
unsafe fn input_slice<'a>(ptr: *const u8, len: usize) -> Result<&'a [u8], ScanError> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(ScanError::BoundsViolation { len });
    }
    // SAFETY: non-null, and the caller vouches for `len` readable bytes.
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

/// # Safety
///
/// When the capacity is positive and `ptr` is non-null, `ptr` must be valid
/// for writes of `capacity` `u32`s for `'a` and not aliased.
unsafe fn output_slice<'a>(ptr: *mut u32, capacity: i32) -> Result<&'a mut [u32], ScanError> {
    let len = Capacity::try_from(capacity)?.get();
    if len == 0 {
        return Ok(&mut []);
    }
    if ptr.is_null() {
        return Err(ScanError::BoundsViolation { len });
    }
    // SAFETY: non-null, and the caller vouches for `len` writable slots.
    Ok(unsafe { slice::from_raw_parts_mut(ptr, len) })
}

/// Runs `scan`, converting errors and panics into codes and reporting
/// truncation through the optional out-pointer.
///
/// # Safety
///
/// `truncated` must be null or valid for a one-byte write.
unsafe fn finish(
    entry: &'static str,
    truncated: *mut u8,
    scan: impl FnOnce() -> Result<Tokenized, ScanError>,
) -> i32 {
    match panic::catch_unwind(AssertUnwindSafe(scan)) {
        Ok(Ok(summary)) => {
            if !truncated.is_null() {
                // SAFETY: non-null, and the caller vouches for one byte.
                unsafe { truncated.write(u8::from(summary.truncated)) };
            }
            // Bounded by the capacity, which came in as an `i32`.
            i32::try_from(summary.written).unwrap_or(i32::MAX)
        }
        Ok(Err(err)) => {
            tracing::warn!(entry, error = %err, "rejected tokenize call");
            error_code(err)
        }
        Err(_) => {
            tracing::error!(entry, "tokenizer panicked");
            LOGTOK_ERR_PANIC
        }
    }
}

/// Tokenizes `input[..input_len]` with the default delimiters (space, tab,
/// `=`, `:`, `,`, `;`), writing at most `out_capacity` identifiers to `out`.
///
/// Returns the number of identifiers written or a negative error code.
///
/// # Safety
///
/// See the crate-level pointer rules.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logtok_tokenize(
    input: *const u8,
    input_len: usize,
    out: *mut u32,
    out_capacity: i32,
) -> i32 {
    // SAFETY: forwarded contract; a null `truncated` is never written.
    unsafe { logtok_tokenize_ex(input, input_len, out, out_capacity, ptr::null_mut()) }
}

/// Like [`logtok_tokenize`], and on success stores 1 in `*truncated` if the
/// output filled up before the line ended, 0 otherwise. `truncated` may be
/// null.
///
/// # Safety
///
/// See the crate-level pointer rules; `truncated` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logtok_tokenize_ex(
    input: *const u8,
    input_len: usize,
    out: *mut u32,
    out_capacity: i32,
    truncated: *mut u8,
) -> i32 {
    // SAFETY: forwarded contract.
    unsafe {
        finish("logtok_tokenize_ex", truncated, || {
            let input = input_slice(input, input_len)?;
            let out = output_slice(out, out_capacity)?;
            Ok(DEFAULT_TOKENIZER.tokenize(input, out))
        })
    }
}

/// Tokenizes with the delimiter bytes `delimiters[..delimiters_len]`
/// instead of the defaults. An empty set makes the whole line one token.
///
/// # Safety
///
/// See the crate-level pointer rules; `delimiters` follows the same rule as
/// `input`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logtok_tokenize_with(
    input: *const u8,
    input_len: usize,
    delimiters: *const u8,
    delimiters_len: usize,
    out: *mut u32,
    out_capacity: i32,
) -> i32 {
    // SAFETY: forwarded contract.
    unsafe {
        finish("logtok_tokenize_with", ptr::null_mut(), || {
            let delimiters = DelimiterSet::new(input_slice(delimiters, delimiters_len)?);
            let tokenizer = Tokenizer::new(TokenizerOptions {
                delimiters,
                ..Default::default()
            })?;
            let input = input_slice(input, input_len)?;
            let out = output_slice(out, out_capacity)?;
            Ok(tokenizer.tokenize(input, out))
        })
    }
}

/// Compatibility entry point for callers holding NUL-terminated lines.
///
/// The line length is taken from the terminator before scanning starts, so
/// the scan itself stays bounded.
///
/// # Safety
///
/// `line` must be null or point to a NUL-terminated string. `out` follows the
/// crate-level rule with `max` as its capacity.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logtok_tokenize_line(line: *const c_char, out: *mut u32, max: i32) -> i32 {
    // SAFETY: forwarded contract.
    unsafe {
        finish("logtok_tokenize_line", ptr::null_mut(), || {
            let line = if line.is_null() {
                &[][..]
            } else {
                // SAFETY: the caller guarantees a terminator.
                CStr::from_ptr(line).to_bytes()
            };
            let out = output_slice(out, max)?;
            Ok(DEFAULT_TOKENIZER.tokenize(line, out))
        })
    }
}

/// FNV-1a identifier of `bytes[..len]`, the same value the tokenizer emits
/// for a token with those bytes.
///
/// A null pointer hashes as the empty token.
///
/// # Safety
///
/// `bytes` must be readable for `len` bytes unless it is null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logtok_fnv1a(bytes: *const u8, len: usize) -> u32 {
    // SAFETY: forwarded contract.
    match unsafe { input_slice(bytes, len) } {
        Ok(bytes) => logtok::fnv1a(bytes),
        Err(err) => {
            tracing::warn!(error = %err, "logtok_fnv1a called with a null buffer");
            logtok::fnv1a(&[])
        }
    }
}
