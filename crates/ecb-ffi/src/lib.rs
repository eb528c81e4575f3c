//! C ABI for single-block AES-ECB encryption.
//!
//! Three functions make up the whole surface:
//!
//! - [`ecb_aes_create`] imports a 16, 24 or 32 byte key and returns a handle,
//!   or the null handle on failure.
//! - [`ecb_aes_encrypt_block`] encrypts a block-aligned region of one buffer
//!   into a region of another and returns the number of bytes written, or 0 on
//!   failure.
//! - [`ecb_aes_release`] destroys the context behind a handle.
//!
//! Buffers are passed as a base pointer plus signed offset and length, the way
//! managed runtimes hand out pinned arrays. Handles are opaque ids issued by a
//! process-wide table, so a handle used after release is rejected instead of
//! dereferencing freed memory. No panic crosses the boundary.

#![deny(unsafe_op_in_unsafe_fn)]

mod error;
mod handle_table;

use std::panic::{catch_unwind, UnwindSafe};
use std::slice;
use std::sync::LazyLock;

use ecb_cipher::{crypto_provider, CipherError, KeySize, Region};
use tracing::{debug, warn};

use crate::error::AbiError;
use crate::handle_table::HandleTable;

/// Opaque reference to a cipher context. Zero is the null handle.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EcbHandle(u64);

impl EcbHandle {
    pub const NULL: Self = Self(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

static HANDLE_TABLE: LazyLock<HandleTable> = LazyLock::new(HandleTable::default);

/// Runs `f`, turning errors and panics into `failure`.
fn abi_boundary<T, F>(op: &'static str, failure: T, f: F) -> T
where
    F: FnOnce() -> Result<T, AbiError> + UnwindSafe,
{
    match catch_unwind(f) {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            warn!(op, %err, "call failed");
            failure
        }
        Err(_) => {
            warn!(op, "panic caught at ABI boundary");
            failure
        }
    }
}

/// Length of the prefix of a caller buffer that `region` touches.
fn span_len(region: Region) -> Result<usize, AbiError> {
    let end = region.end().ok_or(AbiError::SpanOverflow {
        offset: region.offset,
        len: region.len,
    })?;
    if end > isize::MAX as usize {
        return Err(AbiError::SpanTooLarge(end));
    }
    Ok(end)
}

/// # Safety
///
/// `ptr` must be null or valid for reads of `region.offset + region.len` bytes.
unsafe fn caller_buffer<'a>(
    ptr: *const u8,
    region: Region,
    what: &'static str,
) -> Result<&'a [u8], AbiError> {
    if ptr.is_null() {
        return Err(AbiError::NullPointer(what));
    }
    let len = span_len(region)?;
    // SAFETY: non-null, and the caller guarantees `len` readable bytes.
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

/// # Safety
///
/// `ptr` must be null or valid for writes of `region.offset + region.len` bytes,
/// and no other reference into that memory may be live.
unsafe fn caller_buffer_mut<'a>(
    ptr: *mut u8,
    region: Region,
    what: &'static str,
) -> Result<&'a mut [u8], AbiError> {
    if ptr.is_null() {
        return Err(AbiError::NullPointer(what));
    }
    let len = span_len(region)?;
    // SAFETY: non-null, and the caller guarantees `len` writable bytes.
    Ok(unsafe { slice::from_raw_parts_mut(ptr, len) })
}

/// Creates a cipher context from `key[key_offset..key_offset + key_length]`.
///
/// Returns the null handle if `key_length` is not 16, 24 or 32, if any argument
/// is negative or null, or if the provider cannot import the key. Nothing is
/// allocated on failure.
///
/// # Safety
///
/// `key` must point to at least `key_offset + key_length` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn ecb_aes_create(
    key: *const u8,
    key_offset: i32,
    key_length: i32,
) -> EcbHandle {
    abi_boundary("create", EcbHandle::NULL, || {
        let region = Region::from_abi(key_offset, key_length)?;
        if KeySize::from_len(region.len).is_none() {
            return Err(CipherError::InvalidKeyLength(region.len).into());
        }
        // SAFETY: forwarded from this function's contract.
        let buf = unsafe { caller_buffer(key, region, "key")? };
        let cipher = crypto_provider::create_aes(buf, region.offset, region.len)?;
        let handle = HANDLE_TABLE.insert(cipher);
        debug!(handle = handle.0, "context created");
        Ok(handle)
    })
}

/// Encrypts `input[input_offset..input_offset + input_length]` into
/// `output[output_offset..output_offset + input_length]`.
///
/// `input_length` must be a positive multiple of 16. The regions may overlap.
/// Returns the number of bytes written, or 0 when the handle is null, stale or
/// unknown, when an argument is invalid, or when the transform fails; in every
/// failure case the output buffer is left untouched.
///
/// # Safety
///
/// `input` must point to at least `input_offset + input_length` readable bytes
/// and `output` to at least `output_offset + input_length` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn ecb_aes_encrypt_block(
    handle: EcbHandle,
    input: *const u8,
    input_offset: i32,
    input_length: i32,
    output: *mut u8,
    output_offset: i32,
) -> i32 {
    abi_boundary("encrypt_block", 0, || {
        let cipher = HANDLE_TABLE.get(handle).ok_or(AbiError::InvalidHandle)?;
        let input_region = Region::from_abi(input_offset, input_length)?;
        let output_region = Region::from_abi(output_offset, input_length)?;

        // Copied out before the output is borrowed, since the two may alias.
        let mut data = {
            // SAFETY: forwarded from this function's contract.
            let buf = unsafe { caller_buffer(input, input_region, "input")? };
            input_region.slice(buf)?.to_vec()
        };
        let written = cipher.encrypt_in_place(&mut data)?;

        // SAFETY: forwarded from this function's contract; the input borrow has ended.
        let buf = unsafe { caller_buffer_mut(output, output_region, "output")? };
        output_region.slice_mut(buf)?.copy_from_slice(&data);
        i32::try_from(written).map_err(|_| AbiError::SpanTooLarge(written))
    })
}

/// Destroys the context behind `handle`.
///
/// The null handle is ignored. Releasing a handle twice, or one that was never
/// issued, is logged and otherwise has no effect.
#[no_mangle]
pub extern "C" fn ecb_aes_release(handle: EcbHandle) {
    abi_boundary("release", (), || {
        if handle.is_null() {
            return Ok(());
        }
        HANDLE_TABLE.remove(handle).ok_or(AbiError::InvalidHandle)?;
        debug!(handle = handle.0, "context released");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];

    #[test]
    fn release_drops_table_entry() {
        let handle = unsafe { ecb_aes_create(KEY.as_ptr(), 0, 16) };
        assert!(HANDLE_TABLE.get(handle).is_some());
        ecb_aes_release(handle);
        assert!(HANDLE_TABLE.get(handle).is_none());
    }

    #[test]
    fn span_len_rejects_overflow() {
        assert!(matches!(
            span_len(Region::new(usize::MAX, 1)),
            Err(AbiError::SpanOverflow {
                offset: usize::MAX,
                len: 1
            })
        ));
        assert!(matches!(
            span_len(Region::new(isize::MAX as usize, 1)),
            Err(AbiError::SpanTooLarge(_))
        ));
        assert_eq!(span_len(Region::new(4, 16)).unwrap(), 20);
    }

    #[test]
    fn panics_become_the_failure_value() {
        let value = abi_boundary("test", -1, || -> Result<i32, AbiError> { panic!("boom") });
        assert_eq!(value, -1);
    }
}
