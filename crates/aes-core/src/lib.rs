//! Software AES block transform backing the default ECB provider.
//!
//! This crate follows FIPS-197 directly and provides:
//! - Key schedules for AES-128, AES-192 and AES-256.
//! - Single-block forward encryption.
//! - Key and round-key types that wipe themselves on drop.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod round;
mod sbox;

pub use crate::block::{Block, BLOCK_LEN};
pub use crate::cipher::{encrypt_block, encrypt_block_in_place, expand_key};
pub use crate::key::{AesKey, InvalidKeyLength, KeySize, RoundKeys};
