//! Single-block AES-ECB encryption over pluggable providers.
//!
//! An [`AesBlockCipher`] owns one opened provider and one key imported into it.
//! It is built once per key, encrypts any number of block-aligned buffers, and
//! releases both resources when dropped (key first, then provider).
//!
//! ECB encrypts every 16-byte block independently: identical plaintext blocks
//! under the same key produce identical ciphertext blocks. Callers relying on
//! this crate depend on exactly that behavior.
//!
//! Buffers can be addressed as plain slices or as the `(buffer, offset, length)`
//! triples used by foreign callers; the latter are checked against the buffer
//! bounds before any byte is read or written.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod context;
pub mod crypto_provider;
mod error;
pub mod provider;
mod region;

pub use aes_core::{KeySize, BLOCK_LEN};

pub use crate::config::CipherConfig;
pub use crate::context::AesBlockCipher;
pub use crate::error::{CipherError, Result};
pub use crate::provider::{BlockProvider, KeyHandle, ProviderKind};
pub use crate::region::Region;
