//! Block providers: the engines that perform the AES transform.
//!
//! A provider plays the role of an opened algorithm handle already configured
//! for ECB chaining with no IV and no padding. Importing key bytes into it
//! yields a [`KeyHandle`], which is the only thing that can encrypt.

mod rustcrypto;
mod software;

use std::fmt;

use aes_core::{KeySize, BLOCK_LEN};

use crate::error::{CipherError, Result};

pub use rustcrypto::RustCryptoProvider;
pub use software::SoftwareProvider;

/// An opened AES-ECB provider.
pub trait BlockProvider: Send + Sync {
    /// Short provider name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Derives a symmetric key handle from raw key bytes.
    fn import_key(&self, key: &[u8]) -> Result<Box<dyn KeyHandle>>;
}

/// A symmetric key bound to the provider that imported it.
pub trait KeyHandle: Send + Sync {
    /// AES variant of the imported key.
    fn key_size(&self) -> KeySize;

    /// Encrypts `data` in place, each 16-byte block independently.
    ///
    /// `data` must be a non-empty multiple of the block size. Returns the
    /// number of bytes written.
    fn encrypt_blocks(&self, data: &mut [u8]) -> Result<usize>;
}

/// Which provider implementation to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// In-tree FIPS-197 implementation from `aes-core`.
    #[default]
    Software,
    /// RustCrypto `aes` crate (uses AES-NI / ARMv8 when the CPU has them).
    RustCrypto,
}

impl ProviderKind {
    /// Opens a fresh instance of the provider.
    pub fn open(self) -> Result<Box<dyn BlockProvider>> {
        Ok(match self {
            Self::Software => Box::new(SoftwareProvider),
            Self::RustCrypto => Box::new(RustCryptoProvider),
        })
    }

    /// Same value the opened provider reports from [`BlockProvider::name`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Software => software::NAME,
            Self::RustCrypto => rustcrypto::NAME,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) fn check_block_aligned(len: usize) -> Result<()> {
    if len == 0 {
        Err(CipherError::EmptyInput)
    } else if len % BLOCK_LEN != 0 {
        Err(CipherError::UnalignedInput(len))
    } else {
        Ok(())
    }
}
