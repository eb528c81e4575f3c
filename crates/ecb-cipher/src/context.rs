//! The AES-ECB cipher context.

use std::fmt;

use aes_core::KeySize;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::config::CipherConfig;
use crate::error::{CipherError, Result};
use crate::provider::{check_block_aligned, BlockProvider, KeyHandle};
use crate::region::Region;

/// An AES key imported into an open provider, ready to encrypt blocks in ECB mode.
///
/// A value of this type always holds both a provider and a key; construction
/// either succeeds completely or returns an error with everything it acquired
/// already released. The key cannot be changed after construction.
///
/// Encryption takes `&self` and keeps no chaining state, so the same plaintext
/// block always encrypts to the same ciphertext block under one key.
pub struct AesBlockCipher {
    // Field order matters: the key must be dropped before its provider.
    key: Box<dyn KeyHandle>,
    provider: Box<dyn BlockProvider>,
}

impl AesBlockCipher {
    /// Creates a cipher with the default configuration from
    /// `key[key_offset..key_offset + key_length]`.
    pub fn create(key: &[u8], key_offset: usize, key_length: usize) -> Result<Self> {
        Self::with_config(&CipherConfig::default(), key, key_offset, key_length)
    }

    /// Creates a cipher from the whole of `key`.
    pub fn new(key: &[u8]) -> Result<Self> {
        Self::create(key, 0, key.len())
    }

    /// Creates a cipher from a key region using the provider named in `config`.
    ///
    /// The key length is checked before the region bounds, and both before the
    /// provider is opened.
    pub fn with_config(
        config: &CipherConfig,
        key: &[u8],
        key_offset: usize,
        key_length: usize,
    ) -> Result<Self> {
        if KeySize::from_len(key_length).is_none() {
            return Err(CipherError::InvalidKeyLength(key_length));
        }
        let key = Region::new(key_offset, key_length).slice(key)?;
        Self::with_provider(config.provider.open()?, key)
    }

    /// Imports `key` into an already opened provider.
    ///
    /// The provider is dropped if the import fails.
    pub fn with_provider(provider: Box<dyn BlockProvider>, key: &[u8]) -> Result<Self> {
        if KeySize::from_len(key.len()).is_none() {
            return Err(CipherError::InvalidKeyLength(key.len()));
        }
        let key = provider.import_key(key)?;
        debug!(
            provider = provider.name(),
            key_size = %key.key_size(),
            "created AES-ECB context"
        );
        Ok(Self { key, provider })
    }

    /// AES variant selected by the key length.
    pub fn key_size(&self) -> KeySize {
        self.key.key_size()
    }

    /// Name of the provider holding the key.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Encrypts `input[input_offset..input_offset + input_length]` into `output`
    /// starting at `output_offset`.
    ///
    /// Returns the number of bytes written, which equals `input_length`.
    pub fn encrypt_block(
        &self,
        input: &[u8],
        input_offset: usize,
        input_length: usize,
        output: &mut [u8],
        output_offset: usize,
    ) -> Result<usize> {
        let input = Region::new(input_offset, input_length).slice(input)?;
        let output = Region::new(output_offset, input_length).slice_mut(output)?;
        self.encrypt(input, output)
    }

    /// Encrypts `input` into `output`; both must have the same length.
    ///
    /// `output` is left untouched unless the whole call succeeds.
    pub fn encrypt(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        if input.len() != output.len() {
            return Err(CipherError::LengthMismatch {
                input: input.len(),
                output: output.len(),
            });
        }
        check_block_aligned(input.len())?;
        let mut scratch = Zeroizing::new(input.to_vec());
        let written = self.encrypt_in_place(&mut scratch)?;
        output.copy_from_slice(&scratch);
        Ok(written)
    }

    /// Encrypts `data` in place, for callers whose input and output overlap.
    pub fn encrypt_in_place(&self, data: &mut [u8]) -> Result<usize> {
        trace!(len = data.len(), "encrypt");
        self.key.encrypt_blocks(data)
    }

    /// Destroys the key and then the provider.
    ///
    /// Dropping the value has the same effect; this form makes the end of the
    /// lifetime explicit at the call site.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for AesBlockCipher {
    fn drop(&mut self) {
        debug!(provider = self.provider.name(), "released AES-ECB context");
    }
}

impl fmt::Debug for AesBlockCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesBlockCipher")
            .field("provider", &self.provider.name())
            .field("key_size", &self.key.key_size())
            .finish()
    }
}
