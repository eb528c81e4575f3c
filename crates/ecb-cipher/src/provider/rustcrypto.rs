use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};
use aes_core::{KeySize, BLOCK_LEN};

use super::{check_block_aligned, BlockProvider, KeyHandle};
use crate::error::{CipherError, Result};

pub(super) const NAME: &str = "rustcrypto";

/// Provider backed by the RustCrypto `aes` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoProvider;

impl BlockProvider for RustCryptoProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn import_key(&self, key: &[u8]) -> Result<Box<dyn KeyHandle>> {
        let size = KeySize::from_len(key.len()).ok_or(CipherError::InvalidKeyLength(key.len()))?;
        let init_failed = |e: aes::cipher::InvalidLength| CipherError::Provider {
            provider: NAME,
            reason: format!("AES key init: {e}"),
        };
        let cipher = match size {
            KeySize::Aes128 => {
                RustCryptoKey::Aes128(Aes128::new_from_slice(key).map_err(init_failed)?)
            }
            KeySize::Aes192 => {
                RustCryptoKey::Aes192(Aes192::new_from_slice(key).map_err(init_failed)?)
            }
            KeySize::Aes256 => {
                RustCryptoKey::Aes256(Aes256::new_from_slice(key).map_err(init_failed)?)
            }
        };
        Ok(Box::new(cipher))
    }
}

enum RustCryptoKey {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl RustCryptoKey {
    fn encrypt_with<C: BlockEncrypt>(cipher: &C, data: &mut [u8]) {
        for chunk in data.chunks_exact_mut(BLOCK_LEN) {
            cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
        }
    }
}

impl KeyHandle for RustCryptoKey {
    fn key_size(&self) -> KeySize {
        match self {
            Self::Aes128(_) => KeySize::Aes128,
            Self::Aes192(_) => KeySize::Aes192,
            Self::Aes256(_) => KeySize::Aes256,
        }
    }

    fn encrypt_blocks(&self, data: &mut [u8]) -> Result<usize> {
        check_block_aligned(data.len())?;
        match self {
            Self::Aes128(cipher) => Self::encrypt_with(cipher, data),
            Self::Aes192(cipher) => Self::encrypt_with(cipher, data),
            Self::Aes256(cipher) => Self::encrypt_with(cipher, data),
        }
        Ok(data.len())
    }
}
