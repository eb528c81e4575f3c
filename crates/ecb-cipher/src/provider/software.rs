use aes_core::{encrypt_block_in_place, expand_key, AesKey, Block, KeySize, RoundKeys, BLOCK_LEN};

use super::{check_block_aligned, BlockProvider, KeyHandle};
use crate::error::Result;

pub(super) const NAME: &str = "software";

/// Provider backed by the in-tree `aes-core` engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareProvider;

impl BlockProvider for SoftwareProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn import_key(&self, key: &[u8]) -> Result<Box<dyn KeyHandle>> {
        let key = AesKey::new(key)?;
        Ok(Box::new(SoftwareKey {
            round_keys: expand_key(&key),
        }))
    }
}

struct SoftwareKey {
    round_keys: RoundKeys,
}

impl KeyHandle for SoftwareKey {
    fn key_size(&self) -> KeySize {
        self.round_keys.size()
    }

    fn encrypt_blocks(&self, data: &mut [u8]) -> Result<usize> {
        check_block_aligned(data.len())?;
        let mut state: Block = [0u8; BLOCK_LEN];
        for chunk in data.chunks_exact_mut(BLOCK_LEN) {
            state.copy_from_slice(chunk);
            encrypt_block_in_place(&mut state, &self.round_keys);
            chunk.copy_from_slice(&state);
        }
        state.fill(0);
        Ok(data.len())
    }
}
