//! Process-wide cipher factory with an optional override hook.
//!
//! Embedders that want a different engine can install an override. It is asked
//! first for every new cipher; if it returns `None` the default provider is used.

use std::sync::Arc;

use aes_core::KeySize;
use parking_lot::RwLock;
use tracing::debug;

use crate::config::CipherConfig;
use crate::context::AesBlockCipher;
use crate::error::{CipherError, Result};
use crate::provider::ProviderKind;
use crate::region::Region;

/// Replacement factory; receives exactly the key bytes.
///
/// Returning `None` defers to the default provider.
pub type CreateAesOverride = Box<dyn Fn(&[u8]) -> Option<AesBlockCipher> + Send + Sync>;

struct FactoryState {
    override_fn: Option<Arc<dyn Fn(&[u8]) -> Option<AesBlockCipher> + Send + Sync>>,
    default_provider: ProviderKind,
}

static STATE: RwLock<FactoryState> = RwLock::new(FactoryState {
    override_fn: None,
    default_provider: ProviderKind::Software,
});

/// Installs (or with `None`, removes) the override factory.
pub fn set_override(override_fn: Option<CreateAesOverride>) {
    STATE.write().override_fn = override_fn.map(Arc::from);
}

/// Selects the provider used when no override produces a cipher.
pub fn set_default_provider(kind: ProviderKind) {
    debug!(provider = %kind, "default AES provider changed");
    STATE.write().default_provider = kind;
}

/// Provider used when no override produces a cipher.
pub fn default_provider() -> ProviderKind {
    STATE.read().default_provider
}

/// Creates a cipher from `key[key_offset..key_offset + key_length]`.
pub fn create_aes(key: &[u8], key_offset: usize, key_length: usize) -> Result<AesBlockCipher> {
    if KeySize::from_len(key_length).is_none() {
        return Err(CipherError::InvalidKeyLength(key_length));
    }
    // The override runs after the lock is released so it may call back in.
    let (override_fn, default_provider) = {
        let state = STATE.read();
        (state.override_fn.clone(), state.default_provider)
    };

    if let Some(create) = override_fn {
        let bytes = Region::new(key_offset, key_length).slice(key)?;
        if let Some(cipher) = create(bytes) {
            return Ok(cipher);
        }
        debug!("override declined, falling back to default provider");
    }

    AesBlockCipher::with_config(
        &CipherConfig::with_provider(default_provider),
        key,
        key_offset,
        key_length,
    )
}
