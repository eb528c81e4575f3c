//! Cipher construction settings.

use crate::provider::ProviderKind;

/// Configuration used when building an [`AesBlockCipher`](crate::AesBlockCipher).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CipherConfig {
    /// Provider that performs the block transform.
    pub provider: ProviderKind,
}

impl CipherConfig {
    /// Configuration selecting an explicit provider.
    pub fn with_provider(provider: ProviderKind) -> Self {
        Self { provider }
    }
}
