//! Key types for AES-128/192/256.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::Block;

/// Upper bound on round keys (AES-256 uses 14 rounds plus the initial whitening key).
const MAX_ROUND_KEYS: usize = 15;

/// The three key sizes AES defines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 128-bit key, 10 rounds.
    Aes128,
    /// 192-bit key, 12 rounds.
    Aes192,
    /// 256-bit key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Maps a key length in bytes to its key size, rejecting anything but 16, 24 or 32.
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(Self::Aes128),
            24 => Some(Self::Aes192),
            32 => Some(Self::Aes256),
            _ => None,
        }
    }

    /// Key length in bytes.
    pub const fn len(self) -> usize {
        self.words() * 4
    }

    /// Key length in 32-bit words (`Nk`).
    pub const fn words(self) -> usize {
        match self {
            Self::Aes128 => 4,
            Self::Aes192 => 6,
            Self::Aes256 => 8,
        }
    }

    /// Number of cipher rounds (`Nr`).
    pub const fn rounds(self) -> usize {
        self.words() + 6
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AES-{}", self.len() * 8)
    }
}

/// Returned when key material is not 16, 24 or 32 bytes long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidKeyLength(pub usize);

impl fmt::Display for InvalidKeyLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid AES key length {} (expected 16, 24 or 32)", self.0)
    }
}

impl std::error::Error for InvalidKeyLength {}

/// Owned AES key material. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AesKey {
    bytes: [u8; 32],
    #[zeroize(skip)]
    size: KeySize,
}

impl AesKey {
    /// Copies `key` into a new key, validating its length.
    pub fn new(key: &[u8]) -> Result<Self, InvalidKeyLength> {
        let size = KeySize::from_len(key.len()).ok_or(InvalidKeyLength(key.len()))?;
        let mut bytes = [0u8; 32];
        bytes[..key.len()].copy_from_slice(key);
        Ok(Self { bytes, size })
    }

    /// Key size.
    pub fn size(&self) -> KeySize {
        self.size
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.size.len()]
    }
}

impl fmt::Debug for AesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesKey").field("size", &self.size).finish_non_exhaustive()
    }
}

/// Expanded round keys. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys {
    keys: [Block; MAX_ROUND_KEYS],
    #[zeroize(skip)]
    size: KeySize,
}

impl RoundKeys {
    pub(crate) fn from_parts(keys: [Block; MAX_ROUND_KEYS], size: KeySize) -> Self {
        Self { keys, size }
    }

    /// Key size the schedule was expanded from.
    pub fn size(&self) -> KeySize {
        self.size
    }

    /// Number of cipher rounds.
    pub fn rounds(&self) -> usize {
        self.size.rounds()
    }

    /// Returns the round key at the requested index (`0..=rounds()`).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.keys[round]
    }
}

impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundKeys").field("size", &self.size).finish_non_exhaustive()
    }
}
