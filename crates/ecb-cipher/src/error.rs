//! Error type shared by every fallible cipher operation.

/// Why a create or encrypt call failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CipherError {
    /// Key length was not 16, 24 or 32 bytes.
    #[error("invalid AES key length {0} (expected 16, 24 or 32)")]
    InvalidKeyLength(usize),

    /// A signed offset or length from a foreign caller was below zero.
    #[error("negative {what}: {value}")]
    NegativeArgument {
        /// Which argument was negative.
        what: &'static str,
        /// The value as passed.
        value: i64,
    },

    /// The region does not fit inside its buffer, or its end overflows.
    #[error("region {offset}..{offset}+{len} exceeds buffer of {buffer_len} bytes")]
    OutOfBounds {
        /// First byte of the region.
        offset: usize,
        /// Region length.
        len: usize,
        /// Length of the buffer the region was taken from.
        buffer_len: usize,
    },

    /// `encrypt` was given input and output slices of different sizes.
    #[error("output length ({output}) does not match input length ({input})")]
    LengthMismatch {
        /// Input length in bytes.
        input: usize,
        /// Output length in bytes.
        output: usize,
    },

    /// Input is not a whole number of blocks.
    #[error("input length {0} is not a multiple of the 16-byte AES block")]
    UnalignedInput(usize),

    /// Input has zero length.
    #[error("input is empty")]
    EmptyInput,

    /// The provider refused or failed an operation.
    #[error("provider {provider}: {reason}")]
    Provider {
        /// Provider name.
        provider: &'static str,
        /// Provider-specific detail.
        reason: String,
    },
}

impl From<aes_core::InvalidKeyLength> for CipherError {
    fn from(err: aes_core::InvalidKeyLength) -> Self {
        Self::InvalidKeyLength(err.0)
    }
}

/// Result alias for cipher operations.
pub type Result<T> = std::result::Result<T, CipherError>;
