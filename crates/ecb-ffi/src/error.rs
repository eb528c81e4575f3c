use ecb_cipher::CipherError;

/// Failures at the C boundary; each one collapses to the caller-visible sentinel.
#[derive(Debug, thiserror::Error)]
pub(crate) enum AbiError {
    #[error("null {0} pointer")]
    NullPointer(&'static str),

    #[error("handle does not refer to a live context")]
    InvalidHandle,

    #[error("buffer span of {0} bytes is too large")]
    SpanTooLarge(usize),

    #[error("region {offset}+{len} overflows the address space")]
    SpanOverflow { offset: usize, len: usize },

    #[error(transparent)]
    Cipher(#[from] CipherError),
}
