//! Block representation helpers.

/// Size of an AES block in bytes.
pub const BLOCK_LEN: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_LEN];

/// XORs `rhs` into `dst`.
#[inline]
pub(crate) fn xor_into(dst: &mut Block, rhs: &Block) {
    dst.iter_mut().zip(rhs).for_each(|(d, r)| *d ^= r);
}
