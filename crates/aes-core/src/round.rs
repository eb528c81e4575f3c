//! Forward AES round transformations over a column-major state.

use crate::block::{xor_into, Block};
use crate::sbox::sbox;

/// Applies SubBytes to the state in place.
#[inline]
pub(crate) fn sub_bytes(state: &mut Block) {
    state.iter_mut().for_each(|byte| *byte = sbox(*byte));
}

/// Rotates row `r` left by `r` positions.
#[inline]
pub(crate) fn shift_rows(state: &mut Block) {
    let src = *state;
    for col in 0..4 {
        for row in 1..4 {
            state[col * 4 + row] = src[((col + row) % 4) * 4 + row];
        }
    }
}

#[inline]
fn xtime(byte: u8) -> u8 {
    (byte << 1) ^ (0x1b * (byte >> 7))
}

/// MixColumns over all four columns.
#[inline]
pub(crate) fn mix_columns(state: &mut Block) {
    for column in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [column[0], column[1], column[2], column[3]];
        let all = a0 ^ a1 ^ a2 ^ a3;
        column[0] = a0 ^ all ^ xtime(a0 ^ a1);
        column[1] = a1 ^ all ^ xtime(a1 ^ a2);
        column[2] = a2 ^ all ^ xtime(a2 ^ a3);
        column[3] = a3 ^ all ^ xtime(a3 ^ a0);
    }
}

/// Adds (XORs) a round key into the state.
#[inline]
pub(crate) fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_into(state, round_key);
}
