//! AES key schedule and forward block encryption.

use crate::block::Block;
use crate::key::{AesKey, RoundKeys};
use crate::round::{add_round_key, mix_columns, shift_rows, sub_bytes};
use crate::sbox::sbox;

const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

/// Expands a key into `rounds + 1` round keys (FIPS-197 §5.2).
pub fn expand_key(key: &AesKey) -> RoundKeys {
    let size = key.size();
    let nk = size.words();
    let total = 4 * (size.rounds() + 1);

    let mut w = [0u32; 60];
    for (i, chunk) in key.as_bytes().chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in nk..total {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ (u32::from(RCON[i / nk - 1]) << 24);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - nk] ^ temp;
    }

    let mut keys = [[0u8; 16]; 15];
    for (round_key, words) in keys.iter_mut().zip(w[..total].chunks_exact(4)) {
        for (dst, word) in round_key.chunks_exact_mut(4).zip(words) {
            dst.copy_from_slice(&word.to_be_bytes());
        }
    }
    w.fill(0);

    RoundKeys::from_parts(keys, size)
}

/// Encrypts a block in place with pre-expanded round keys (FIPS-197 §5.1).
pub fn encrypt_block_in_place(state: &mut Block, round_keys: &RoundKeys) {
    let rounds = round_keys.rounds();

    add_round_key(state, round_keys.get(0));
    for round in 1..rounds {
        sub_bytes(state);
        shift_rows(state);
        mix_columns(state);
        add_round_key(state, round_keys.get(round));
    }
    sub_bytes(state);
    shift_rows(state);
    add_round_key(state, round_keys.get(rounds));
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;
    encrypt_block_in_place(&mut state, round_keys);
    state
}
