//! Bit-exact software SM4 backend.
//!
//! This is the baseline every other backend is measured against: the round
//! transform substitutes each byte through the S-box and then applies the
//! linear diffusion layer, exactly as written in the algorithm description.

use super::consts::{ROUNDS, SBOX};
use super::{load_words, store_reversed};
use crate::cipher::Block;

/// Linear diffusion layer `L(s) = s ^ (s <<< 2) ^ (s <<< 10) ^ (s <<< 18) ^ (s <<< 24)`.
#[inline(always)]
pub(crate) const fn linear(s: u32) -> u32 {
    s ^ s.rotate_left(2) ^ s.rotate_left(10) ^ s.rotate_left(18) ^ s.rotate_left(24)
}

/// Byte-wise S-box substitution (the non-linear layer τ).
#[inline(always)]
fn substitute(x: u32) -> u32 {
    let b = x.to_be_bytes();
    u32::from_be_bytes([
        SBOX[b[0] as usize],
        SBOX[b[1] as usize],
        SBOX[b[2] as usize],
        SBOX[b[3] as usize],
    ])
}

/// The round transform `T = L ∘ τ`.
#[inline(always)]
pub fn round_transform(x: u32) -> u32 {
    linear(substitute(x))
}

/// Encrypts one block under an expanded key schedule.
pub fn encrypt_block(rk: &[u32; ROUNDS], block: &Block) -> Block {
    let mut x = load_words(block);

    for (i, &k) in rk.iter().enumerate() {
        let t = x[(i + 1) % 4] ^ x[(i + 2) % 4] ^ x[(i + 3) % 4] ^ k;
        x[i % 4] ^= round_transform(t);
    }

    store_reversed(&x)
}
