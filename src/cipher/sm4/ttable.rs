//! Table-driven SM4 backend.
//!
//! Because the diffusion layer `L` is linear over XOR, the round transform
//! splits into four independent byte lookups:
//!
//! ```text
//! T(a0 || a1 || a2 || a3) = T0[a0] ^ T1[a1] ^ T2[a2] ^ T3[a3]
//! Tj[a] = L(S(a) << (24 - 8j))
//! ```
//!
//! The four tables are computed at compile time from the S-box, so the
//! output is bit-identical to [`super::soft`].
//!
//! Lookups are indexed by secret data. This backend is faster but not
//! resistant to cache-timing observation.

use super::consts::{ROUNDS, SBOX};
use super::soft::linear;
use super::{load_words, store_reversed};
use crate::cipher::Block;

const fn build_table(shift: u32) -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = linear((SBOX[i] as u32) << shift);
        i += 1;
    }
    table
}

static T0: [u32; 256] = build_table(24);
static T1: [u32; 256] = build_table(16);
static T2: [u32; 256] = build_table(8);
static T3: [u32; 256] = build_table(0);

/// The round transform `T`, computed by table lookup.
#[inline(always)]
pub fn round_transform(x: u32) -> u32 {
    T0[(x >> 24) as usize]
        ^ T1[((x >> 16) & 0xff) as usize]
        ^ T2[((x >> 8) & 0xff) as usize]
        ^ T3[(x & 0xff) as usize]
}

/// Encrypts one block under an expanded key schedule.
///
/// Four rounds per iteration, so the state words never have to be indexed
/// modulo 4.
pub fn encrypt_block(rk: &[u32; ROUNDS], block: &Block) -> Block {
    let [mut x0, mut x1, mut x2, mut x3] = load_words(block);

    for k in rk.chunks_exact(4) {
        x0 ^= round_transform(x1 ^ x2 ^ x3 ^ k[0]);
        x1 ^= round_transform(x2 ^ x3 ^ x0 ^ k[1]);
        x2 ^= round_transform(x3 ^ x0 ^ x1 ^ k[2]);
        x3 ^= round_transform(x0 ^ x1 ^ x2 ^ k[3]);
    }

    store_reversed(&[x0, x1, x2, x3])
}
