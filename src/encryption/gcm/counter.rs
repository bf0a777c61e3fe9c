//! Counter block derivation and keystream generation for GCM.
//!
//! The pre-counter block `J0` is derived once per nonce. Data block `n`
//! (counting from 1) is encrypted with the keystream `E(K, inc32^n(J0))`,
//! where `inc32` increments only the last 32 bits of the block, big-endian,
//! wrapping modulo 2^32 without carrying into the first 96 bits.
//!
//! Keystream blocks depend only on `J0` and `n`, so they can be produced in
//! any order; [`keystream_block`] exposes that directly.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cipher::{BLOCK_SIZE, Block, BlockCipher};
use crate::mac::GHash;

/// Nonce length that takes the direct `J0 = nonce || 0^31 || 1` path.
pub const NONCE_SIZE: usize = 12;

/// Derives the pre-counter block `J0` from a nonce.
///
/// - 12-byte nonce: `J0 = nonce || 00 00 00 01`
/// - any other length: `J0 = GHASH_H(nonce || 0-pad || 0^64 || [len(nonce) in bits]_64)`
///
/// The caller guarantees `nonce` is non-empty and its bit length fits in
/// 64 bits.
pub fn derive_j0(h: &Block, nonce: &[u8]) -> Block {
    if nonce.len() == NONCE_SIZE {
        let mut j0 = [0u8; BLOCK_SIZE];
        j0[..NONCE_SIZE].copy_from_slice(nonce);
        j0[BLOCK_SIZE - 1] = 1;
        return j0;
    }

    let mut len_block = [0u8; BLOCK_SIZE];
    len_block[8..].copy_from_slice(&(nonce.len() as u64 * 8).to_be_bytes());

    let mut ghash = GHash::new(h);
    ghash.update_padded(nonce);
    ghash.update_block(&len_block);
    ghash.finalize()
}

/// Returns `inc32^n(j0)`: `j0` with its last four bytes, read as a
/// big-endian `u32`, advanced by `n` modulo 2^32.
#[inline]
pub fn counter_block(j0: &Block, n: u32) -> Block {
    let mut block = *j0;
    let low = u32::from_be_bytes([j0[12], j0[13], j0[14], j0[15]]).wrapping_add(n);
    block[12..].copy_from_slice(&low.to_be_bytes());
    block
}

/// Keystream for data block `n` (1-based).
#[inline]
pub fn keystream_block<C: BlockCipher>(cipher: &C, j0: &Block, n: u32) -> Block {
    cipher.encrypt_block(&counter_block(j0, n))
}

/// Sequential keystream generator for one message.
///
/// Owns its own copy of `J0`, kept apart from the authentication
/// accumulator: the tag mask `E(K, J0)` is computed from it at finalize
/// time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct Ctr32 {
    j0: Block,
    /// Number of keystream blocks produced so far.
    blocks: u32,
}

impl Ctr32 {
    pub(crate) fn new(j0: Block) -> Self {
        Self { j0, blocks: 0 }
    }

    /// The pre-counter block this generator was created with.
    pub(crate) fn j0(&self) -> &Block {
        &self.j0
    }

    /// Produces the keystream for the next data block.
    pub(crate) fn next_keystream<C: BlockCipher>(&mut self, cipher: &C) -> Block {
        self.blocks = self.blocks.wrapping_add(1);
        keystream_block(cipher, &self.j0, self.blocks)
    }
}
