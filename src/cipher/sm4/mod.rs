//! SM4 block cipher.
//!
//! SM4 is a 128-bit block cipher with a 128-bit key and 32 rounds of an
//! unbalanced Feistel network. Only the encryption direction is provided;
//! counter-mode constructions never need the inverse.
//!
//! # Key schedule
//!
//! The round keys are derived as
//!
//! ```text
//! K[i]   = MK[i] ^ FK[i]                                 (i = 0..4)
//! rk[i]  = K[i] ^ T(K[i+1] ^ K[i+2] ^ K[i+3] ^ CK[i])     (i = 0..32)
//! ```
//!
//! **Deviation from GB/T 32907:** the standard uses a separate transform
//! `T'` (diffusion `s ^ (s <<< 13) ^ (s <<< 23)`) during key expansion. This
//! implementation uses the data-path transform `T` for both, which keeps it
//! interoperable with the deployed SM4-GCM peers it was written against but
//! means ciphertexts do **not** match other GB/T 32907 implementations for the
//! same key. The round function itself is standard: [`Sm4::from_round_keys`]
//! with a standard schedule reproduces the published test vectors.
//!
//! # Backends
//!
//! - [`soft`]: byte-wise S-box then linear layer (baseline, default)
//! - [`ttable`]: four precomputed 256-entry tables (`speed` feature)
//!
//! Both are always compiled and produce identical output; the feature only
//! chooses which one [`Sm4::encrypt_block`] dispatches to.

use cfg_if::cfg_if;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{BLOCK_SIZE, Block, BlockCipher};
use crate::error::{GcmError, Result};

pub(crate) mod consts;
pub mod soft;
pub mod ttable;

pub use consts::{KEY_SIZE, ROUNDS};
use consts::{CK, FK};

cfg_if! {
    if #[cfg(feature = "speed")] {
        use self::ttable as backend;
    } else {
        use self::soft as backend;
    }
}

/// An SM4 key schedule, ready to encrypt blocks.
///
/// The 32 round keys are derived once and never change. They are wiped from
/// memory when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sm4 {
    rk: [u32; ROUNDS],
}

impl Sm4 {
    /// Expands a 16-byte key.
    ///
    /// Returns [`GcmError::InvalidKeyLength`] for any other length.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key: &[u8; KEY_SIZE] = key
            .try_into()
            .map_err(|_| GcmError::InvalidKeyLength(key.len()))?;

        Ok(Self {
            rk: expand_key(key),
        })
    }

    /// Builds a cipher from an already expanded schedule.
    pub fn from_round_keys(rk: [u32; ROUNDS]) -> Self {
        Self { rk }
    }

    /// Returns the round keys.
    pub fn round_keys(&self) -> &[u32; ROUNDS] {
        &self.rk
    }

    /// Encrypts a single block with the active backend.
    #[inline]
    pub fn encrypt_block(&self, block: &Block) -> Block {
        backend::encrypt_block(&self.rk, block)
    }
}

impl BlockCipher for Sm4 {
    const KEY_SIZE: usize = KEY_SIZE;

    fn new_from_slice(key: &[u8]) -> Result<Self> {
        Self::new(key)
    }

    #[inline]
    fn encrypt_block(&self, block: &Block) -> Block {
        Sm4::encrypt_block(self, block)
    }
}

impl fmt::Debug for Sm4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sm4").finish_non_exhaustive()
    }
}

/// Derives the 32 round keys from a 16-byte key.
pub fn expand_key(key: &[u8; KEY_SIZE]) -> [u32; ROUNDS] {
    let mut k = load_words(key);
    for (word, fk) in k.iter_mut().zip(FK) {
        *word ^= fk;
    }

    let mut rk = [0u32; ROUNDS];
    for (i, ck) in CK.iter().enumerate() {
        let t = k[(i + 1) % 4] ^ k[(i + 2) % 4] ^ k[(i + 3) % 4] ^ ck;
        rk[i] = k[i % 4] ^ backend::round_transform(t);
        k[i % 4] = rk[i];
    }

    k.zeroize();
    rk
}

/// Loads a block as four big-endian words.
#[inline(always)]
pub(crate) fn load_words(block: &[u8; BLOCK_SIZE]) -> [u32; 4] {
    let mut x = [0u32; 4];
    for (word, chunk) in x.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    x
}

/// Stores the state words in reverse order (`x3 || x2 || x1 || x0`), each
/// big-endian. This is the final reverse transform `R` of SM4.
#[inline(always)]
pub(crate) fn store_reversed(x: &[u32; 4]) -> Block {
    let mut out = [0u8; BLOCK_SIZE];
    for (chunk, word) in out.chunks_exact_mut(4).zip(x.iter().rev()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}
