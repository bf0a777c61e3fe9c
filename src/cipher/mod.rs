//! 128-bit block ciphers used as the keystream source of the AEAD modes.
//!
//! Counter mode only ever runs the forward direction of the cipher, so the
//! [`BlockCipher`] contract exposes key setup and single-block encryption and
//! nothing else. Any cipher with a 16-byte block can be plugged into
//! [`crate::encryption::gcm::Gcm`] through this trait.
//!
//! # Provided ciphers
//!
//! - [`sm4`]: the SM4 block cipher (GB/T 32907), with a bit-exact software
//!   baseline and a table-driven backend selected by the `speed` feature.

use crate::error::Result;

pub mod sm4;

pub use sm4::Sm4;

/// Size in bytes of every block handled by this module.
pub const BLOCK_SIZE: usize = 16;

/// A single cipher block.
pub type Block = [u8; BLOCK_SIZE];

/// A keyed 128-bit block cipher, forward direction only.
///
/// Implementations must be deterministic: the same key and input block
/// always produce the same output block, whatever backend is in use.
pub trait BlockCipher: Sized {
    /// Required key length in bytes.
    const KEY_SIZE: usize;

    /// Expands `key` into a ready-to-use cipher instance.
    ///
    /// Fails with [`crate::GcmError::InvalidKeyLength`] when
    /// `key.len() != Self::KEY_SIZE`.
    fn new_from_slice(key: &[u8]) -> Result<Self>;

    /// Encrypts one block.
    fn encrypt_block(&self, block: &Block) -> Block;
}
