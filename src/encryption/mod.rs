//! Authenticated encryption with associated data (AEAD).
//!
//! This module exposes the Galois/Counter Mode construction. The generic
//! engine works over any [`crate::cipher::BlockCipher`]; SM4-GCM is the
//! instantiation the crate is built around and gets the convenience
//! functions.
//!
//! # Notes
//!
//! - Confidentiality comes from the block cipher in counter mode.
//! - Integrity covers both the ciphertext and the associated data.
//! - Nonce reuse with the same key is catastrophic and must be avoided.

pub mod gcm;

/// SM4-GCM context type, re-exported for convenience.
pub use gcm::Sm4Gcm;
