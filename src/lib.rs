//! SM4-GCM authenticated encryption for Nebula
//!
//! This crate provides the SM4 block cipher, the GHASH universal hash and
//! the Galois/Counter Mode AEAD built from them.
//!
//! The focus is on **bit-exact correctness and auditability**: every
//! accelerated path has a straightforward reference counterpart it is
//! tested against, and the AEAD state machine refuses out-of-order use
//! instead of guessing.
//!
//! # Module overview
//!
//! - `cipher`  
//!   The [`cipher::BlockCipher`] seam and the SM4 implementation: key
//!   schedule and single-block encryption, with a bit-serial baseline
//!   backend and a table-driven one.
//!
//! - `mac`  
//!   GHASH over GF(2^128): field multiplication and the streaming
//!   accumulator that authenticates associated data and ciphertext.
//!
//! - `encryption`  
//!   The GCM construction: nonce to pre-counter block derivation, 32-bit
//!   counter keystream, the streaming [`encryption::gcm::Gcm`] context and
//!   one-shot encrypt/decrypt.
//!
//! - `primitives`  
//!   Constant-time comparison used for tag verification.
//!
//! # Quick start
//!
//! ```
//! use sm4gcm::encryption::gcm;
//!
//! let key = [0u8; 16];
//! let nonce = [1u8; 12];
//! let message = b"attack at dawn";
//!
//! let mut ciphertext = [0u8; 14];
//! let mut tag = [0u8; 16];
//! gcm::encrypt(&key, &nonce, b"", message, &mut ciphertext, &mut tag).unwrap();
//!
//! let mut recovered = [0u8; 14];
//! gcm::decrypt(&key, &nonce, b"", &ciphertext, &tag, &mut recovered).unwrap();
//! assert_eq!(&recovered, message);
//! ```
//!
//! # Features
//!
//! - `speed`: select the table-driven SM4 and GHASH backends. Output is
//!   identical; the tables trade cache-timing resistance for throughput.
//!
//! # Design goals
//!
//! - No heap allocations in core primitives
//! - Key material wiped on drop
//! - Constant-time tag verification
//! - Explicit errors for every misuse, no panics on caller input
//!
//! This crate does not negotiate, store or transport keys, and adds no
//! framing on top of the raw AEAD output.

mod error;

pub mod cipher;
pub mod encryption;
pub mod mac;
pub mod primitives;

pub use error::{GcmError, Result};
