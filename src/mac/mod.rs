//! Message authentication building blocks.
//!
//! This module holds the universal hash used by the Galois/Counter mode.
//! It is a keyed accumulator, not a complete MAC: on its own GHASH offers
//! no security, and it must be combined with an encrypted mask as done in
//! [`crate::encryption::gcm`].

pub mod ghash;

pub use ghash::{GHash, gf128_mul};
