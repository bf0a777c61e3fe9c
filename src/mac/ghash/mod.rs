//! GHASH universal hash over GF(2^128).
//!
//! The implementation is split into three layers:
//!
//! - [`core`]: the public streaming accumulator [`GHash`], which handles
//!   block iteration, zero padding of partial blocks and section boundaries.
//! - `field`: field elements and the bit-serial reference multiplication.
//! - `table`: a 4-bit table multiplier, bit-identical to `field`, used when
//!   the `speed` feature is enabled.
//!
//! The field and table layers are private: all hashing goes through
//! [`GHash`], and standalone products through [`gf128_mul`].

use crate::cipher::Block;

pub mod core;
pub(crate) mod field;
#[cfg_attr(not(feature = "speed"), allow(dead_code))]
pub(crate) mod table;

pub use self::core::GHash;
use field::FieldElement;

/// Multiplies two blocks as elements of GF(2^128).
///
/// This is the bit-serial reference product: commutative, with the zero
/// block as the additive identity and `0x80 || 0^120` as the multiplicative
/// one.
pub fn gf128_mul(x: &Block, y: &Block) -> Block {
    (FieldElement::from_block(x) * FieldElement::from_block(y)).to_block()
}
