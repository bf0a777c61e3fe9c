//! Arithmetic in GF(2^128) as used by GHASH.
//!
//! Elements are 16-byte blocks. The field is defined by the polynomial
//! `x^128 + x^7 + x^2 + x + 1` with the bit-reflected convention of GCM:
//! the most significant bit of the first byte is the coefficient of `x^0`.
//! Under that convention, holding a block as a big-endian `u128`,
//! multiplication by `x` is a right shift by one and reduction XORs the
//! constant `0xE1 || 0^120` into the top.
//!
//! ## Design principles
//!
//! - Addition is XOR, the additive identity is the zero block
//! - Multiplication is the bit-serial shift-and-add reference algorithm
//! - No tables, no heap, no secret-dependent memory access
//!
//! The bit-serial multiply is the baseline; any faster multiplier in this
//! crate must agree with it on every input.

use std::ops::{Add, Mul};

use zeroize::Zeroize;

use crate::cipher::Block;

/// Reduction constant `R = 11100001 || 0^120`.
pub(crate) const R: u128 = 0xe1 << 120;

/// An element of GF(2^128).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroize)]
pub(crate) struct FieldElement(pub(crate) u128);

impl FieldElement {
    /// The additive identity.
    pub(crate) const ZERO: Self = FieldElement(0);

    /// Interprets a 16-byte block as a field element.
    #[inline]
    pub(crate) fn from_block(block: &Block) -> Self {
        Self(u128::from_be_bytes(*block))
    }

    /// Serializes the element back into a block.
    #[inline]
    pub(crate) fn to_block(self) -> Block {
        self.0.to_be_bytes()
    }

    /// Multiplies by `x`: one right shift, reducing if a bit falls off.
    ///
    /// The reduction is applied through a mask rather than a branch.
    #[inline(always)]
    pub(crate) const fn mul_x(self) -> Self {
        let carry = (self.0 & 1).wrapping_neg();
        Self((self.0 >> 1) ^ (R & carry))
    }
}

impl Add for FieldElement {
    type Output = Self;

    /// Field addition (XOR).
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Mul for FieldElement {
    type Output = Self;

    /// Bit-serial multiplication.
    ///
    /// Walks the bits of `self` from the most significant down, adding the
    /// running multiple `v = rhs * x^i` whenever the bit is set.
    fn mul(self, rhs: Self) -> Self {
        let mut z = 0u128;
        let mut v = rhs;

        for i in (0..128).rev() {
            let bit = ((self.0 >> i) & 1).wrapping_neg();
            z ^= v.0 & bit;
            v = v.mul_x();
        }

        Self(z)
    }
}
