//! Table-driven GF(2^128) multiplication by a fixed `H`.
//!
//! GHASH always multiplies by the same subkey, so `H` can be expanded once
//! into the sixteen products `n(x) * H` for every 4-bit polynomial `n`. A
//! full product then costs 32 lookups, 32 four-bit shifts and a reduction
//! lookup per step (Shoup's 4-bit method):
//!
//! ```text
//! Z = 0
//! for each nibble n of X, last to first:
//!     Z = Z * x^4 + M[n]
//! ```
//!
//! `Z * x^4` shifts four bits out of the low end; since multiplication by
//! `x^4` is linear, their reduction is read from [`REDUCE`], a constant
//! table of the sixteen possible overflows.
//!
//! The result is bit-identical to [`FieldElement`]'s bit-serial multiply.
//! Lookups are indexed by the data being hashed, so this multiplier is not
//! free of cache-timing leakage.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::field::FieldElement;

const fn mul_x4(v: u128) -> u128 {
    FieldElement(v).mul_x().mul_x().mul_x().mul_x().0
}

const fn build_reduce() -> [u128; 16] {
    let mut table = [0u128; 16];
    let mut i = 0;
    while i < 16 {
        table[i] = mul_x4(i as u128);
        i += 1;
    }
    table
}

/// Reduction of the four bits shifted out by one `x^4` step.
static REDUCE: [u128; 16] = build_reduce();

/// Precomputed multiples of a fixed field element.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct MulTable {
    m: [u128; 16],
}

impl MulTable {
    /// Expands `h` into its sixteen 4-bit multiples.
    pub(crate) fn new(h: FieldElement) -> Self {
        let mut m = [0u128; 16];

        // Nibble bit 3 is the x^0 coefficient, bit 0 the x^3 one.
        m[8] = h.0;
        m[4] = h.mul_x().0;
        m[2] = h.mul_x().mul_x().0;
        m[1] = h.mul_x().mul_x().mul_x().0;

        for i in [3usize, 5, 6, 7, 9, 10, 11, 12, 13, 14, 15] {
            let high = 1 << (usize::BITS - 1 - i.leading_zeros());
            m[i] = m[high] ^ m[i ^ high];
        }

        Self { m }
    }

    /// Returns `x * H`.
    #[inline]
    pub(crate) fn mul(&self, x: FieldElement) -> FieldElement {
        let mut z = 0u128;

        for k in (0..32).rev() {
            let nibble = ((x.0 >> (124 - 4 * k)) & 0xf) as usize;
            z = (z >> 4) ^ REDUCE[(z & 0xf) as usize] ^ self.m[nibble];
        }

        FieldElement(z)
    }
}

impl From<FieldElement> for MulTable {
    fn from(h: FieldElement) -> Self {
        Self::new(h)
    }
}
