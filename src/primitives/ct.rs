/// Constant-time comparison utilities.
///
/// Tag verification must not reveal where the first mismatching byte is,
/// otherwise a forger can recover a valid tag one byte at a time. Types
/// implementing this trait compare every byte regardless of earlier
/// differences.
pub trait ConstantTimeEq {
    /// Returns `true` if `self == other`.
    ///
    /// The running time depends only on the lengths of the operands, never
    /// on their contents.
    fn ct_eq(&self, other: &Self) -> bool;
}

impl ConstantTimeEq for [u8] {
    /// Constant-time equality for byte slices.
    ///
    /// Slices of different length compare unequal immediately; lengths are
    /// public in every protocol this crate serves. Otherwise all bytes are
    /// XORed and accumulated before the single final test.
    #[inline(never)]
    fn ct_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let diff = self
            .iter()
            .zip(other)
            .map(|(a, b)| a ^ b)
            .fold(0u8, |acc, v| acc | v);

        std::hint::black_box(diff) == 0
    }
}

impl<const N: usize> ConstantTimeEq for [u8; N] {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> bool {
        self[..].ct_eq(&other[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_slices_compare_equal() {
        assert!([1u8, 2, 3][..].ct_eq(&[1, 2, 3][..]));
        assert!([0u8; 0][..].ct_eq(&[][..]));
    }

    #[test]
    fn any_single_difference_is_detected() {
        let a = [0x5au8; 16];
        for i in 0..16 {
            for bit in 0..8 {
                let mut b = a;
                b[i] ^= 1 << bit;
                assert!(!a.ct_eq(&b));
            }
        }
    }

    #[test]
    fn length_mismatch_is_unequal() {
        assert!(![1u8, 2][..].ct_eq(&[1, 2, 3][..]));
    }
}
