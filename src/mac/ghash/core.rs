use cfg_if::cfg_if;
use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::field::FieldElement;
use crate::cipher::{BLOCK_SIZE, Block};

cfg_if! {
    if #[cfg(feature = "speed")] {
        use super::table::MulTable as HashKey;
    } else {
        use std::ops::Mul;
        use super::field::FieldElement as HashKey;
    }
}

/// Streaming GHASH accumulator.
///
/// Holds the hash subkey `H` and the running value `S`, and folds input
/// into it 16 bytes at a time:
///
/// ```text
/// S = (S ^ block) * H
/// ```
///
/// Input may arrive in pieces of any size; bytes that do not complete a
/// block wait in an internal buffer until the next [`GHash::update`] fills
/// it, or until [`GHash::pad`] zero-pads and folds it at the end of a
/// section. Feeding a section in many calls therefore gives the same result
/// as feeding it in one.
///
/// The accumulator never reorders blocks: every fold depends on the
/// previous value of `S`.
///
/// # Security
///
/// `H`, the accumulator and any buffered input are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct GHash {
    /// Hash subkey, or its table of multiples under `speed`.
    key: HashKey,

    /// Running accumulator `S`.
    acc: FieldElement,

    /// Bytes of an incomplete block.
    buffer: Block,

    /// Number of valid bytes in `buffer`.
    buffered: usize,
}

impl GHash {
    /// Creates an accumulator for subkey `h`, starting from zero.
    pub fn new(h: &Block) -> Self {
        Self {
            key: HashKey::from(FieldElement::from_block(h)),
            acc: FieldElement::ZERO,
            buffer: [0u8; BLOCK_SIZE],
            buffered: 0,
        }
    }

    /// Absorbs `data`, buffering any trailing partial block.
    pub fn update(&mut self, mut data: &[u8]) {
        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK_SIZE {
                return;
            }

            let block = self.buffer;
            self.fold(&block);
            self.buffered = 0;
        }

        let mut chunks = data.chunks_exact(BLOCK_SIZE);
        for chunk in chunks.by_ref() {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            self.fold(&block);
        }

        let rest = chunks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Zero-pads and folds a pending partial block, if any.
    ///
    /// Call this at the end of every section (nonce, AAD, ciphertext) so the
    /// next section starts on a block boundary.
    pub fn pad(&mut self) {
        if self.buffered == 0 {
            return;
        }

        let mut block = [0u8; BLOCK_SIZE];
        block[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        self.fold(&block);

        self.buffer.zeroize();
        self.buffered = 0;
    }

    /// Absorbs `data` as a complete section: [`update`](Self::update)
    /// followed by [`pad`](Self::pad).
    pub fn update_padded(&mut self, data: &[u8]) {
        self.update(data);
        self.pad();
    }

    /// Folds one full block directly.
    ///
    /// Any pending partial block is padded and folded first, so block
    /// boundaries are never straddled.
    pub fn update_block(&mut self, block: &Block) {
        self.pad();
        self.fold(block);
    }

    /// Returns the accumulator over every block folded so far.
    ///
    /// Bytes still waiting in the partial-block buffer are not included.
    pub fn state(&self) -> Block {
        self.acc.to_block()
    }

    /// Pads any pending input and returns the final accumulator.
    pub fn finalize(mut self) -> Block {
        self.pad();
        self.acc.to_block()
    }

    #[inline]
    fn fold(&mut self, block: &Block) {
        let x = self.acc + FieldElement::from_block(block);
        self.acc = self.key.mul(x);
    }
}

impl fmt::Debug for GHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GHash")
            .field("buffered", &self.buffered)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: Block = [
        0x66, 0xe9, 0x4b, 0xd4, 0xef, 0x8a, 0x2c, 0x3b, 0x88, 0x4c, 0xfa, 0x59, 0xca, 0x34, 0x2b,
        0x2e,
    ];

    #[test]
    fn starts_at_zero() {
        assert_eq!(GHash::new(&H).state(), [0u8; BLOCK_SIZE]);
        assert_eq!(GHash::new(&H).finalize(), [0u8; BLOCK_SIZE]);
    }

    #[test]
    fn partial_input_waits_for_block_boundary() {
        let mut g = GHash::new(&H);
        g.update(&[0xaa; 7]);
        assert_eq!(g.state(), [0u8; BLOCK_SIZE]);
        g.update(&[0xaa; 9]);
        assert_ne!(g.state(), [0u8; BLOCK_SIZE]);
    }

    #[test]
    fn split_updates_match_single_update() {
        let data: Vec<u8> = (0..100u8).collect();

        let mut whole = GHash::new(&H);
        whole.update_padded(&data);

        for split in [0usize, 1, 15, 16, 17, 33, 99, 100] {
            let mut parts = GHash::new(&H);
            parts.update(&data[..split]);
            parts.update(&data[split..]);
            parts.pad();
            assert_eq!(parts.state(), whole.state(), "split at {split}");
        }
    }

    #[test]
    fn padding_is_zero_fill() {
        let mut short = GHash::new(&H);
        short.update_padded(&[1, 2, 3]);

        let mut block = [0u8; BLOCK_SIZE];
        block[..3].copy_from_slice(&[1, 2, 3]);
        let mut full = GHash::new(&H);
        full.update_block(&block);

        assert_eq!(short.state(), full.state());
    }

    #[test]
    fn empty_section_folds_nothing() {
        let mut g = GHash::new(&H);
        g.update_padded(&[]);
        g.pad();
        assert_eq!(g.state(), [0u8; BLOCK_SIZE]);
    }
}
