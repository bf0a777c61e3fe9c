//! Galois/Counter Mode authenticated encryption.
//!
//! This module implements the GCM construction over any 128-bit block
//! cipher. It combines:
//!
//! - the block cipher in 32-bit counter mode for confidentiality
//! - GHASH over the associated data and the ciphertext for authentication
//!
//! ## Call sequence
//!
//! A [`Gcm`] context is created for one `(key, nonce)` pair and moves
//! through three phases:
//!
//! ```text
//! new ──► Aad ──(first data call)──► Data ──(finalize)──► Finalized
//! ```
//!
//! - [`Gcm::update_aad`] is only accepted in `Aad`.
//! - [`Gcm::encrypt_update`] / [`Gcm::decrypt_update`] may be called any
//!   number of times; chunk boundaries do not affect the result.
//! - [`Gcm::finalize_tag`] or [`Gcm::verify_tag`] ends the message. Every
//!   later call fails with [`GcmError::Usage`].
//!
//! ## Notes
//!
//! - GHASH always runs over ciphertext, in both directions.
//! - The caller must ensure `(key, nonce)` uniqueness. Reusing a pair
//!   reveals the XOR of the plaintexts and lets an attacker forge tags.
//! - Tags shorter than 16 bytes are truncations of the full tag. Requests
//!   for 0 or more than 16 bytes are rejected.

use std::fmt;

use zeroize::Zeroize;

use super::counter::{Ctr32, derive_j0};
use crate::cipher::{BLOCK_SIZE, Block, BlockCipher, Sm4};
use crate::error::{GcmError, Result};
use crate::mac::GHash;
use crate::primitives::ct::ConstantTimeEq;

/// Full tag length in bytes.
pub const TAG_SIZE: usize = 16;

/// Longest accepted associated data: 2^64 - 1 bits, rounded down to bytes.
pub const MAX_AAD_LEN: u64 = (1 << 61) - 1;

/// Longest accepted message: 2^39 - 256 bits.
pub const MAX_DATA_LEN: u64 = (1 << 36) - 32;

/// Longest accepted nonce: its bit length must fit in 64 bits.
pub const MAX_NONCE_LEN: u64 = (1 << 61) - 1;

/// SM4 in Galois/Counter Mode.
pub type Sm4Gcm = Gcm<Sm4>;

/// Position of a context in its call sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Accepting associated data.
    Aad,
    /// Accepting message data.
    Data,
    /// The tag has been produced; the context is spent.
    Finalized,
}

/// Streaming GCM context for a single message.
///
/// The context owns the expanded key, the GHASH state, the counter
/// generator and its own copy of `J0`. The running authentication value and
/// `J0` are separate fields; neither is ever written through the other.
/// Key-dependent state is wiped when the context is dropped.
pub struct Gcm<C: BlockCipher> {
    cipher: C,
    ghash: GHash,
    ctr: Ctr32,
    /// Keystream of the most recent data block, for continuing a block that
    /// a previous call left incomplete.
    keystream: Block,
    aad_len: u64,
    data_len: u64,
    phase: Phase,
}

impl<C: BlockCipher> Gcm<C> {
    /// Creates a context for `key` and `nonce`.
    ///
    /// Derives the round keys, the hash subkey `H = E(K, 0^128)` and the
    /// pre-counter block `J0`, and starts in [`Phase::Aad`].
    ///
    /// # Errors
    ///
    /// - [`GcmError::InvalidKeyLength`] if the cipher rejects the key
    /// - [`GcmError::Usage`] if `nonce` is empty
    /// - [`GcmError::LimitExceeded`] if `nonce` is absurdly long
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self> {
        if nonce.is_empty() {
            return Err(GcmError::Usage("nonce must not be empty"));
        }

        if nonce.len() as u64 > MAX_NONCE_LEN {
            return Err(GcmError::LimitExceeded("nonce longer than 2^61 - 1 bytes"));
        }

        let cipher = C::new_from_slice(key)?;

        let mut h = cipher.encrypt_block(&[0u8; BLOCK_SIZE]);
        let j0 = derive_j0(&h, nonce);
        let ghash = GHash::new(&h);
        h.zeroize();

        Ok(Self {
            cipher,
            ghash,
            ctr: Ctr32::new(j0),
            keystream: [0u8; BLOCK_SIZE],
            aad_len: 0,
            data_len: 0,
            phase: Phase::Aad,
        })
    }

    /// Replaces this context with a fresh one for a new key and nonce.
    ///
    /// On error the context is left untouched.
    pub fn reinit(&mut self, key: &[u8], nonce: &[u8]) -> Result<()> {
        *self = Self::new(key, nonce)?;
        Ok(())
    }

    /// Current phase of the call sequence.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Bytes of associated data absorbed so far.
    pub fn aad_len(&self) -> u64 {
        self.aad_len
    }

    /// Bytes of message data processed so far.
    pub fn data_len(&self) -> u64 {
        self.data_len
    }

    /// Authenticates `aad` without encrypting it.
    ///
    /// May be called any number of times before the first data call.
    pub fn update_aad(&mut self, aad: &[u8]) -> Result<()> {
        match self.phase {
            Phase::Aad => {}
            Phase::Data => {
                return Err(GcmError::Usage("associated data must precede message data"));
            }
            Phase::Finalized => return Err(GcmError::Usage("context already finalized")),
        }

        let total = self
            .aad_len
            .checked_add(aad.len() as u64)
            .filter(|&total| total <= MAX_AAD_LEN)
            .ok_or(GcmError::LimitExceeded("associated data longer than 2^61 - 1 bytes"))?;

        self.ghash.update(aad);
        self.aad_len = total;
        Ok(())
    }

    /// Encrypts `plaintext` into `ciphertext` and authenticates the result.
    ///
    /// Both buffers must have the same length.
    pub fn encrypt_update(&mut self, plaintext: &[u8], ciphertext: &mut [u8]) -> Result<()> {
        let total = self.begin_data(plaintext.len(), ciphertext.len())?;

        self.apply_keystream(plaintext, ciphertext);
        self.ghash.update(ciphertext);

        self.data_len = total;
        Ok(())
    }

    /// Authenticates `ciphertext` and decrypts it into `plaintext`.
    ///
    /// Both buffers must have the same length. The output is unverified
    /// until [`verify_tag`](Self::verify_tag) succeeds.
    pub fn decrypt_update(&mut self, ciphertext: &[u8], plaintext: &mut [u8]) -> Result<()> {
        let total = self.begin_data(ciphertext.len(), plaintext.len())?;

        self.ghash.update(ciphertext);
        self.apply_keystream(ciphertext, plaintext);

        self.data_len = total;
        Ok(())
    }

    /// Ends the message and writes the first `tag.len()` bytes of the tag.
    ///
    /// `tag.len()` must be between 1 and [`TAG_SIZE`].
    pub fn finalize_tag(&mut self, tag: &mut [u8]) -> Result<()> {
        self.check_finalize(tag.len())?;

        let mut full = self.compute_tag();
        tag.copy_from_slice(&full[..tag.len()]);
        full.zeroize();

        Ok(())
    }

    /// Ends the message and checks `tag` against the computed tag.
    ///
    /// The comparison covers exactly `tag.len()` bytes and runs in constant
    /// time.
    pub fn verify_tag(&mut self, tag: &[u8]) -> Result<()> {
        self.check_finalize(tag.len())?;

        let mut full = self.compute_tag();
        let ok = full[..tag.len()].ct_eq(tag);
        full.zeroize();

        if ok {
            Ok(())
        } else {
            Err(GcmError::AuthenticationFailure)
        }
    }

    /// One-shot encryption.
    ///
    /// Writes the ciphertext into `ciphertext` (same length as `plaintext`)
    /// and a `tag.len()`-byte tag into `tag`.
    pub fn encrypt(
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        plaintext: &[u8],
        ciphertext: &mut [u8],
        tag: &mut [u8],
    ) -> Result<()> {
        check_tag_len(tag.len())?;

        let mut gcm = Self::new(key, nonce)?;
        gcm.update_aad(aad)?;
        gcm.encrypt_update(plaintext, ciphertext)?;
        gcm.finalize_tag(tag)
    }

    /// One-shot decryption and verification.
    ///
    /// On [`GcmError::AuthenticationFailure`] every byte of `plaintext` has
    /// been overwritten with zero before returning.
    pub fn decrypt(
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
        plaintext: &mut [u8],
    ) -> Result<()> {
        check_tag_len(tag.len())?;

        let mut gcm = Self::new(key, nonce)?;
        gcm.update_aad(aad)?;
        gcm.decrypt_update(ciphertext, plaintext)?;

        gcm.verify_tag(tag).inspect_err(|_| plaintext.zeroize())
    }

    /// Validates the phase and length of a data call, ending the AAD
    /// section on the first one. Returns the new running data length.
    ///
    /// All checks happen before any state changes.
    fn begin_data(&mut self, input_len: usize, output_len: usize) -> Result<u64> {
        if self.phase == Phase::Finalized {
            return Err(GcmError::Usage("context already finalized"));
        }

        if input_len != output_len {
            return Err(GcmError::Usage("output buffer length must equal input length"));
        }

        let total = self
            .data_len
            .checked_add(input_len as u64)
            .filter(|&total| total <= MAX_DATA_LEN)
            .ok_or(GcmError::LimitExceeded("message longer than 2^36 - 32 bytes"))?;

        if self.phase == Phase::Aad {
            self.ghash.pad();
            self.phase = Phase::Data;
        }

        Ok(total)
    }

    /// XORs `input` with the keystream into `output`, resuming mid-block if
    /// the previous call stopped inside one.
    fn apply_keystream(&mut self, input: &[u8], output: &mut [u8]) {
        let offset = (self.data_len % BLOCK_SIZE as u64) as usize;
        let mut pos = 0;

        if offset != 0 {
            let take = (BLOCK_SIZE - offset).min(input.len());
            xor_into(
                &mut output[..take],
                &input[..take],
                &self.keystream[offset..offset + take],
            );
            pos = take;
        }

        for (inp, out) in input[pos..]
            .chunks(BLOCK_SIZE)
            .zip(output[pos..].chunks_mut(BLOCK_SIZE))
        {
            self.keystream = self.ctr.next_keystream(&self.cipher);
            xor_into(out, inp, &self.keystream[..inp.len()]);
        }
    }

    fn check_finalize(&self, tag_len: usize) -> Result<()> {
        if self.phase == Phase::Finalized {
            return Err(GcmError::Usage("context already finalized"));
        }

        check_tag_len(tag_len)
    }

    /// `T = E(K, J0) ^ GHASH(A || C || [len(A)]_64 || [len(C)]_64)`
    fn compute_tag(&mut self) -> Block {
        self.phase = Phase::Finalized;

        let mut len_block = [0u8; BLOCK_SIZE];
        len_block[..8].copy_from_slice(&(self.aad_len * 8).to_be_bytes());
        len_block[8..].copy_from_slice(&(self.data_len * 8).to_be_bytes());

        self.ghash.pad();
        self.ghash.update_block(&len_block);

        let mut tag = self.cipher.encrypt_block(self.ctr.j0());
        xor_in_place(&mut tag, &self.ghash.state());

        self.keystream.zeroize();
        tag
    }
}

impl<C: BlockCipher> Drop for Gcm<C> {
    fn drop(&mut self) {
        self.keystream.zeroize();
    }
}

impl<C: BlockCipher> fmt::Debug for Gcm<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gcm")
            .field("phase", &self.phase)
            .field("aad_len", &self.aad_len)
            .field("data_len", &self.data_len)
            .finish_non_exhaustive()
    }
}

pub(crate) fn check_tag_len(len: usize) -> Result<()> {
    if len == 0 || len > TAG_SIZE {
        return Err(GcmError::Usage("tag length must be between 1 and 16 bytes"));
    }
    Ok(())
}

#[inline(always)]
fn xor_into(out: &mut [u8], a: &[u8], b: &[u8]) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x ^ y;
    }
}

#[inline(always)]
fn xor_in_place(acc: &mut Block, other: &Block) {
    for (a, b) in acc.iter_mut().zip(other) {
        *a ^= b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 16] = [
        0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54, 0x32,
        0x10,
    ];
    const NONCE: [u8; 12] = [
        0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98,
    ];

    #[test]
    fn starts_in_aad_phase() {
        let gcm = Sm4Gcm::new(&KEY, &NONCE).unwrap();
        assert_eq!(gcm.phase(), Phase::Aad);
        assert_eq!(gcm.aad_len(), 0);
        assert_eq!(gcm.data_len(), 0);
    }

    #[test]
    fn data_call_moves_to_data_phase() {
        let mut gcm = Sm4Gcm::new(&KEY, &NONCE).unwrap();
        gcm.encrypt_update(&[], &mut []).unwrap();
        assert_eq!(gcm.phase(), Phase::Data);
    }

    #[test]
    fn rejected_call_leaves_state_untouched() {
        let mut gcm = Sm4Gcm::new(&KEY, &NONCE).unwrap();
        gcm.update_aad(b"abc").unwrap();

        let mut out = [0u8; 4];
        let err = gcm.encrypt_update(&[1, 2, 3], &mut out).unwrap_err();
        assert!(matches!(err, GcmError::Usage(_)));
        assert_eq!(gcm.phase(), Phase::Aad);
        assert_eq!(gcm.data_len(), 0);

        gcm.update_aad(b"def").unwrap();
        assert_eq!(gcm.aad_len(), 6);
    }

    #[test]
    fn tag_mask_uses_original_j0() {
        // With no AAD and no data the GHASH input is the all-zero length
        // block, whose hash is zero, so the tag is exactly E(K, J0).
        let mut gcm = Sm4Gcm::new(&KEY, &NONCE).unwrap();
        let mut tag = [0u8; TAG_SIZE];
        gcm.finalize_tag(&mut tag).unwrap();

        let mut j0 = [0u8; BLOCK_SIZE];
        j0[..12].copy_from_slice(&NONCE);
        j0[15] = 1;
        let sm4 = Sm4::new(&KEY).unwrap();
        assert_eq!(tag, sm4.encrypt_block(&j0));
    }

    #[test]
    fn message_limit_is_enforced_before_processing() {
        let mut gcm = Sm4Gcm::new(&KEY, &NONCE).unwrap();
        gcm.data_len = MAX_DATA_LEN - 1;

        let mut out = [0u8; 2];
        let err = gcm.encrypt_update(&[0xaa, 0xbb], &mut out).unwrap_err();
        assert!(matches!(err, GcmError::LimitExceeded(_)));
        assert_eq!(out, [0, 0]);
        assert_eq!(gcm.phase(), Phase::Aad);
        assert_eq!(gcm.data_len(), MAX_DATA_LEN - 1);

        gcm.encrypt_update(&[0xaa], &mut out[..1]).unwrap();
        assert_eq!(gcm.data_len(), MAX_DATA_LEN);
    }

    #[test]
    fn aad_limit_is_enforced() {
        let mut gcm = Sm4Gcm::new(&KEY, &NONCE).unwrap();
        gcm.aad_len = MAX_AAD_LEN;

        let err = gcm.update_aad(b"x").unwrap_err();
        assert!(matches!(err, GcmError::LimitExceeded(_)));
        assert_eq!(gcm.aad_len(), MAX_AAD_LEN);

        gcm.update_aad(&[]).unwrap();
    }

    #[test]
    fn debug_omits_key_material() {
        let gcm = Sm4Gcm::new(&KEY, &NONCE).unwrap();
        let printed = format!("{gcm:?}");
        assert!(printed.starts_with("Gcm"));
        assert!(printed.contains("Aad"));
    }
}
