//! Galois/Counter Mode (GCM) authenticated encryption.
//!
//! The mode is split into two layers:
//!
//! - [`counter`]: derivation of the pre-counter block `J0` from the nonce
//!   and generation of the per-block keystream
//! - [`core`]: the streaming [`Gcm`] context and its phase state machine
//!
//! The free functions below are SM4-GCM conveniences that create a context,
//! run the whole message through it and drop it. Other block ciphers go
//! through [`Gcm::encrypt`] and [`Gcm::decrypt`] directly.
//!
//! # Example
//!
//! ```
//! use sm4gcm::encryption::gcm;
//!
//! let key = [0x11u8; 16];
//! let nonce = [0x22u8; 12];
//!
//! let (ciphertext, tag) = gcm::seal(&key, &nonce, b"header", b"payload", 16).unwrap();
//! let plaintext = gcm::open(&key, &nonce, b"header", &ciphertext, &tag).unwrap();
//!
//! assert_eq!(plaintext, b"payload");
//! ```

pub mod core;
pub mod counter;

pub use self::core::{Gcm, MAX_AAD_LEN, MAX_DATA_LEN, MAX_NONCE_LEN, Phase, Sm4Gcm, TAG_SIZE};
pub use counter::NONCE_SIZE;

use self::core::check_tag_len;
use crate::error::Result;

/// Encrypts and authenticates a message with SM4-GCM.
///
/// `ciphertext` must be as long as `plaintext`; the tag length is
/// `tag.len()` (1 to 16 bytes).
pub fn encrypt(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    ciphertext: &mut [u8],
    tag: &mut [u8],
) -> Result<()> {
    Sm4Gcm::encrypt(key, nonce, aad, plaintext, ciphertext, tag)
}

/// Verifies and decrypts an SM4-GCM message.
///
/// On authentication failure `plaintext` is zeroed and
/// [`crate::GcmError::AuthenticationFailure`] is returned.
pub fn decrypt(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
    plaintext: &mut [u8],
) -> Result<()> {
    Sm4Gcm::decrypt(key, nonce, aad, ciphertext, tag, plaintext)
}

/// Allocating form of [`encrypt`]: returns `(ciphertext, tag)` with a tag of
/// `tag_len` bytes.
pub fn seal(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    tag_len: usize,
) -> Result<(Vec<u8>, Vec<u8>)> {
    check_tag_len(tag_len)?;

    let mut ciphertext = vec![0u8; plaintext.len()];
    let mut tag = vec![0u8; tag_len];
    encrypt(key, nonce, aad, plaintext, &mut ciphertext, &mut tag)?;

    Ok((ciphertext, tag))
}

/// Allocating form of [`decrypt`]. Nothing is returned unless the tag
/// verifies.
pub fn open(key: &[u8], nonce: &[u8], aad: &[u8], ciphertext: &[u8], tag: &[u8]) -> Result<Vec<u8>> {
    let mut plaintext = vec![0u8; ciphertext.len()];
    decrypt(key, nonce, aad, ciphertext, tag, &mut plaintext)?;
    Ok(plaintext)
}
