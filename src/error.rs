//! Crate-wide error and result types.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GcmError>;

/// All errors the AEAD primitives can report.
///
/// None of these are transient: retrying the same call with the same inputs
/// fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GcmError {
    /// The key is not exactly 16 bytes. Carries the length that was supplied.
    #[error("invalid key length: expected 16 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The recomputed tag did not match the supplied one.
    ///
    /// When returned from a one-shot decryption the output buffer has already
    /// been overwritten with zeros.
    #[error("authentication failed")]
    AuthenticationFailure,

    /// A call was made out of order or with malformed arguments
    /// (message describes which rule was broken).
    #[error("usage error: {0}")]
    Usage(&'static str),

    /// A length bound of the construction would be exceeded
    /// (message names the bound).
    #[error("length limit exceeded: {0}")]
    LimitExceeded(&'static str),
}
