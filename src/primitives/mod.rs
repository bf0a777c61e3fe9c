//! Low-level helpers shared by the cryptographic modules.
//!
//! - `ct`: constant-time comparison used for tag verification

pub mod ct;

pub use ct::ConstantTimeEq;
