//! # Error Types
//!
//! Errors raised while parsing shared identity values.

use thiserror::Error;

/// Errors from parsing a [`crate::PublicKeyHex`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Hex string has the wrong number of characters.
    #[error("Invalid public key length: expected {expected} hex chars, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// String contains non-hex characters.
    #[error("Invalid hex encoding")]
    InvalidHex,

    /// Leading byte is not a compressed-point tag (0x02 or 0x03).
    #[error("Public key is not compressed: prefix 0x{0:02x}")]
    NotCompressed(u8),
}
