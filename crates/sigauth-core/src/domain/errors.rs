//! # Authentication Errors
//!
//! Error types for signature recovery, token decoding and credential checks.
//!
//! Every per-request variant collapses to an opaque 401 at the HTTP boundary;
//! the detail exists for logs and tests only.

use crate::config::ConfigError;
use thiserror::Error;

/// Malformed signature bytes or a failed key recovery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature is not exactly 65 bytes.
    #[error("Invalid signature length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Header byte is not a compressed-key recovery header (31..=34).
    #[error("Invalid recovery header: {0}")]
    InvalidRecoveryId(u8),

    /// r or s is zero or not below the curve order.
    #[error("Signature scalar out of range")]
    InvalidScalar,

    /// s is in the upper half of the curve order.
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// No public key could be recovered for this digest.
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Private key bytes are not a valid secp256k1 scalar.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// The signer rejected the digest.
    #[error("Signing failed")]
    SigningFailed,
}

/// Errors surfaced by the authentication core.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// An argument was empty or out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    /// Malformed base64 or byte layout.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Decoded token is shorter than timestamp plus one signature byte.
    #[error("Token too short: {len} bytes")]
    TooShort { len: usize },

    /// Signature bytes could not be used.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Signature did not verify, or a session seal was invalid.
    #[error("Unauthorized")]
    Unauthorized,

    /// Compact token timestamp is older than the replay window.
    #[error("Token expired: timestamp {timestamp} older than {oldest_accepted}")]
    TokenExpired { timestamp: i64, oldest_accepted: i64 },

    /// Session credential is past its `exp`.
    #[error("Session expired at {exp}")]
    SessionExpired { exp: i64 },

    /// Process configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No broker identity could be generated.
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// The broker transport refused a publish.
    #[error("Broker error: {0}")]
    Broker(String),
}
