//! # Domain Entities
//!
//! Core data structures for signature-based identity.

use super::errors::CryptoError;
use k256::ecdsa::RecoveryId;
use serde::{Deserialize, Serialize};
use shared_types::{PublicKeyHex, UnixTimestamp};
use std::fmt;

/// Length of a compact recoverable signature: header ∥ r ∥ s.
pub const RECOVERABLE_SIGNATURE_LEN: usize = 65;

/// Header offset shared by all compact signatures.
const COMPACT_HEADER_BASE: u8 = 27;

/// Added to the header when the signer's key is compressed.
const COMPRESSED_KEY_FLAG: u8 = 4;

/// First valid header byte (compressed key, recovery id 0).
pub const MIN_COMPRESSED_HEADER: u8 = COMPACT_HEADER_BASE + COMPRESSED_KEY_FLAG;

// =============================================================================
// Signatures
// =============================================================================

/// Compact recoverable secp256k1 signature.
///
/// Layout: `header(1) ∥ r(32) ∥ s(32)`, header = `31 + recovery_id`.
/// Only compressed-key headers are accepted, so a given (r, s) has exactly one
/// header that recovers the signer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature([u8; RECOVERABLE_SIGNATURE_LEN]);

impl RecoverableSignature {
    /// Wrap raw bytes; anything but 65 bytes is rejected before any crypto.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; RECOVERABLE_SIGNATURE_LEN] =
            bytes.try_into().map_err(|_| CryptoError::InvalidLength {
                expected: RECOVERABLE_SIGNATURE_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    /// Assemble from a recovery id and the 64-byte `r ∥ s`.
    pub fn from_parts(recovery_id: RecoveryId, rs: &[u8; 64]) -> Self {
        let mut bytes = [0u8; RECOVERABLE_SIGNATURE_LEN];
        bytes[0] = MIN_COMPRESSED_HEADER + recovery_id.to_byte();
        bytes[1..].copy_from_slice(rs);
        Self(bytes)
    }

    /// The header byte.
    pub fn header(&self) -> u8 {
        self.0[0]
    }

    /// Recovery id encoded in the header.
    pub fn recovery_id(&self) -> Result<RecoveryId, CryptoError> {
        let header = self.header();
        header
            .checked_sub(MIN_COMPRESSED_HEADER)
            .and_then(RecoveryId::from_byte)
            .ok_or(CryptoError::InvalidRecoveryId(header))
    }

    /// The `r ∥ s` half.
    pub fn rs(&self) -> &[u8] {
        &self.0[1..]
    }

    /// All 65 bytes.
    pub fn as_bytes(&self) -> &[u8; RECOVERABLE_SIGNATURE_LEN] {
        &self.0
    }
}

impl fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecoverableSignature({})", hex::encode(self.0))
    }
}

/// Outcome of a successful recovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recovery {
    /// Key recovered from the signature.
    pub pubkey: PublicKeyHex,
    /// Whether the signature verifies against `pubkey` over the same digest.
    pub valid: bool,
}

// =============================================================================
// Compact Tokens
// =============================================================================

/// How the signer framed the timestamp before signing.
///
/// Decided once from the token's leading marker and carried through to
/// verification; the verifier never tries the other branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SigningMode {
    /// The 4 raw timestamp bytes were signed.
    #[default]
    Raw,
    /// The base64url text of the 4 timestamp bytes was signed, for signers
    /// that only accept UTF-8 input. Marked by a leading `.`.
    ForcedUtf8,
}

/// A compact token split into its parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedToken {
    /// Big-endian timestamp from the first 4 bytes.
    pub timestamp: u32,
    /// Framing declared by the token.
    pub mode: SigningMode,
    /// Exact bytes the signer signed.
    pub signed_message: Vec<u8>,
    /// Everything after the timestamp; 65 bytes when well formed.
    pub signature: Vec<u8>,
}

// =============================================================================
// Sessions
// =============================================================================

/// Claims sealed into a session credential.
///
/// Decoding is strict: a missing or mistyped field rejects the credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identity the session was issued to.
    pub pubkey: PublicKeyHex,
    /// Expiry, Unix seconds.
    pub exp: UnixTimestamp,
}

/// Sealed session credential (an HS256 JWT). Bearer material.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCredential(String);

impl SessionCredential {
    pub(crate) fn new(token: String) -> Self {
        Self(token)
    }

    /// The encoded credential, for handing to the client.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the encoded string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCredential(<redacted>)")
    }
}

// =============================================================================
// Broker
// =============================================================================

/// Username/password pair for an authenticated bus connection.
#[derive(Clone, PartialEq, Eq)]
pub struct BrokerCredential {
    /// Hex compressed public key of this process.
    pub username: PublicKeyHex,
    /// Raw-mode compact token over the connection time.
    pub password: String,
}

impl fmt::Debug for BrokerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Acknowledgment published on a peer's reply topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeAck {
    /// Identity of the acknowledging process.
    pub pubkey: PublicKeyHex,
}
