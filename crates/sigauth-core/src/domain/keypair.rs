//! # secp256k1 Keypair
//!
//! An actor's signing identity. Secret scalars are zeroized on drop by
//! `k256::ecdsa::SigningKey`; seed buffers handled here are wrapped in
//! `Zeroizing`.

use super::errors::CryptoError;
use k256::ecdsa::{SigningKey, VerifyingKey};
use shared_types::{PublicKeyHex, COMPRESSED_PUBKEY_LEN};
use zeroize::Zeroizing;

/// secp256k1 keypair with its cached compressed public key.
pub struct Secp256k1Keypair {
    signing_key: SigningKey,
    public_key: [u8; COMPRESSED_PUBKEY_LEN],
}

impl Secp256k1Keypair {
    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes(bytes.into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self::from_signing_key(signing_key))
    }

    /// Create from a hex-encoded 32-byte secret.
    pub fn from_hex(secret: &str) -> Result<Self, CryptoError> {
        let mut bytes = Zeroizing::new([0u8; 32]);
        hex::decode_to_slice(secret.trim(), &mut bytes[..])
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        Self::from_bytes(&bytes)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = compress(signing_key.verifying_key());
        Self {
            signing_key,
            public_key,
        }
    }

    /// Compressed SEC1 public key.
    pub fn public_key_bytes(&self) -> &[u8; COMPRESSED_PUBKEY_LEN] {
        &self.public_key
    }

    /// Hex identity string for this keypair.
    pub fn public_key_hex(&self) -> PublicKeyHex {
        PublicKeyHex::from_compressed(&self.public_key)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl std::fmt::Debug for Secp256k1Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1Keypair")
            .field("public_key", &hex::encode(self.public_key))
            .finish_non_exhaustive()
    }
}

/// Compressed SEC1 encoding of a verifying key.
pub(crate) fn compress(key: &VerifyingKey) -> [u8; COMPRESSED_PUBKEY_LEN] {
    let point = key.to_encoded_point(true);
    let mut bytes = [0u8; COMPRESSED_PUBKEY_LEN];
    // A compressed secp256k1 point is always 33 bytes.
    bytes.copy_from_slice(point.as_bytes());
    bytes
}
