//! # Signature Primitive (secp256k1, recoverable)
//!
//! Pure domain logic for signing and recovering over a domain-separated
//! digest. Both the HTTP token path and the broker path go through this
//! module, so the header-byte convention has exactly one definition.
//!
//! ## Digest
//!
//! `SHA256(SHA256("Lightning Signed Message:" ∥ message))`, the Lightning
//! `signmessage` convention, so wallet-produced signatures verify here.
//!
//! ## Security Notes
//!
//! - **Domain Separation**: the prefix keeps these signatures from being
//!   reinterpreted as signatures over transaction digests.
//! - **Malleability Prevention**: high-S signatures are rejected before
//!   recovery; signing always emits low-S.
//! - **Strict Header**: only compressed-key headers (31..=34) are accepted.

use super::entities::{Recovery, RecoverableSignature};
use super::errors::{AuthError, CryptoError};
use super::keypair::{compress, Secp256k1Keypair};
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha2::{Digest, Sha256};
use shared_types::PublicKeyHex;

/// Domain-separation prefix hashed ahead of every message.
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"Lightning Signed Message:";

/// Domain-separated double SHA-256 of `message`.
pub fn digest(message: &[u8]) -> [u8; 32] {
    let inner = Sha256::new()
        .chain_update(SIGNED_MESSAGE_PREFIX)
        .chain_update(message)
        .finalize();
    Sha256::digest(inner).into()
}

/// Sign `message` with a compact recoverable signature.
///
/// Deterministic (RFC 6979) and always low-S.
pub fn sign(message: &[u8], keypair: &Secp256k1Keypair) -> Result<RecoverableSignature, AuthError> {
    if message.is_empty() {
        return Err(AuthError::InvalidInput("message is empty"));
    }

    let hash = digest(message);
    let (signature, recovery_id) = keypair
        .signing_key()
        .sign_prehash_recoverable(&hash)
        .map_err(|_| CryptoError::SigningFailed)?;

    // Flipping s to the lower half negates R's y-parity.
    let (signature, recovery_id) = match signature.normalize_s() {
        Some(low) => (
            low,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (signature, recovery_id),
    };

    let mut rs = [0u8; 64];
    rs.copy_from_slice(&signature.to_bytes());
    Ok(RecoverableSignature::from_parts(recovery_id, &rs))
}

/// Recover the signer of `message` and check the signature against it.
///
/// # Errors
///
/// - `InvalidInput` if `message` or `signature` is empty
/// - `Crypto` if the signature is malformed or no key can be recovered; no
///   key is returned in that case
pub fn recover_and_verify(message: &[u8], signature: &[u8]) -> Result<Recovery, AuthError> {
    if message.is_empty() {
        return Err(AuthError::InvalidInput("message is empty"));
    }
    if signature.is_empty() {
        return Err(AuthError::InvalidInput("signature is empty"));
    }

    let compact = RecoverableSignature::from_slice(signature)?;
    let recovery_id = compact.recovery_id()?;

    // Rejects r or s equal to zero or >= n.
    let sig = Signature::from_slice(compact.rs()).map_err(|_| CryptoError::InvalidScalar)?;
    if sig.normalize_s().is_some() {
        return Err(CryptoError::MalleableSignature.into());
    }

    let hash = digest(message);
    let recovered = VerifyingKey::recover_from_prehash(&hash, &sig, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;
    let valid = recovered.verify_prehash(&hash, &sig).is_ok();

    Ok(Recovery {
        pubkey: PublicKeyHex::from_compressed(&compress(&recovered)),
        valid,
    })
}

// =============================================================================
// UNIT TESTS
// =============================================================================
