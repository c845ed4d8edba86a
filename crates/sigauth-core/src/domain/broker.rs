//! # Broker Credential Deriver
//!
//! Derives message-bus credentials from this process's secp256k1 identity.
//! The password is a compact token (raw framing) over the connection time, so
//! a broker verifies it with exactly the same code as an HTTP request.
//!
//! ## Lifecycle
//!
//! The keypair is generated lazily on first use from 32 OS-random bytes and
//! never rotated for the life of the [`BrokerIdentity`]. Initialization is
//! exclusive: concurrent first callers all observe the single winner's key.

use super::entities::{BrokerCredential, SigningMode};
use super::errors::{AuthError, CryptoError};
use super::keypair::Secp256k1Keypair;
use super::token;
use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::RngCore;
use shared_types::{Clock, PublicKeyHex};
use std::sync::Arc;
use tracing::info;
use zeroize::Zeroizing;

/// Process identity on the message bus.
pub struct BrokerIdentity {
    keypair: Mutex<Option<Arc<Secp256k1Keypair>>>,
    clock: Arc<dyn Clock>,
}

impl BrokerIdentity {
    /// Identity whose keypair is generated on first use.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            keypair: Mutex::new(None),
            clock,
        }
    }

    /// Identity bound to an existing keypair.
    pub fn with_keypair(keypair: Secp256k1Keypair, clock: Arc<dyn Clock>) -> Self {
        Self {
            keypair: Mutex::new(Some(Arc::new(keypair))),
            clock,
        }
    }

    /// Return the keypair, generating it if this is the first call.
    ///
    /// # Errors
    ///
    /// `KeyGeneration` if the OS RNG fails. Callers must treat this as fatal:
    /// without a key there is no identity to connect with.
    pub fn ensure_keypair(&self) -> Result<Arc<Secp256k1Keypair>, AuthError> {
        let mut slot = self.keypair.lock();
        if let Some(existing) = slot.as_ref() {
            return Ok(Arc::clone(existing));
        }

        let generated = Arc::new(generate_keypair()?);
        info!(pubkey = %generated.public_key_hex(), "Generated broker identity");
        *slot = Some(Arc::clone(&generated));
        Ok(generated)
    }

    /// Hex public key used as the bus username.
    pub fn username(&self) -> Result<PublicKeyHex, AuthError> {
        Ok(self.ensure_keypair()?.public_key_hex())
    }

    /// Fresh credential pair for one connection attempt.
    pub fn derive_credential(&self) -> Result<BrokerCredential, AuthError> {
        let keypair = self.ensure_keypair()?;
        let now = u32::try_from(self.clock.now_unix())
            .map_err(|_| AuthError::InvalidInput("clock outside u32 range"))?;

        let password = token::encode(now, &keypair, SigningMode::Raw)?;
        Ok(BrokerCredential {
            username: keypair.public_key_hex(),
            password,
        })
    }
}

/// Topic on which a peer's handshake is acknowledged.
pub fn reply_topic(peer: &PublicKeyHex, password: &str) -> String {
    format!("{peer}/{password}")
}

fn generate_keypair() -> Result<Secp256k1Keypair, AuthError> {
    let mut seed = Zeroizing::new([0u8; 32]);
    OsRng
        .try_fill_bytes(&mut seed[..])
        .map_err(|e| AuthError::KeyGeneration(e.to_string()))?;

    Secp256k1Keypair::from_bytes(&seed).map_err(|e: CryptoError| {
        AuthError::KeyGeneration(format!("random seed rejected: {e}"))
    })
}
