//! # Broker Handshake Adapter
//!
//! Connects this process's [`BrokerIdentity`] to the message bus and answers
//! peer handshakes.
//!
//! ## Handshake Flow
//!
//! ```text
//! Peer ──(username = pubkey, password = compact token)──→ [BrokerHandshake]
//!                                                               │
//!                                    verify token, window enforced,
//!                                    recovered key must equal username
//!                                                               │
//!                                                               ↓
//!        "{peer_pubkey}/{password}" ←── HandshakeAck { our pubkey } ── [BrokerGateway]
//! ```
//!
//! The reply topic embeds the peer's one-time password, so only the peer that
//! just connected is listening on it.

use crate::domain::broker::{reply_topic, BrokerIdentity};
use crate::domain::entities::{BrokerCredential, HandshakeAck};
use crate::domain::errors::AuthError;
use crate::ports::inbound::AuthenticationApi;
use crate::ports::outbound::{BrokerError, BrokerGateway};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::PublicKeyHex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Answers peer handshakes on behalf of a [`BrokerIdentity`].
pub struct BrokerHandshake<G: BrokerGateway> {
    identity: Arc<BrokerIdentity>,
    auth: Arc<dyn AuthenticationApi>,
    gateway: Arc<G>,
}

impl<G: BrokerGateway> BrokerHandshake<G> {
    /// Create a new handshake adapter.
    ///
    /// # Arguments
    ///
    /// * `identity` - This process's bus identity
    /// * `auth` - Verifier for peer passwords
    /// * `gateway` - Transport used to publish acknowledgments
    pub fn new(
        identity: Arc<BrokerIdentity>,
        auth: Arc<dyn AuthenticationApi>,
        gateway: Arc<G>,
    ) -> Self {
        Self {
            identity,
            auth,
            gateway,
        }
    }

    /// Credential for the next connection attempt.
    pub fn connect_credential(&self) -> Result<BrokerCredential, AuthError> {
        self.identity.derive_credential()
    }

    /// Get a reference to the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Verify a peer's handshake credentials and acknowledge them.
    ///
    /// Returns the verified peer key.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the username is not a key or the password was not
    ///   signed by it
    /// - `TokenExpired` if the password is older than the replay window
    /// - `KeyGeneration` if our own identity cannot be created
    /// - `Broker` if the acknowledgment cannot be published
    pub async fn handle_peer_handshake(
        &self,
        username: &str,
        password: &str,
    ) -> Result<PublicKeyHex, AuthError> {
        let claimed: PublicKeyHex = username.parse().map_err(|e| {
            debug!(error = %e, "Handshake username is not a public key");
            AuthError::Unauthorized
        })?;

        let recovered = self.auth.verify_compact_token(password, true)?;
        if recovered != claimed {
            warn!(claimed = %claimed, recovered = %recovered, "Handshake signer mismatch");
            return Err(AuthError::Unauthorized);
        }

        let ack = HandshakeAck {
            pubkey: self.identity.username()?,
        };
        let payload = serde_json::to_vec(&ack).map_err(|e| AuthError::Encoding(e.to_string()))?;

        self.gateway
            .publish(&reply_topic(&claimed, password), payload)
            .await
            .map_err(|e| AuthError::Broker(e.to_string()))?;

        info!(peer = %claimed, "Acknowledged peer handshake");
        Ok(claimed)
    }
}

// =============================================================================
// IN-MEMORY GATEWAY
// =============================================================================

/// A message captured by [`InMemoryBroker`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Broker gateway that records publishes in memory.
#[derive(Default)]
pub struct InMemoryBroker {
    published: Mutex<Vec<PublishedMessage>>,
    disconnected: Mutex<bool>,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent publishes fail with `NotConnected`.
    pub fn disconnect(&self) {
        *self.disconnected.lock() = true;
    }

    /// Everything published so far, in order.
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published.lock().clone()
    }

    /// Messages published on `topic`.
    pub fn on_topic(&self, topic: &str) -> Vec<PublishedMessage> {
        self.published
            .lock()
            .iter()
            .filter(|m| m.topic == topic)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BrokerGateway for InMemoryBroker {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BrokerError> {
        if *self.disconnected.lock() {
            return Err(BrokerError::NotConnected);
        }
        self.published.lock().push(PublishedMessage {
            topic: topic.to_string(),
            payload,
        });
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
