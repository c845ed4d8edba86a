//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of the authentication core.

use crate::domain::entities::SessionCredential;
use crate::domain::errors::AuthError;
use shared_types::PublicKeyHex;

/// Primary authentication API.
///
/// Every successful call returns the recovered or sealed public key, which is
/// a self-asserted identity. Implementations must be thread-safe
/// (`Send + Sync`).
pub trait AuthenticationApi: Send + Sync {
    /// Verify a compact token and return the signer's key.
    ///
    /// With `enforce_replay_window` unset the timestamp is ignored, which is
    /// only appropriate for offline tooling.
    fn verify_compact_token(
        &self,
        token: &str,
        enforce_replay_window: bool,
    ) -> Result<PublicKeyHex, AuthError>;

    /// Verify a standard-base64 signature over raw message bytes.
    ///
    /// No framing and no replay window.
    fn verify_arbitrary_message(
        &self,
        signature_b64: &str,
        message: &str,
    ) -> Result<PublicKeyHex, AuthError>;

    /// Request-level dispatch between session credentials and compact tokens.
    fn authenticate(&self, credential: &str) -> Result<PublicKeyHex, AuthError>;

    /// Issue a session credential for an already authenticated key.
    fn issue_session(&self, pubkey: &PublicKeyHex) -> Result<SessionCredential, AuthError>;

    /// Verify a compact token (window enforced) and trade it for a session.
    fn exchange_for_session(&self, token: &str) -> Result<SessionCredential, AuthError>;
}
