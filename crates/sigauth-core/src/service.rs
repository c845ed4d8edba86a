//! # Authentication Service
//!
//! Application service layer that implements the `AuthenticationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`AuthenticationApi`)
//! - Reads time through the outbound `Clock` port
//! - Delegates token parsing, recovery and session sealing to the domain layer
//!
//! ## Credential Dispatch
//!
//! A credential of three dot-separated segments that does not start with `.`
//! is a session credential. Anything else is a compact token and is checked
//! against the replay window. Base64url has no `.` in its alphabet, so the two
//! shapes cannot collide.

use crate::config::{AuthConfig, ConfigError};
use crate::domain::entities::SessionCredential;
use crate::domain::errors::AuthError;
use crate::domain::replay::ReplayWindow;
use crate::domain::session::SessionTokenBridge;
use crate::domain::signature::recover_and_verify;
use crate::domain::token::{self, FORCED_UTF8_MARKER};
use crate::ports::inbound::AuthenticationApi;
use crate::ports::outbound::Clock;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use shared_types::PublicKeyHex;
use std::sync::Arc;
use tracing::{debug, info};

/// Shape of a presented credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialKind {
    /// HS256 session credential.
    Session,
    /// Compact signed-timestamp token.
    Compact,
}

impl CredentialKind {
    /// Classify a credential by shape alone.
    pub fn of(credential: &str) -> Self {
        if !credential.starts_with(FORCED_UTF8_MARKER) && credential.split('.').count() == 3 {
            Self::Session
        } else {
            Self::Compact
        }
    }
}

/// Authentication service.
///
/// Built once at startup and shared by `Arc` between the HTTP layer and the
/// bus adapter.
pub struct AuthService {
    sessions: SessionTokenBridge,
    replay_window: ReplayWindow,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    /// Build the service from validated configuration.
    ///
    /// # Errors
    ///
    /// Any `ConfigError` from [`AuthConfig::validate`]. No request may be
    /// served without a usable session secret.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;
        let secret = config.session_secret_bytes()?;
        let sessions = SessionTokenBridge::new(&secret, config.session_ttl(), Arc::clone(&clock))?;

        Ok(Self::from_parts(
            sessions,
            ReplayWindow::new(config.replay_window()),
            clock,
        ))
    }

    /// Assemble a service from already-built parts.
    pub fn from_parts(
        sessions: SessionTokenBridge,
        replay_window: ReplayWindow,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            replay_window,
            clock,
        }
    }

    /// The session bridge.
    pub fn sessions(&self) -> &SessionTokenBridge {
        &self.sessions
    }

    fn recover_signer(&self, message: &[u8], signature: &[u8]) -> Result<PublicKeyHex, AuthError> {
        match recover_and_verify(message, signature) {
            Ok(recovery) if recovery.valid => Ok(recovery.pubkey),
            Ok(recovery) => {
                debug!(pubkey = %recovery.pubkey, "Recovered key does not verify");
                Err(AuthError::Unauthorized)
            }
            Err(e @ (AuthError::InvalidInput(_) | AuthError::Crypto(_))) => {
                debug!(error = %e, "Signature rejected");
                Err(AuthError::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }
}

impl AuthenticationApi for AuthService {
    /// # Known Properties
    ///
    /// A token is reusable until it leaves the window, and tokens stamped in
    /// the future are accepted. Callers needing single use must track tokens
    /// themselves.
    fn verify_compact_token(
        &self,
        token: &str,
        enforce_replay_window: bool,
    ) -> Result<PublicKeyHex, AuthError> {
        let decoded = token::decode(token)?;
        let pubkey = self.recover_signer(&decoded.signed_message, &decoded.signature)?;

        if enforce_replay_window {
            if let Err(e) = self
                .replay_window
                .check(decoded.timestamp, self.clock.now_unix())
            {
                debug!(pubkey = %pubkey, error = %e, "Compact token outside window");
                return Err(e);
            }
        }

        Ok(pubkey)
    }

    fn verify_arbitrary_message(
        &self,
        signature_b64: &str,
        message: &str,
    ) -> Result<PublicKeyHex, AuthError> {
        let signature = STANDARD
            .decode(signature_b64)
            .map_err(|e| AuthError::Encoding(e.to_string()))?;
        self.recover_signer(message.as_bytes(), &signature)
    }

    fn authenticate(&self, credential: &str) -> Result<PublicKeyHex, AuthError> {
        match CredentialKind::of(credential) {
            CredentialKind::Session => self.sessions.authenticate(credential),
            CredentialKind::Compact => self.verify_compact_token(credential, true),
        }
    }

    fn issue_session(&self, pubkey: &PublicKeyHex) -> Result<SessionCredential, AuthError> {
        let credential = self.sessions.issue(pubkey)?;
        info!(pubkey = %pubkey, ttl_secs = self.sessions.ttl_secs(), "Issued session credential");
        Ok(credential)
    }

    fn exchange_for_session(&self, token: &str) -> Result<SessionCredential, AuthError> {
        let pubkey = self.verify_compact_token(token, true)?;
        self.issue_session(&pubkey)
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
