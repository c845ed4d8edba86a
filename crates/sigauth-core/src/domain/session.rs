//! # Session Token Bridge
//!
//! Issues and opens long-lived session credentials once a compact token has
//! bootstrapped a session. Credentials are HS256 JWTs sealed with a
//! process-wide symmetric key that is never an actor's EC key.
//!
//! Opening a credential and checking its expiry are separate steps:
//! [`SessionTokenBridge::decode`] only verifies the seal and the claim types;
//! [`is_expired`] decides freshness.

use super::entities::{SessionClaims, SessionCredential};
use super::errors::AuthError;
use crate::config::ConfigError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use shared_types::{Clock, PublicKeyHex, UnixTimestamp};
use std::sync::Arc;
use tracing::debug;

/// Default session lifetime: seven days.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Seals and opens [`SessionClaims`].
pub struct SessionTokenBridge {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl SessionTokenBridge {
    /// Build a bridge around the process-wide session secret.
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingSessionSecret` if `secret` is empty. This is a
    /// startup precondition; no request should be served without it.
    pub fn new(secret: &[u8], ttl_secs: i64, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::MissingSessionSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is judged by `is_expired` against the injected clock.
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
            clock,
        })
    }

    /// Issue a credential for `pubkey` expiring `ttl` from now.
    pub fn issue(&self, pubkey: &PublicKeyHex) -> Result<SessionCredential, AuthError> {
        let claims = SessionClaims {
            pubkey: pubkey.clone(),
            exp: self.clock.now_unix().saturating_add(self.ttl_secs),
        };
        self.seal(&claims)
    }

    /// Seal arbitrary claims. Used for issuance and for re-sealing in tests.
    pub fn seal(&self, claims: &SessionClaims) -> Result<SessionCredential, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map(SessionCredential::new)
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    /// Open a credential, verifying its seal and claim types.
    ///
    /// Does not check expiry.
    pub fn decode(&self, credential: &str) -> Result<SessionClaims, AuthError> {
        jsonwebtoken::decode::<SessionClaims>(credential, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Session credential rejected");
                AuthError::Unauthorized
            })
    }

    /// Open a credential and require it to be unexpired now.
    pub fn authenticate(&self, credential: &str) -> Result<PublicKeyHex, AuthError> {
        let claims = self.decode(credential)?;
        if is_expired(&claims, self.clock.now_unix()) {
            return Err(AuthError::SessionExpired { exp: claims.exp });
        }
        Ok(claims.pubkey)
    }

    /// Configured lifetime in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }
}

/// Whether `claims` are expired at `at`. An `exp` equal to `at` is expired.
pub fn is_expired(claims: &SessionClaims, at: UnixTimestamp) -> bool {
    claims.exp <= at
}
