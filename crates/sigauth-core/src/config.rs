//! Authentication configuration with validation.
//!
//! The session secret is the one hard startup precondition: without it the
//! session bridge cannot exist, and no request may be served.

use crate::domain::replay::DEFAULT_REPLAY_WINDOW_SECS;
use crate::domain::session::DEFAULT_SESSION_TTL_SECS;
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroizing;

/// Minimum decoded length of the session secret.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// Default query parameter carrying a credential.
pub const DEFAULT_TOKEN_QUERY_PARAM: &str = "token";

/// Default header carrying a credential.
pub const DEFAULT_TOKEN_HEADER: &str = "x-jwt";

/// Configuration errors. Fatal at startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No session secret was provided.
    #[error("Session secret is not set")]
    MissingSessionSecret,

    /// Session secret is not valid hex.
    #[error("Session secret must be hex encoded")]
    InvalidSessionSecret,

    /// Session secret decodes to too few bytes.
    #[error("Session secret too short: need {min} bytes, got {actual}")]
    SessionSecretTooShort { min: usize, actual: usize },

    /// A duration that must be positive is zero.
    #[error("Invalid {0}: must be greater than zero")]
    ZeroDuration(&'static str),

    /// Credential query parameter or header name is empty.
    #[error("Invalid {0}: must not be empty")]
    EmptyName(&'static str),

    /// A setting could not be parsed.
    #[error("Invalid {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Authentication settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Hex-encoded HMAC key for session credentials.
    pub session_secret: Option<String>,
    /// Replay tolerance for compact tokens, seconds.
    pub replay_window_secs: u64,
    /// Session credential lifetime, seconds.
    pub session_ttl_secs: u64,
    /// Query parameter checked first for a credential.
    pub token_query_param: String,
    /// Header checked when the query parameter is absent.
    pub token_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: None,
            replay_window_secs: DEFAULT_REPLAY_WINDOW_SECS as u64,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS as u64,
            token_query_param: DEFAULT_TOKEN_QUERY_PARAM.to_string(),
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
        }
    }
}

impl AuthConfig {
    /// Config with the given hex secret and defaults elsewhere.
    pub fn with_secret(secret_hex: impl Into<String>) -> Self {
        Self {
            session_secret: Some(secret_hex.into()),
            ..Self::default()
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session_secret_bytes()?;

        if self.replay_window_secs == 0 {
            return Err(ConfigError::ZeroDuration("replay_window_secs"));
        }
        if self.session_ttl_secs == 0 {
            return Err(ConfigError::ZeroDuration("session_ttl_secs"));
        }
        if self.token_query_param.is_empty() {
            return Err(ConfigError::EmptyName("token_query_param"));
        }
        if self.token_header.is_empty() {
            return Err(ConfigError::EmptyName("token_header"));
        }

        Ok(())
    }

    /// Decoded session secret.
    pub fn session_secret_bytes(&self) -> Result<Zeroizing<Vec<u8>>, ConfigError> {
        let secret = self
            .session_secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSessionSecret)?;

        let bytes =
            Zeroizing::new(hex::decode(secret).map_err(|_| ConfigError::InvalidSessionSecret)?);
        if bytes.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::SessionSecretTooShort {
                min: MIN_SESSION_SECRET_LEN,
                actual: bytes.len(),
            });
        }
        Ok(bytes)
    }

    /// Replay tolerance as signed seconds.
    pub fn replay_window(&self) -> i64 {
        i64::try_from(self.replay_window_secs).unwrap_or(i64::MAX)
    }

    /// Session lifetime as signed seconds.
    pub fn session_ttl(&self) -> i64 {
        i64::try_from(self.session_ttl_secs).unwrap_or(i64::MAX)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_secret", &self.session_secret.as_ref().map(|_| "<redacted>"))
            .field("replay_window_secs", &self.replay_window_secs)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("token_query_param", &self.token_query_param)
            .field("token_header", &self.token_header)
            .finish()
    }
}
