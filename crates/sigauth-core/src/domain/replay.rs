//! # Replay Window
//!
//! Backward-only recency bound for compact tokens.
//!
//! ## Known Properties
//!
//! - Tokens stamped in the future are accepted: there is no forward bound.
//! - There is no nonce cache: a token is reusable any number of times until
//!   it ages out. Only recency is guaranteed, not single use.

use super::errors::AuthError;
use shared_types::UnixTimestamp;

/// Default tolerance: five minutes.
pub const DEFAULT_REPLAY_WINDOW_SECS: i64 = 300;

/// Accepts timestamps no older than `tolerance_secs` before now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayWindow {
    tolerance_secs: i64,
}

impl ReplayWindow {
    /// Window with a custom tolerance in seconds.
    pub fn new(tolerance_secs: i64) -> Self {
        Self { tolerance_secs }
    }

    /// Reject `timestamp` if it is strictly older than `now - tolerance`.
    pub fn check(&self, timestamp: u32, now: UnixTimestamp) -> Result<(), AuthError> {
        let timestamp = i64::from(timestamp);
        let oldest_accepted = now.saturating_sub(self.tolerance_secs);

        if timestamp < oldest_accepted {
            return Err(AuthError::TokenExpired {
                timestamp,
                oldest_accepted,
            });
        }
        Ok(())
    }
}

impl Default for ReplayWindow {
    fn default() -> Self {
        Self::new(DEFAULT_REPLAY_WINDOW_SECS)
    }
}
