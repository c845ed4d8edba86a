//! # Identity Entities
//!
//! The canonical identity string and the timestamp alias used on the wire.

use crate::errors::IdentityError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seconds since the Unix epoch, signed so that `now - window` never wraps.
pub type UnixTimestamp = i64;

/// Length of a compressed SEC1 secp256k1 point.
pub const COMPRESSED_PUBKEY_LEN: usize = 33;

/// Hex-encoded compressed secp256k1 public key (66 lowercase hex chars).
///
/// This is the identity downstream handlers receive. No uniqueness is
/// enforced: the same key may appear in any number of credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKeyHex(String);

impl PublicKeyHex {
    /// Build from the 33 compressed SEC1 bytes.
    pub fn from_compressed(bytes: &[u8; COMPRESSED_PUBKEY_LEN]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Borrow the hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PublicKeyHex {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != COMPRESSED_PUBKEY_LEN * 2 {
            return Err(IdentityError::InvalidLength {
                expected: COMPRESSED_PUBKEY_LEN * 2,
                actual: s.len(),
            });
        }

        let mut bytes = [0u8; COMPRESSED_PUBKEY_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| IdentityError::InvalidHex)?;

        if bytes[0] != 0x02 && bytes[0] != 0x03 {
            return Err(IdentityError::NotCompressed(bytes[0]));
        }

        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for PublicKeyHex {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PublicKeyHex> for String {
    fn from(value: PublicKeyHex) -> Self {
        value.0
    }
}

impl AsRef<str> for PublicKeyHex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicKeyHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
