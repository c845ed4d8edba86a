//! # Compact Token Codec
//!
//! Wire format:
//!
//! ```text
//! [ "." ] base64url( uint32_be(timestamp) ∥ recoverable_signature[65] )
//! ```
//!
//! A leading `.` declares [`SigningMode::ForcedUtf8`]: the signer signed the
//! base64url text of the 4 timestamp bytes rather than the bytes themselves.
//! [`signed_message_for`] is the only place either framing is built, so the
//! encoder and decoder cannot drift apart.

use super::entities::{DecodedToken, SigningMode, RECOVERABLE_SIGNATURE_LEN};
use super::errors::AuthError;
use super::keypair::Secp256k1Keypair;
use super::signature;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

/// Marker prefix selecting forced-UTF8 framing.
pub const FORCED_UTF8_MARKER: char = '.';

/// Bytes of big-endian timestamp at the front of a token.
pub const TIMESTAMP_LEN: usize = 4;

/// Smallest decodable token: timestamp plus one signature byte.
pub const MIN_TOKEN_LEN: usize = TIMESTAMP_LEN + 1;

/// Decoded length of a well-formed token.
pub const COMPACT_TOKEN_LEN: usize = TIMESTAMP_LEN + RECOVERABLE_SIGNATURE_LEN;

/// URL-safe alphabet; emits padding, accepts input with or without it.
pub(crate) const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The bytes a signer signs for `time_buf` under `mode`.
pub fn signed_message_for(time_buf: &[u8; TIMESTAMP_LEN], mode: SigningMode) -> Vec<u8> {
    match mode {
        SigningMode::Raw => time_buf.to_vec(),
        SigningMode::ForcedUtf8 => URL_SAFE_LENIENT.encode(time_buf).into_bytes(),
    }
}

/// Split a compact token into timestamp, signed message and signature.
///
/// Performs no cryptography.
///
/// # Errors
///
/// - `Encoding` if the body is not base64url
/// - `TooShort` if fewer than 5 bytes decode
pub fn decode(token: &str) -> Result<DecodedToken, AuthError> {
    let (mode, body) = match token.strip_prefix(FORCED_UTF8_MARKER) {
        Some(rest) => (SigningMode::ForcedUtf8, rest),
        None => (SigningMode::Raw, token),
    };

    let bytes = URL_SAFE_LENIENT
        .decode(body)
        .map_err(|e| AuthError::Encoding(e.to_string()))?;

    if bytes.len() < MIN_TOKEN_LEN {
        return Err(AuthError::TooShort { len: bytes.len() });
    }

    let (time_part, sig_part) = bytes.split_at(TIMESTAMP_LEN);
    let mut time_buf = [0u8; TIMESTAMP_LEN];
    time_buf.copy_from_slice(time_part);

    Ok(DecodedToken {
        timestamp: u32::from_be_bytes(time_buf),
        mode,
        signed_message: signed_message_for(&time_buf, mode),
        signature: sig_part.to_vec(),
    })
}

/// Sign `timestamp` with `keypair` and encode a compact token.
pub fn encode(
    timestamp: u32,
    keypair: &Secp256k1Keypair,
    mode: SigningMode,
) -> Result<String, AuthError> {
    let time_buf = timestamp.to_be_bytes();
    let sig = signature::sign(&signed_message_for(&time_buf, mode), keypair)?;
    Ok(assemble(&time_buf, sig.as_bytes(), mode))
}

/// Lay out `time_buf ∥ signature` and add the mode marker.
pub fn assemble(time_buf: &[u8; TIMESTAMP_LEN], signature: &[u8], mode: SigningMode) -> String {
    let mut raw = Vec::with_capacity(TIMESTAMP_LEN + signature.len());
    raw.extend_from_slice(time_buf);
    raw.extend_from_slice(signature);

    let body = URL_SAFE_LENIENT.encode(raw);
    match mode {
        SigningMode::Raw => body,
        SigningMode::ForcedUtf8 => format!("{FORCED_UTF8_MARKER}{body}"),
    }
}
