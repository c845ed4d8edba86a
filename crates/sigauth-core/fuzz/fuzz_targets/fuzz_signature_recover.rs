//! Fuzz target for public key recovery.
//!
//! Arbitrary header, r and s bytes must never panic, and a recovered key is
//! only ever reported as valid when it verifies.
//!
//! ## Running
//!
//! ```bash
//! cd crates/sigauth-core
//! cargo +nightly fuzz run fuzz_signature_recover
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use sigauth_core::{recover_and_verify, AuthError, CryptoError};

/// Fuzz input structure for recovery.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    message: Vec<u8>,
    header: u8,
    r: [u8; 32],
    s: [u8; 32],
}

fuzz_target!(|input: FuzzInput| {
    let mut signature = Vec::with_capacity(65);
    signature.push(input.header);
    signature.extend_from_slice(&input.r);
    signature.extend_from_slice(&input.s);

    let result = recover_and_verify(&input.message, &signature);

    // Deterministic
    assert_eq!(result, recover_and_verify(&input.message, &signature));

    match result {
        Ok(_) => {
            assert!(!input.message.is_empty());
            assert!((31..=34).contains(&input.header));
        }
        Err(AuthError::InvalidInput(_)) => assert!(input.message.is_empty()),
        Err(AuthError::Crypto(CryptoError::InvalidRecoveryId(h))) => {
            assert_eq!(h, input.header)
        }
        Err(_) => {}
    }
});
