//! Fuzz target for the compact token decoder and the request dispatch path.
//!
//! ## Running
//!
//! ```bash
//! cd crates/sigauth-core
//! cargo +nightly fuzz run fuzz_token_decode
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use sigauth_core::domain::token::{decode, MIN_TOKEN_LEN, TIMESTAMP_LEN};
use sigauth_core::{AuthConfig, AuthService, AuthenticationApi, FixedClock};
use std::sync::{Arc, OnceLock};

fn service() -> &'static AuthService {
    static SERVICE: OnceLock<AuthService> = OnceLock::new();
    SERVICE.get_or_init(|| {
        let config = AuthConfig::with_secret("42".repeat(32));
        AuthService::new(&config, Arc::new(FixedClock::new(1_700_000_000)))
            .expect("static fuzz config is valid")
    })
}

fuzz_target!(|data: &[u8]| {
    let Ok(token) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(decoded) = decode(token) {
        assert!(decoded.signature.len() + TIMESTAMP_LEN >= MIN_TOKEN_LEN);
        assert!(!decoded.signed_message.is_empty());
    }

    // Must fail closed, never panic.
    let _ = service().authenticate(token);
});
