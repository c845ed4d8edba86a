//! Token codec and request-path benchmarks.

use criterion::{black_box, Criterion};
use sigauth_core::domain::token;
use sigauth_core::{
    AuthConfig, AuthService, AuthenticationApi, FixedClock, Secp256k1Keypair, SigningMode,
};
use std::sync::Arc;

const NOW: i64 = 1_700_000_000;

pub fn bench_token_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("sigauth/token");
    let keypair = Secp256k1Keypair::from_bytes(&[0x6f; 32]).expect("fixed benchmark key");

    for mode in [SigningMode::Raw, SigningMode::ForcedUtf8] {
        let encoded = token::encode(NOW as u32, &keypair, mode).expect("encode");
        group.bench_function(format!("decode/{mode:?}"), |b| {
            b.iter(|| black_box(token::decode(black_box(&encoded))))
        });
    }

    group.finish();
}

pub fn bench_authenticate(c: &mut Criterion) {
    let mut group = c.benchmark_group("sigauth/authenticate");

    let config = AuthConfig::with_secret("11".repeat(32));
    let service = AuthService::new(&config, Arc::new(FixedClock::new(NOW))).expect("config");
    let keypair = Secp256k1Keypair::from_bytes(&[0x70; 32]).expect("fixed benchmark key");

    let compact = token::encode(NOW as u32, &keypair, SigningMode::Raw).expect("encode");
    let session = service
        .issue_session(&keypair.public_key_hex())
        .expect("issue");

    group.bench_function("compact", |b| {
        b.iter(|| black_box(service.authenticate(black_box(&compact))))
    });
    group.bench_function("session", |b| {
        b.iter(|| black_box(service.authenticate(black_box(session.as_str()))))
    });

    group.finish();
}
