//! # SigAuth Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | `sigauth/digest` | Domain-separated double SHA-256 |
//! | `sigauth/signature` | Signing and public key recovery |
//! | `sigauth/token` | Compact token decode in both framings |
//! | `sigauth/authenticate` | Full request dispatch, compact and session |

use criterion::{criterion_group, criterion_main};
use sigauth_tests::benchmarks::{signature, token};

criterion_group!(
    benches,
    signature::bench_digest,
    signature::bench_sign_and_recover,
    token::bench_token_codec,
    token::bench_authenticate,
);
criterion_main!(benches);
