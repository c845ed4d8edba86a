//! Signature primitive benchmarks.

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use sigauth_core::{digest, recover_and_verify, sign, Secp256k1Keypair};
use std::time::Duration;

fn keypair() -> Secp256k1Keypair {
    Secp256k1Keypair::from_bytes(&[0x5e; 32]).expect("fixed benchmark key")
}

pub fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("sigauth/digest");

    for size in [4usize, 64, 1024] {
        let message = vec![0xabu8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, m| {
            b.iter(|| black_box(digest(m)))
        });
    }

    group.finish();
}

pub fn bench_sign_and_recover(c: &mut Criterion) {
    let mut group = c.benchmark_group("sigauth/signature");
    group.measurement_time(Duration::from_secs(10));

    let keypair = keypair();
    let message = b"benchmark message";
    let signature = sign(message, &keypair).expect("sign");

    group.bench_function("sign", |b| {
        b.iter(|| black_box(sign(black_box(message), &keypair)))
    });

    group.bench_function("recover_and_verify", |b| {
        b.iter(|| black_box(recover_and_verify(black_box(message), signature.as_bytes())))
    });

    let mut tampered = *signature.as_bytes();
    tampered[40] ^= 0x01;
    group.bench_function("recover_tampered", |b| {
        b.iter(|| black_box(recover_and_verify(black_box(message), &tampered)))
    });

    group.finish();
}
