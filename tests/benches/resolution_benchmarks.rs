//! Benchmarks for the hot per-request paths: PEM canonicalization and
//! key-pair verification.

use criterion::{criterion_group, criterion_main, Criterion};

use cg_01_identity_resolution::KeyPair;
use shared_types::pem::canonical_certificate;

fn bench_canonical_certificate(c: &mut Criterion) {
    let cert = rcgen::generate_simple_self_signed(vec!["bench".to_string()])
        .expect("certificate generation")
        .cert
        .pem();
    let escaped = cert.replace('\n', "\\n");

    c.bench_function("canonical_certificate/armored", |b| {
        b.iter(|| canonical_certificate(std::hint::black_box(&cert)))
    });
    c.bench_function("canonical_certificate/escaped", |b| {
        b.iter(|| canonical_certificate(std::hint::black_box(&escaped)))
    });
}

fn bench_key_pair_verify(c: &mut Criterion) {
    let issued = rcgen::generate_simple_self_signed(vec!["bench".to_string()])
        .expect("certificate generation");
    let key = issued.key_pair.serialize_pem();
    let cert = issued.cert.pem();

    c.bench_function("key_pair_verify", |b| {
        b.iter(|| {
            KeyPair::verify(
                std::hint::black_box(&key),
                std::hint::black_box(&cert),
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_canonical_certificate, bench_key_pair_verify);
criterion_main!(benches);
