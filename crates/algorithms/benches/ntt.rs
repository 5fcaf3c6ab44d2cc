//! Benchmarks for Number Theoretic Transform (NTT) operations
//!
//! Measures the forward and inverse transforms, the pointwise Montgomery
//! product and the full NTT-based multiplication path.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use latsig_algorithms::poly::prelude::*;
use latsig_params::pqc::dilithium::DILITHIUM_Q;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_poly(rng: &mut ChaCha20Rng) -> Poly {
    let mut p = Poly::zero();
    for c in p.coeffs.iter_mut() {
        *c = rng.gen_range(0..DILITHIUM_Q);
    }
    p
}

fn bench_forward_ntt(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let poly = random_poly(&mut rng);

    c.bench_function("ntt/forward", |b| b.iter(|| black_box(poly.ntt())));
}

fn bench_inverse_ntt(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let mut hat = random_poly(&mut rng).ntt();
    hat.reduce();

    c.bench_function("ntt/inverse", |b| {
        b.iter(|| black_box(hat.invntt_montgomery()))
    });
}

fn bench_ntt_multiplication(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let a = random_poly(&mut rng);
    let b_poly = random_poly(&mut rng);
    let a_hat = a.ntt();

    let mut group = c.benchmark_group("ntt_mul");
    group.bench_function("pointwise", |b| {
        let b_hat = b_poly.ntt();
        b.iter(|| black_box(a_hat.pointwise_montgomery(&b_hat)))
    });
    group.bench_function("full", |b| {
        b.iter_batched(
            || b_poly.clone(),
            |p| black_box(a_hat.pointwise_montgomery(&p.ntt()).invntt_montgomery()),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_montgomery(c: &mut Criterion) {
    c.bench_function("montgomery_reduce", |b| {
        b.iter(|| black_box(montgomery_reduce(black_box(0x1234_5678_9ABC))))
    });
}

criterion_group!(
    benches,
    bench_forward_ntt,
    bench_inverse_ntt,
    bench_ntt_multiplication,
    bench_montgomery
);
criterion_main!(benches);
