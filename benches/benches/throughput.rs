//! CryptoNight Criterion Benchmark
//!
//! One memory-hard digest costs tens of milliseconds; sample sizes are kept
//! small accordingly.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::prelude::*;
use std::hint::black_box;

use cryptonight::{BufferPool, Hasher, Variant};

/// Mining blobs are 76 bytes; that is the realistic input size.
const BLOB_SIZE: usize = 76;

// =============================================================================
// BENCHMARK 1: VARIANTS
// =============================================================================

/// Full digest latency per variant.
fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Variants");
    group.sample_size(10);
    group.throughput(Throughput::Elements(1));

    let mut input = vec![0u8; BLOB_SIZE];
    rand::rng().fill(&mut input[..]);

    for variant in [Variant::Zero, Variant::One, Variant::Two] {
        let hasher = Hasher::new(variant);
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(variant),
            &input,
            |b, data| b.iter(|| hasher.sum(black_box(data)).unwrap()),
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: POOLING
// =============================================================================

/// Pool recycling vs a fresh 2 MiB allocation per call.
fn bench_pooling(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Pooling");
    group.sample_size(10);

    let mut input = vec![0u8; BLOB_SIZE];
    rand::rng().fill(&mut input[..]);

    let recycling = BufferPool::new();
    group.bench_function("recycled", |b| {
        b.iter(|| cryptonight::sum_with(&recycling, black_box(&input), Variant::Zero).unwrap());
    });

    let transient = BufferPool::with_max_idle(0);
    group.bench_function("fresh-alloc", |b| {
        b.iter(|| cryptonight::sum_with(&transient, black_box(&input), Variant::Zero).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_variants, bench_pooling);
criterion_main!(benches);
