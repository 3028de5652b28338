use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dynmat::{DynMatrix, DynVector};
use rand::{rngs::SmallRng, SeedableRng};
use std::hint::black_box;

fn matrix_mult(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_mult");
    let mut rng = SmallRng::seed_from_u64(1);
    for size in [16, 64, 128] {
        let m1: DynMatrix<f64> = DynMatrix::random(&mut rng, size).unwrap();
        let m2: DynMatrix<f64> = DynMatrix::random(&mut rng, size).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(&m1) * black_box(&m2))
        });
    }
    group.finish();
}

fn matrix_vector(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_vector");
    let mut rng = SmallRng::seed_from_u64(2);
    for size in [64, 512, 2048] {
        let m: DynMatrix<f64> = DynMatrix::random(&mut rng, size).unwrap();
        let v: DynVector<f64> = DynVector::random(&mut rng, size).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(&m) * black_box(&v))
        });
    }
    group.finish();
}

fn clone_and_take(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(3);
    let m: DynMatrix<f64> = DynMatrix::random(&mut rng, 512).unwrap();
    c.bench_function("clone 512x512", |b| b.iter(|| black_box(&m).clone()));
    c.bench_function("take 512x512", |b| {
        b.iter_batched(
            || m.clone(),
            |mut m| m.take(),
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, matrix_mult, matrix_vector, clone_and_take);
criterion_main!(benches);
