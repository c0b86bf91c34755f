//! Dispatch path benchmarks for ndvek
//!
//! Compares the equal-shape, scalar and general broadcast paths of binary
//! addition over the same result size.
//!
//! Run with: cargo bench --bench broadcast
//! Parallel: cargo bench --features parallel_proc --bench broadcast

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ndvek::NdArray;

fn ramp(shape: &[usize]) -> NdArray {
    let n: usize = shape.iter().product();
    let data: Vec<f64> = (0..n).map(|i| (i % 97) as f64 * 0.5).collect();
    NdArray::from_f64(shape, data).unwrap()
}

fn bench_add_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_paths");
    group.sample_size(20);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for size in [64, 256, 1024] {
        group.throughput(Throughput::Elements((size * size) as u64));

        let a = ramp(&[size, size]);
        let b = ramp(&[size, size]);
        let scalar = NdArray::from_f64([1], vec![2.0]).unwrap();
        let row = ramp(&[size]);
        let col = ramp(&[size, 1]);

        group.bench_with_input(BenchmarkId::new("equal_shape", size), &size, |bench, _| {
            bench.iter(|| black_box(a.add(&b).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("scalar_rhs", size), &size, |bench, _| {
            bench.iter(|| black_box(a.add(&scalar).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("broadcast_row", size), &size, |bench, _| {
            bench.iter(|| black_box(a.add(&row).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("broadcast_outer", size), &size, |bench, _| {
            bench.iter(|| black_box(col.add(&row).unwrap()))
        });
    }
    group.finish();
}

fn bench_scalar_lhs_identities(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_lhs");
    group.sample_size(20);

    let x = ramp(&[512, 512]).add_scalar(1.0).unwrap();
    let s = NdArray::from_f64([1], vec![10.0]).unwrap();

    group.bench_function("sub", |bench| bench.iter(|| black_box(s.sub(&x).unwrap())));
    group.bench_function("div", |bench| bench.iter(|| black_box(s.div(&x).unwrap())));
    group.finish();
}

criterion_group!(benches, bench_add_paths, bench_scalar_lhs_identities);
criterion_main!(benches);
