//! Benchmarks for shape transforms and broadcasting.
//!
//! Run with:
//! ```bash
//! cargo bench --bench shape_ops
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shaped_core::ShapedArray;
use std::hint::black_box;

/// Benchmark reshape for various array sizes
fn bench_reshape(c: &mut Criterion) {
    let mut group = c.benchmark_group("reshape");

    let test_cases: Vec<(&str, Vec<usize>, Vec<isize>)> = vec![
        ("2d_to_1d", vec![1000, 1000], vec![-1]),
        ("1d_to_2d", vec![1_000_000], vec![1000, -1]),
        ("3d_to_2d", vec![100, 100, 100], vec![10000, 100]),
        ("4d_to_2d", vec![10, 20, 30, 40], vec![200, -1]),
    ];

    for (name, from_shape, to_shape) in test_cases {
        let array = ShapedArray::<f64>::ones(&from_shape);
        group.throughput(Throughput::Elements(array.scalar_count() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(&array, &to_shape),
            |b, (array, to_shape)| {
                b.iter(|| {
                    let reshaped = array.reshape(black_box(to_shape)).unwrap();
                    black_box(reshaped);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark stacking and unstacking along each axis of a 3D block
fn bench_stack_unstack(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_unstack");
    let array = ShapedArray::<f64>::ones(&[64, 64, 64]);
    group.throughput(Throughput::Elements(array.scalar_count() as u64));

    for axis in 0..3isize {
        let parts = array.unstack(axis).unwrap();
        group.bench_with_input(BenchmarkId::new("unstack", axis), &axis, |b, &axis| {
            b.iter(|| black_box(array.unstack(axis).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("stack", axis), &parts, |b, parts| {
            b.iter(|| black_box(ShapedArray::stack(parts, axis).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark broadcasting against a same-shape baseline
fn bench_broadcast(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast_add");
    let matrix = ShapedArray::<f64>::ones(&[1000, 1000]);
    let same = ShapedArray::<f64>::ones(&[1000, 1000]);
    let row = ShapedArray::<f64>::ones(&[1000]);
    let column = ShapedArray::<f64>::ones(&[1000, 1]);
    group.throughput(Throughput::Elements(matrix.scalar_count() as u64));

    group.bench_function("same_shape", |b| {
        b.iter(|| black_box(matrix.broadcast_add(&same).unwrap()))
    });
    group.bench_function("row", |b| {
        b.iter(|| black_box(matrix.broadcast_add(&row).unwrap()))
    });
    group.bench_function("column", |b| {
        b.iter(|| black_box(matrix.broadcast_add(&column).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_reshape, bench_stack_unstack, bench_broadcast);
criterion_main!(benches);
