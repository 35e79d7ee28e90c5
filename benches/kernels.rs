//! Kernel micro-benchmarks for the active backend.
//!
//! Run with: `cargo bench`
//! View HTML reports in: `target/criterion/`
//!
//! The same suite runs against whichever backend the build selected, so
//! comparing runs across `RUSTFLAGS` settings (or across machines) shows what
//! each claimed kernel buys over the portable reference.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ganita::{Matrix, Quaternion, Vector};

fn vector_kernels(c: &mut Criterion) {
    let a = Vector::new(1.0, -2.0, 3.0, -4.0);
    let b = Vector::new(0.5, 4.0, -1.5, 2.0);

    let mut group = c.benchmark_group(format!("vector/{}", ganita::active()));

    group.bench_function("add", |bencher| {
        bencher.iter(|| black_box(a) + black_box(b));
    });
    group.bench_function("dot", |bencher| {
        bencher.iter(|| black_box(a).dot(black_box(b)));
    });
    group.bench_function("cross3", |bencher| {
        bencher.iter(|| black_box(a).cross3(black_box(b)));
    });
    group.bench_function("normalize", |bencher| {
        bencher.iter(|| black_box(a).normalize());
    });
    group.bench_function("lerp", |bencher| {
        bencher.iter(|| black_box(a).lerp(black_box(b), black_box(0.25)));
    });

    group.finish();
}

fn quaternion_kernels(c: &mut Criterion) {
    let half = std::f32::consts::FRAC_PI_4;
    let q0 = Quaternion::new(0.0, 0.0, half.sin(), half.cos());
    let q1 = Quaternion::new(half.sin(), 0.0, 0.0, half.cos());
    let v = Vector::new(1.0, 2.0, 3.0, 1.0);

    let mut group = c.benchmark_group(format!("quaternion/{}", ganita::active()));

    group.bench_function("mul", |bencher| {
        bencher.iter(|| black_box(q0) * black_box(q1));
    });
    group.bench_function("rotate", |bencher| {
        bencher.iter(|| black_box(q0).rotate(black_box(v)));
    });
    group.bench_function("slerp", |bencher| {
        bencher.iter(|| black_box(q0).slerp(black_box(q1), black_box(0.35)));
    });
    group.bench_function("inverse", |bencher| {
        bencher.iter(|| black_box(q0).inverse());
    });

    group.finish();
}

fn matrix_kernels(c: &mut Criterion) {
    let m0 = Matrix::from_array([
        [1.0, 2.0, 3.0, 4.0],
        [5.0, 6.0, 7.0, 8.0],
        [9.0, 10.0, 11.0, 12.0],
        [13.0, 14.0, 15.0, 16.0],
    ]);
    let m1 = m0.transpose();
    let v = Vector::new(1.0, 2.0, 3.0, 1.0);

    let mut group = c.benchmark_group(format!("matrix/{}", ganita::active()));

    group.bench_function("mul", |bencher| {
        bencher.iter(|| black_box(m0) * black_box(m1));
    });
    group.bench_function("transpose", |bencher| {
        bencher.iter(|| black_box(m0).transpose());
    });
    group.bench_function("transform", |bencher| {
        bencher.iter(|| black_box(m0).transform(black_box(v)));
    });

    group.finish();
}

criterion_group!(benches, vector_kernels, quaternion_kernels, matrix_kernels);
criterion_main!(benches);
