/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array2, Zip};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rle_bitmap::prelude::*;
use std::hint::black_box;
use std::time::Duration;

const ROWS: usize = 480;
const COLS: usize = 640;

fn gen_image(seed: u64, density: f64) -> Array2<bool> {
    let mut rng = SmallRng::seed_from_u64(seed);
    Array2::from_shape_simple_fn((ROWS, COLS), || rng.random_bool(density))
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("and");
    for density in [0.001, 0.01, 0.1] {
        let a = gen_image(0, density);
        let b = gen_image(1, density);
        let sparse_a = SparseBitmap::from_dense(a.view()).unwrap();
        let sparse_b = SparseBitmap::from_dense(b.view()).unwrap();
        let mut out = Array2::from_elem((ROWS, COLS), false);

        group.bench_function(BenchmarkId::new("dense", density), |bench| {
            bench.iter(|| {
                Zip::from(&mut out)
                    .and(&a)
                    .and(&b)
                    .for_each(|out, &a, &b| *out = a && b);
                black_box(&out);
            })
        });
        group.bench_function(BenchmarkId::new("sparse_dense", density), |bench| {
            let op = BinaryOp::new(&sparse_a, &b, And);
            bench.iter(|| black_box(op.evaluate_to(out.view_mut()).unwrap()))
        });
        group.bench_function(BenchmarkId::new("sparse_sparse", density), |bench| {
            let op = BinaryOp::sparse(&sparse_a, &sparse_b, And);
            bench.iter(|| black_box(op.evaluate_to(out.view_mut()).unwrap()))
        });
    }
    group.finish();
}

fn bench_correlate(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlate");
    let kernel = Array2::from_elem((7, 7), 1.0_f32);
    for density in [0.001, 0.01, 0.1] {
        let bitmap = SparseBitmap::from_dense(gen_image(2, density).view()).unwrap();
        let mut out = Array2::zeros((ROWS, COLS));
        group.bench_function(BenchmarkId::new("7x7", density), |bench| {
            bench.iter(|| {
                out.fill(0.0);
                correlate(&bitmap, kernel.view(), out.view_mut()).unwrap();
                black_box(&out);
            })
        });
    }
    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");
    for density in [0.001, 0.01, 0.1] {
        let bitmap = SparseBitmap::from_dense(gen_image(3, density).view()).unwrap();
        group.bench_function(BenchmarkId::new("pixels", density), |bench| {
            bench.iter(|| black_box(bitmap.iter().fold(0, |acc, (r, c)| acc ^ r ^ c)))
        });
        group.bench_function(BenchmarkId::new("popcount", density), |bench| {
            bench.iter(|| black_box(bitmap.popcount()))
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().warm_up_time(Duration::from_secs(1)).measurement_time(Duration::from_secs(3));
    targets = bench_eval, bench_correlate, bench_iter
}
criterion_main!(benches);
