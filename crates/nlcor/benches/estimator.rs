// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nlcor::{EstimatorOptions, nlcor};

fn sine_pair(n: usize) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (1..=n).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|&v| (v / (n as f64 / 10.0)).sin()).collect();
    (x, y)
}

fn benchmark_refinement_search_n1e3(c: &mut Criterion) {
    const N: usize = 1_000;
    let (x, y) = sine_pair(N);
    let options = EstimatorOptions::default();

    c.bench_function("refinement_search_n1e3", |b| {
        b.iter(|| {
            nlcor(black_box(&x), black_box(&y), black_box(&options))
                .expect("benchmark estimation should succeed");
        })
    });
}

fn benchmark_fixed_refine_n1e4(c: &mut Criterion) {
    const N: usize = 10_000;
    let (x, y) = sine_pair(N);
    let options = EstimatorOptions {
        refine: Some(0.05),
        ..EstimatorOptions::default()
    };

    c.bench_function("fixed_refine_n1e4", |b| {
        b.iter(|| {
            nlcor(black_box(&x), black_box(&y), black_box(&options))
                .expect("benchmark estimation should succeed");
        })
    });
}

criterion_group!(
    benches,
    benchmark_refinement_search_n1e3,
    benchmark_fixed_refine_n1e4
);
criterion_main!(benches);
