//! Benchmarks for Fourier partial sums.

use std::f64::consts::TAU;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use signal_lab::dsp::fourier::DEFAULT_RESOLUTION;
use signal_lab::dsp::{partial_sum, FourierTarget, PartialSum};

const HARMONICS: &[usize] = &[1, 10, 50, 100];

pub fn bench_fourier(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/fourier");

    for &harmonics in HARMONICS {
        for target in [FourierTarget::Square, FourierTarget::Sawtooth] {
            group.bench_with_input(
                BenchmarkId::new(target.to_string(), harmonics),
                &harmonics,
                |b, &h| b.iter(|| partial_sum(target, black_box(h), TAU, DEFAULT_RESOLUTION)),
            );
        }
    }

    // One slider click: add a single term to an existing sum
    group.bench_function("add_harmonic", |b| {
        b.iter_batched(
            || {
                PartialSum::new(FourierTarget::Square, 50, TAU, DEFAULT_RESOLUTION)
                    .expect("valid parameters")
            },
            |mut sum| {
                sum.add_harmonic();
                sum
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}
