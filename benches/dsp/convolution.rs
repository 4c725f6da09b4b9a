//! Benchmarks for linear convolution.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use signal_lab::dsp::convolution::{pulse, DEFAULT_POINTS};
use signal_lab::dsp::{convolve, convolve_fft, ConvolutionScene, PulseShape};

use crate::SEQUENCE_LENGTHS;

pub fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/convolution");

    for &len in SEQUENCE_LENGTHS {
        let x = pulse(PulseShape::Rectangle, len);
        let h = pulse(PulseShape::Triangle, len);

        // Direct summation - O(N²) multiply-adds
        group.bench_with_input(BenchmarkId::new("direct", len), &len, |b, _| {
            b.iter(|| convolve(black_box(&x), black_box(&h)))
        });

        // FFT - planner setup is paid on every call
        group.bench_with_input(BenchmarkId::new("fft", len), &len, |b, _| {
            b.iter(|| convolve_fft(black_box(&x), black_box(&h)))
        });
    }

    // Everything one slider movement recomputes
    group.bench_function("scene", |b| {
        b.iter(|| {
            ConvolutionScene::new(
                PulseShape::Rectangle,
                PulseShape::Triangle,
                DEFAULT_POINTS,
                black_box(-12.0),
            )
        })
    });

    group.finish();
}
