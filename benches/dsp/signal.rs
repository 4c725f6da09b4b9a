//! Benchmarks for sampling elementary signals.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use signal_lab::dsp::{sample, Signal, SignalKind};

pub fn bench_signal(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/signal");

    for kind in SignalKind::ALL {
        let signal = Signal::preset(kind, kind.default_parameter());
        let (domain, step) = kind.default_window();
        group.bench_with_input(BenchmarkId::new("sample", kind), &signal, |b, signal| {
            b.iter(|| sample(black_box(signal), black_box(domain), black_box(step)))
        });
    }

    group.finish();
}
