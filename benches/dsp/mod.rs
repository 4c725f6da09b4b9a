//! Benchmarks for the numeric generators.

mod convolution;
mod fourier;
mod signal;

pub use convolution::bench_convolution;
pub use fourier::bench_fourier;
pub use signal::bench_signal;
