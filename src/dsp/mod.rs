//! Numeric generators for signal-processing course material.
//!
//! Every function here is pure: parameters in, sample points out. Nothing
//! holds state between calls, so a caller that wants to react to a slider
//! simply calls again with the new value.

/// Even/odd decomposition, energy and power.
pub mod analysis;
/// Linear convolution and the flip-shift-multiply view of it.
pub mod convolution;
/// Truncated Fourier series for square and sawtooth waves.
pub mod fourier;
pub mod sequence;
/// Closed-form elementary signals and the sampler.
pub mod signal;
/// Shift, scale and reversal of the time axis.
pub mod transform;

pub use analysis::{average_power, energy, even_odd, Composite, Decomposition};
pub use convolution::{convolve, convolve_fft, product_slice, ConvolutionScene, PulseShape};
pub use fourier::{partial_sum, FourierTarget, PartialSum};
pub use sequence::{Domain, Sample, Sequence};
pub use signal::{sample, Signal, SignalKind};
pub use transform::{transform_sample, TimeTransform, Transformed};
