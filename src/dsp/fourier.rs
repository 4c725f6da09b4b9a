//! Truncated Fourier series for square and sawtooth waves.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::sequence::Sequence;
use crate::{Error, Result};

/*
Fourier Partial Sums
====================

A periodic signal with period T can be rebuilt from sines and cosines at
multiples of the fundamental ω₀ = 2π/T. Stopping after H terms gives the
partial sum S_H(t); watching S_H converge as H grows is the whole point of
the view this module feeds.

Square wave (±1, odd symmetry) - odd harmonics only, falling as 1/k:

    S_H(t) = Σ_{n=1}^{H} (4/π) · 1/(2n-1) · sin((2n-1)·ω₀·t)

Sawtooth (ramp from -1 to 1 over one period, centered on t = 0) - every
harmonic, alternating sign, falling as 1/n:

    S_H(t) = Σ_{n=1}^{H} (2/π) · (-1)^(n+1)/n · sin(n·ω₀·t)

With H = 0 the sum is empty and every sample is zero.

Refinement
----------

S_{H+1} = S_H + term_{H+1}, sample by sample. `PartialSum::add_harmonic`
does exactly that instead of recomputing the whole sum.

Gibbs Phenomenon
----------------

Near a jump the partial sum overshoots by roughly 9% of the jump height, and
that overshoot does not shrink as H grows - it only narrows toward the
discontinuity. The ideal waveform is returned alongside the approximation so
the gap can be drawn or measured.
*/

/// Samples per period used by the course view.
pub const DEFAULT_RESOLUTION: usize = 500;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourierTarget {
    Square,
    Sawtooth,
}

impl FourierTarget {
    /// Value of the `n`-th series term (1-based) at phase `theta = ω₀·t`.
    pub fn term(&self, n: usize, theta: f64) -> f64 {
        debug_assert!(n >= 1, "series terms are 1-based");
        match self {
            FourierTarget::Square => {
                let k = (2 * n - 1) as f64;
                (4.0 / PI) * (1.0 / k) * (k * theta).sin()
            }
            FourierTarget::Sawtooth => {
                let sign = if n % 2 == 1 { 1.0 } else { -1.0 };
                let k = n as f64;
                (2.0 / PI) * (sign / k) * (k * theta).sin()
            }
        }
    }

    /// The exact waveform the series converges to, at phase `theta`.
    pub fn ideal(&self, theta: f64) -> f64 {
        match self {
            FourierTarget::Square => {
                if theta.sin() >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            FourierTarget::Sawtooth => {
                // wrap into [-π, π), where the series converges to θ/π
                let wrapped = (theta + PI).rem_euclid(TAU) - PI;
                wrapped / PI
            }
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            FourierTarget::Square => FourierTarget::Sawtooth,
            FourierTarget::Sawtooth => FourierTarget::Square,
        }
    }
}

impl fmt::Display for FourierTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FourierTarget::Square => f.write_str("square"),
            FourierTarget::Sawtooth => f.write_str("sawtooth"),
        }
    }
}

impl FromStr for FourierTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "square" => Ok(FourierTarget::Square),
            "sawtooth" | "saw" => Ok(FourierTarget::Sawtooth),
            other => Err(Error::invalid(format!("unknown Fourier target '{other}'"))),
        }
    }
}

/// Partial sum over one period, kept alongside the ideal target.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialSum {
    target: FourierTarget,
    harmonics: usize,
    omega0: f64,
    grid: Vec<f64>,
    approximation: Vec<f64>,
    ideal: Vec<f64>,
}

impl PartialSum {
    /// Sum the first `harmonics` terms on `resolution` points of `[0, period)`.
    pub fn new(
        target: FourierTarget,
        harmonics: usize,
        period: f64,
        resolution: usize,
    ) -> Result<Self> {
        if !period.is_finite() || period <= 0.0 {
            return Err(Error::invalid(format!(
                "period must be positive and finite, got {period}"
            )));
        }
        if resolution == 0 {
            return Err(Error::invalid("resolution must be at least one sample"));
        }

        let omega0 = TAU / period;
        let grid: Vec<f64> = (0..resolution)
            .map(|i| i as f64 * period / resolution as f64)
            .collect();
        let ideal = grid.iter().map(|&t| target.ideal(omega0 * t)).collect();

        let mut sum = Self {
            target,
            harmonics: 0,
            omega0,
            approximation: vec![0.0; grid.len()],
            grid,
            ideal,
        };
        for _ in 0..harmonics {
            sum.add_harmonic();
        }
        Ok(sum)
    }

    /// Add the next series term to every sample.
    pub fn add_harmonic(&mut self) {
        let n = self.harmonics + 1;
        for (value, &t) in self.approximation.iter_mut().zip(&self.grid) {
            *value += self.target.term(n, self.omega0 * t);
        }
        self.harmonics = n;
    }

    pub fn target(&self) -> FourierTarget {
        self.target
    }

    pub fn harmonics(&self) -> usize {
        self.harmonics
    }

    pub fn approximation(&self) -> Sequence {
        Sequence::from_parts(&self.grid, &self.approximation)
    }

    pub fn ideal(&self) -> Sequence {
        Sequence::from_parts(&self.grid, &self.ideal)
    }

    /// Largest value the approximation reaches. Tracks Gibbs overshoot.
    pub fn peak(&self) -> f64 {
        self.approximation
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Largest pointwise gap to the ideal waveform.
    pub fn max_error(&self) -> f64 {
        self.errors().fold(0.0, f64::max)
    }

    /// Root-mean-square gap to the ideal waveform.
    pub fn rms_error(&self) -> f64 {
        let n = self.grid.len() as f64;
        (self.errors().map(|e| e * e).sum::<f64>() / n).sqrt()
    }

    fn errors(&self) -> impl Iterator<Item = f64> + '_ {
        self.approximation
            .iter()
            .zip(&self.ideal)
            .map(|(a, b)| (a - b).abs())
    }
}

/// Partial sum and ideal waveform for `target` over one period.
///
/// # Example
/// ```
/// use signal_lab::dsp::fourier::{partial_sum, FourierTarget};
/// use std::f64::consts::TAU;
/// let sum = partial_sum(FourierTarget::Square, 1, TAU, 4).unwrap();
/// // t = π/2 is the second of four samples
/// let peak = sum.approximation().get(1).unwrap().value;
/// assert!((peak - 4.0 / std::f64::consts::PI).abs() < 1e-12);
/// ```
pub fn partial_sum(
    target: FourierTarget,
    harmonics: usize,
    period: f64,
    resolution: usize,
) -> Result<PartialSum> {
    PartialSum::new(target, harmonics, period, resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGETS: [FourierTarget; 2] = [FourierTarget::Square, FourierTarget::Sawtooth];

    #[test]
    fn zero_harmonics_is_the_zero_sequence() {
        for target in TARGETS {
            let sum = partial_sum(target, 0, TAU, DEFAULT_RESOLUTION).unwrap();
            assert_eq!(sum.approximation().len(), DEFAULT_RESOLUTION);
            assert!(sum.approximation().values().all(|v| v == 0.0));
        }
    }

    #[test]
    fn single_square_harmonic_is_scaled_sine() {
        let sum = partial_sum(FourierTarget::Square, 1, TAU, DEFAULT_RESOLUTION).unwrap();
        for s in sum.approximation().iter() {
            assert!((s.value - (4.0 / PI) * s.t.sin()).abs() < 1e-12);
        }

        let quarter = partial_sum(FourierTarget::Square, 1, TAU, 4).unwrap();
        let at_half_pi = quarter.approximation().get(1).unwrap();
        assert!((at_half_pi.t - PI / 2.0).abs() < 1e-12);
        assert!((at_half_pi.value - 1.2732).abs() < 1e-4);
    }

    #[test]
    fn each_harmonic_adds_exactly_one_term() {
        for target in TARGETS {
            for k in 0..12 {
                let before = partial_sum(target, k, TAU, 128).unwrap().approximation();
                let after = partial_sum(target, k + 1, TAU, 128).unwrap().approximation();
                for (a, b) in before.iter().zip(after.iter()) {
                    let diff = (b.value - a.value).abs();
                    let term = target.term(k + 1, a.t).abs();
                    assert!((diff - term).abs() < 1e-12, "{target} k={k} t={}", a.t);
                }
            }
        }
    }

    #[test]
    fn incremental_refinement_matches_fresh_sum() {
        let mut sum = partial_sum(FourierTarget::Sawtooth, 3, TAU, 64).unwrap();
        sum.add_harmonic();
        sum.add_harmonic();
        let fresh = partial_sum(FourierTarget::Sawtooth, 5, TAU, 64).unwrap();
        assert_eq!(sum.harmonics(), 5);
        for (a, b) in sum.approximation().iter().zip(fresh.approximation().iter()) {
            assert!((a.value - b.value).abs() < 1e-12);
        }
    }

    #[test]
    fn ideal_waveforms_over_one_period() {
        let square = FourierTarget::Square;
        assert_eq!(square.ideal(PI / 2.0), 1.0);
        assert_eq!(square.ideal(3.0 * PI / 2.0), -1.0);

        let saw = FourierTarget::Sawtooth;
        assert!((saw.ideal(0.0)).abs() < 1e-12);
        assert!((saw.ideal(PI / 2.0) - 0.5).abs() < 1e-12);
        assert!((saw.ideal(3.0 * PI / 2.0) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn sawtooth_converges_away_from_the_jump() {
        let sum = partial_sum(FourierTarget::Sawtooth, 200, TAU, 4000).unwrap();
        // sample 1000 of 4000 sits at t = π/2
        let s = sum.approximation().get(1000).unwrap();
        assert!((s.value - 0.5).abs() < 0.01, "got {}", s.value);
    }

    #[test]
    fn gibbs_overshoot_does_not_vanish() {
        // the first overshoot peak sits at t = π / 2H; with 20 000 samples
        // per period a grid point lands exactly on it for both counts
        for harmonics in [50, 200] {
            let sum = partial_sum(FourierTarget::Square, harmonics, TAU, 20_000).unwrap();
            assert!(
                sum.peak() > 1.15,
                "{harmonics} harmonics peaked at {}",
                sum.peak()
            );
        }
    }

    #[test]
    fn rms_error_shrinks_with_more_harmonics() {
        let coarse = partial_sum(FourierTarget::Square, 5, TAU, 1000).unwrap();
        let fine = partial_sum(FourierTarget::Square, 50, TAU, 1000).unwrap();
        assert!(fine.rms_error() < coarse.rms_error());
        assert!(fine.max_error() > 0.5, "jumps keep a large pointwise error");
    }

    #[test]
    fn custom_period_scales_the_grid() {
        let sum = partial_sum(FourierTarget::Square, 1, 2.0, 8).unwrap();
        let s = sum.approximation().get(2).unwrap();
        assert!((s.t - 0.5).abs() < 1e-12);
        assert!((s.value - 4.0 / PI).abs() < 1e-12);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(partial_sum(FourierTarget::Square, 3, TAU, 0).is_err());
        assert!(partial_sum(FourierTarget::Square, 3, 0.0, 10).is_err());
        assert!(partial_sum(FourierTarget::Square, 3, -1.0, 10).is_err());
        assert!(partial_sum(FourierTarget::Square, 3, f64::NAN, 10).is_err());
    }

    #[test]
    fn targets_parse_by_name() {
        assert_eq!("square".parse::<FourierTarget>().unwrap(), FourierTarget::Square);
        assert_eq!("saw".parse::<FourierTarget>().unwrap(), FourierTarget::Sawtooth);
        assert!("triangle".parse::<FourierTarget>().is_err());
    }
}
