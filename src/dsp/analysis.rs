//! Signal properties: symmetry, energy and power.

use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::sequence::{Domain, Sample, Sequence};
use crate::{Error, Result};

/*
| property        | definition                       | finite for            |
| --------------- | -------------------------------- | --------------------- |
| even part       | x_e(t) = (x(t) + x(-t)) / 2      | every signal          |
| odd part        | x_o(t) = (x(t) - x(-t)) / 2      | every signal          |
| energy          | E = ∫ |x(t)|² dt                 | pulses, decays        |
| average power   | P = lim 1/T ∫ |x(t)|² dt          | periodic, step        |

Integrals become sums over the sampled grid: E ≈ Σ |x[n]|² · Δt and
P ≈ mean |x[n]|². Both are only as good as the window; a window that clips a
pulse underestimates its energy.
*/

/// A signal split into its even and odd parts.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub signal: Sequence,
    pub even: Sequence,
    pub odd: Sequence,
}

/// Even/odd decomposition of `x` sampled over `domain`.
///
/// `x` is evaluated at both `t` and `-t`, so the domain need not be symmetric.
pub fn even_odd(x: impl Fn(f64) -> f64, domain: Domain, step: f64) -> Result<Decomposition> {
    let grid = domain.grid(step)?;
    let mut signal = Vec::with_capacity(grid.len());
    let mut even = Vec::with_capacity(grid.len());
    let mut odd = Vec::with_capacity(grid.len());

    for &t in &grid {
        let forward = x(t);
        let mirrored = x(-t);
        signal.push(forward);
        even.push(0.5 * (forward + mirrored));
        odd.push(0.5 * (forward - mirrored));
    }

    Ok(Decomposition {
        signal: Sequence::from_parts(&grid, &signal),
        even: Sequence::from_parts(&grid, &even),
        odd: Sequence::from_parts(&grid, &odd),
    })
}

fn grid_step(seq: &Sequence) -> f64 {
    match (seq.samples().first(), seq.samples().last()) {
        (Some(first), Some(last)) if seq.len() > 1 => (last.t - first.t) / (seq.len() - 1) as f64,
        _ => 0.0,
    }
}

/// Energy `Σ |x|² · Δt` of a uniformly sampled sequence.
pub fn energy(seq: &Sequence) -> f64 {
    let dt = grid_step(seq);
    seq.values().map(|v| v * v * dt).sum()
}

/// Running energy: sample `n` holds the energy of samples `0..=n`.
pub fn cumulative_energy(seq: &Sequence) -> Sequence {
    let dt = grid_step(seq);
    let mut total = 0.0;
    Sequence::new(
        seq.iter()
            .map(|s| {
                total += s.value * s.value * dt;
                Sample::new(s.t, total)
            })
            .collect(),
    )
}

/// Mean of `|x|²`; zero for an empty sequence.
pub fn average_power(seq: &Sequence) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    seq.values().map(|v| v * v).sum::<f64>() / seq.len() as f64
}

/// Running average power: sample `n` averages `|x|²` over `0..=n`.
pub fn running_power(seq: &Sequence) -> Sequence {
    let mut sum = 0.0;
    Sequence::new(
        seq.iter()
            .enumerate()
            .map(|(i, s)| {
                sum += s.value * s.value;
                Sample::new(s.t, sum / (i + 1) as f64)
            })
            .collect(),
    )
}

/// Fundamental, one weighted second harmonic, and their sum.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    pub fundamental: Sequence,
    pub harmonic: Sequence,
    pub composite: Sequence,
}

/// `sin(2πt/T) + w·sin(4πt/T)`: still periodic with period `T`.
pub fn harmonic_composite(
    period: f64,
    harmonic_weight: f64,
    domain: Domain,
    step: f64,
) -> Result<Composite> {
    if !period.is_finite() || period <= 0.0 {
        return Err(Error::invalid(format!(
            "period must be positive and finite, got {period}"
        )));
    }
    if !harmonic_weight.is_finite() {
        return Err(Error::invalid(format!(
            "harmonic weight must be finite, got {harmonic_weight}"
        )));
    }

    let grid = domain.grid(step)?;
    let fundamental = |t: f64| (TAU * t / period).sin();
    let harmonic = |t: f64| harmonic_weight * (2.0 * TAU * t / period).sin();

    Ok(Composite {
        fundamental: Sequence::from_fn(&grid, fundamental),
        harmonic: Sequence::from_fn(&grid, harmonic),
        composite: Sequence::from_fn(&grid, |t| fundamental(t) + harmonic(t)),
    })
}
