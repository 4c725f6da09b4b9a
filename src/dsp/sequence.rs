//! Sample points and the sequences every generator returns.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest grid [`Domain::grid`] will build.
pub const MAX_SAMPLES: usize = 10_000_000;

/// One evaluated point: independent variable and amplitude.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub value: f64,
}

impl Sample {
    pub const fn new(t: f64, value: f64) -> Self {
        Self { t, value }
    }
}

/// Ordered samples over a non-decreasing grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    samples: Vec<Sample>,
}

impl Sequence {
    /// Callers pass a grid they built themselves, already non-decreasing.
    pub(crate) fn new(samples: Vec<Sample>) -> Self {
        debug_assert!(
            samples.windows(2).all(|w| w[0].t <= w[1].t),
            "sequence grid must be non-decreasing"
        );
        Self { samples }
    }

    /// Evaluate `f` at every grid point.
    pub(crate) fn from_fn(grid: &[f64], f: impl Fn(f64) -> f64) -> Self {
        Self::new(grid.iter().map(|&t| Sample::new(t, f(t))).collect())
    }

    /// Pair a grid with precomputed values. Lengths must match.
    pub(crate) fn from_parts(grid: &[f64], values: &[f64]) -> Self {
        debug_assert_eq!(grid.len(), values.len());
        Self::new(
            grid.iter()
                .zip(values)
                .map(|(&t, &value)| Sample::new(t, value))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        self.samples.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.t)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }

    /// `(t, value)` tuples, the shape chart widgets consume.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.t, s.value)).collect()
    }

    /// Same grid, values transformed.
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            samples: self
                .samples
                .iter()
                .map(|s| Sample::new(s.t, f(s.value)))
                .collect(),
        }
    }

    /// Smallest and largest value, or `None` when empty.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Closed interval `[start, end]` of the independent variable.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub start: f64,
    pub end: f64,
}

impl Domain {
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(Error::invalid(format!(
                "domain bounds must be finite, got [{start}, {end}]"
            )));
        }
        if start > end {
            return Err(Error::invalid(format!(
                "domain start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Interval symmetric about zero.
    pub fn symmetric(half_width: f64) -> Result<Self> {
        Self::new(-half_width, half_width)
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Uniform grid `start, start + step, …` up to and including `end`.
    ///
    /// Points are computed as `start + i * step` so long grids do not drift.
    /// A tiny tolerance keeps `end` when `width / step` lands a hair below an
    /// integer due to rounding.
    pub fn grid(&self, step: f64) -> Result<Vec<f64>> {
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::invalid(format!(
                "step must be positive and finite, got {step}"
            )));
        }
        let count = (self.width() / step + 1e-9).floor() + 1.0;
        if !count.is_finite() || count > MAX_SAMPLES as f64 {
            return Err(Error::invalid(format!(
                "grid over [{}, {}] with step {step} exceeds {MAX_SAMPLES} samples",
                self.start, self.end
            )));
        }
        let count = count as usize;
        Ok((0..count).map(|i| self.start + i as f64 * step).collect())
    }
}
