//! Time shifting, scaling and reversal of a signal's argument.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::sequence::{Domain, Sequence};
use crate::dsp::signal::Signal;
use crate::{Error, Result};

/*
Transforming the Time Axis
==========================

y(t) = x(a·t - b) is x evaluated at a remapped time. Order matters:
scale first, then shift, then (optionally) reverse the whole argument.

  a > 1        compress: features arrive sooner and are narrower
  0 < a < 1    stretch
  b > 0        delay: x(t - b) is x moved right by b (when a = 1)
  reverse      y(t) = x(-(a·t - b)), mirror about t = b/a

A common mistake is to read x(2t - 1) as "shift by 1, then compress by 2".
The peak of x(2t - 1) sits where 2t - 1 = 0, i.e. at t = 1/2, not t = 1.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeTransform {
    pub shift: f64,
    pub scale: f64,
    pub reverse: bool,
}

impl Default for TimeTransform {
    fn default() -> Self {
        Self {
            shift: 0.0,
            scale: 1.0,
            reverse: false,
        }
    }
}

impl TimeTransform {
    pub fn new(shift: f64, scale: f64, reverse: bool) -> Result<Self> {
        let transform = Self {
            shift,
            scale,
            reverse,
        };
        transform.validate()?;
        Ok(transform)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.shift.is_finite() {
            return Err(Error::invalid(format!(
                "time shift must be finite, got {}",
                self.shift
            )));
        }
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(Error::invalid(format!(
                "time scale must be finite and non-zero, got {}",
                self.scale
            )));
        }
        Ok(())
    }

    /// The time at which the original signal is evaluated.
    #[inline]
    pub fn argument(&self, t: f64) -> f64 {
        let u = self.scale * t - self.shift;
        if self.reverse {
            -u
        } else {
            u
        }
    }
}

impl fmt::Display for TimeTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut inner = String::new();
        if self.scale != 1.0 {
            inner.push_str(&self.scale.to_string());
        }
        inner.push('t');
        if self.shift > 0.0 {
            inner.push_str(&format!(" - {}", self.shift));
        } else if self.shift < 0.0 {
            inner.push_str(&format!(" + {}", self.shift.abs()));
        }

        match (self.reverse, self.shift != 0.0) {
            (true, true) => write!(f, "x(-({inner}))"),
            (true, false) => write!(f, "x(-{inner})"),
            (false, _) => write!(f, "x({inner})"),
        }
    }
}

/// Original and transformed signal on the same grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub original: Sequence,
    pub transformed: Sequence,
}

pub fn transform_sample(
    signal: &Signal,
    transform: &TimeTransform,
    domain: Domain,
    step: f64,
) -> Result<Transformed> {
    signal.validate()?;
    transform.validate()?;
    let grid = domain.grid(step)?;

    Ok(Transformed {
        original: Sequence::from_fn(&grid, |t| signal.evaluate(t)),
        transformed: Sequence::from_fn(&grid, |t| signal.evaluate(transform.argument(t))),
    })
}
