//! Closed-form elementary signals and the sampler that evaluates them.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::sequence::{Domain, Sequence};
use crate::{Error, Result};

/*
Elementary Signals
==================

Every signal here is a plain function of continuous time t. Sampling one means
evaluating it on a uniform grid; nothing is stateful and no phase is carried
between calls, so the same request always produces the same points.

  exponential           C·e^(a·t)          grows for a > 0, decays for a < 0
  decaying exponential  e^(-a·|t|)         two-sided, peak 1 at t = 0
  sinusoid              A·cos(ω·t)         ω in rad/s
  sine / cosine         A·sin(2π·f·t)      f in Hz (cycles per unit time)
  unit step             u(t)               1 for t ≥ 0
  unit impulse          δ(t)               see the note below
  square                sgn(sin(2π·f·t))   ±1, odd harmonics only
  sawtooth              2(f·t - ⌊f·t + ½⌋) ramp in [-1, 1), period 1/f
  rectangle pulse       h for |t| ≤ w/2
  triangle pulse        1 - |t|/T for |t| ≤ T
  gaussian              e^(-a·t²)          finite energy, √(π/2a)
  damped sine           sin(2π·f·t)·e^(-d·t)

The Impulse Is an Approximation
-------------------------------

δ(t) is a distribution, not a function: zero width, unit area, infinite
height. A plot can only show a stand-in, so the impulse here is a narrow
rectangle of half-width IMPULSE_HALF_WIDTH and height IMPULSE_HEIGHT. Both are
visualization knobs; nothing downstream relies on the area they enclose.
Sample it with a step well below the half-width or the pulse is missed.
*/

/// Half-width of the rectangular stand-in for δ(t).
pub const IMPULSE_HALF_WIDTH: f64 = 0.05;
/// Height of the rectangular stand-in for δ(t).
pub const IMPULSE_HEIGHT: f64 = 20.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Exponential { scale: f64, rate: f64 },
    DecayingExponential { rate: f64 },
    Sinusoid { amplitude: f64, omega: f64 },
    Sine { amplitude: f64, frequency: f64 },
    Cosine { amplitude: f64, frequency: f64 },
    UnitStep,
    UnitImpulse,
    Square { frequency: f64 },
    Sawtooth { frequency: f64 },
    RectanglePulse { width: f64, height: f64 },
    TrianglePulse { half_width: f64 },
    Gaussian { rate: f64 },
    DampedSine { frequency: f64, decay: f64 },
}

impl Signal {
    /// Amplitude at time `t`.
    pub fn evaluate(&self, t: f64) -> f64 {
        match *self {
            Signal::Exponential { scale, rate } => scale * (rate * t).exp(),
            Signal::DecayingExponential { rate } => (-rate * t.abs()).exp(),
            Signal::Sinusoid { amplitude, omega } => amplitude * (omega * t).cos(),
            Signal::Sine {
                amplitude,
                frequency,
            } => amplitude * (TAU * frequency * t).sin(),
            Signal::Cosine {
                amplitude,
                frequency,
            } => amplitude * (TAU * frequency * t).cos(),
            Signal::UnitStep => {
                if t >= 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Signal::UnitImpulse => {
                if t.abs() < IMPULSE_HALF_WIDTH {
                    IMPULSE_HEIGHT
                } else {
                    0.0
                }
            }
            Signal::Square { frequency } => sign((TAU * frequency * t).sin()),
            Signal::Sawtooth { frequency } => {
                let ft = frequency * t;
                2.0 * (ft - (0.5 + ft).floor())
            }
            Signal::RectanglePulse { width, height } => {
                if t.abs() <= width / 2.0 {
                    height
                } else {
                    0.0
                }
            }
            Signal::TrianglePulse { half_width } => {
                let distance = t.abs();
                if distance <= half_width {
                    1.0 - distance / half_width
                } else {
                    0.0
                }
            }
            Signal::Gaussian { rate } => (-rate * t * t).exp(),
            Signal::DampedSine { frequency, decay } => {
                (TAU * frequency * t).sin() * (-decay * t).exp()
            }
        }
    }

    /// Reject parameters the closed forms cannot handle.
    pub fn validate(&self) -> Result<()> {
        let params: Vec<(&str, f64)> = match self {
            Signal::Exponential { scale, rate } => vec![("scale", *scale), ("rate", *rate)],
            Signal::DecayingExponential { rate } => vec![("rate", *rate)],
            Signal::Sinusoid { amplitude, omega } => {
                vec![("amplitude", *amplitude), ("omega", *omega)]
            }
            Signal::Sine {
                amplitude,
                frequency,
            }
            | Signal::Cosine {
                amplitude,
                frequency,
            } => vec![("amplitude", *amplitude), ("frequency", *frequency)],
            Signal::UnitStep | Signal::UnitImpulse => vec![],
            Signal::Square { frequency } | Signal::Sawtooth { frequency } => {
                vec![("frequency", *frequency)]
            }
            Signal::RectanglePulse { width, height } => {
                vec![("width", *width), ("height", *height)]
            }
            Signal::TrianglePulse { half_width } => vec![("half_width", *half_width)],
            Signal::Gaussian { rate } => vec![("rate", *rate)],
            Signal::DampedSine { frequency, decay } => {
                vec![("frequency", *frequency), ("decay", *decay)]
            }
        };

        if let Some((name, value)) = params.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::invalid(format!("{name} must be finite, got {value}")));
        }

        match *self {
            Signal::RectanglePulse { width, .. } if width < 0.0 => Err(Error::invalid(
                format!("rectangle width must be non-negative, got {width}"),
            )),
            Signal::TrianglePulse { half_width } if half_width <= 0.0 => Err(Error::invalid(
                format!("triangle half-width must be positive, got {half_width}"),
            )),
            _ => Ok(()),
        }
    }

    /// Build a signal from a kind and the single parameter its course widget
    /// exposes (rate, frequency, width...). Kinds without a knob ignore it.
    pub fn preset(kind: SignalKind, parameter: f64) -> Self {
        match kind {
            SignalKind::Exponential => Signal::Exponential {
                scale: 1.0,
                rate: parameter,
            },
            SignalKind::DecayingExponential => Signal::DecayingExponential { rate: parameter },
            SignalKind::Sinusoid => Signal::Sinusoid {
                amplitude: 1.0,
                omega: parameter,
            },
            SignalKind::Sine => Signal::Sine {
                amplitude: 1.0,
                frequency: parameter,
            },
            SignalKind::Cosine => Signal::Cosine {
                amplitude: 1.0,
                frequency: parameter,
            },
            SignalKind::UnitStep => Signal::UnitStep,
            SignalKind::UnitImpulse => Signal::UnitImpulse,
            SignalKind::Square => Signal::Square {
                frequency: parameter,
            },
            SignalKind::Sawtooth => Signal::Sawtooth {
                frequency: parameter,
            },
            SignalKind::RectanglePulse => Signal::RectanglePulse {
                width: parameter,
                height: 1.0,
            },
            SignalKind::TrianglePulse => Signal::TrianglePulse {
                half_width: parameter,
            },
            SignalKind::Gaussian => Signal::Gaussian { rate: parameter },
            SignalKind::DampedSine => Signal::DampedSine {
                frequency: 1.0,
                decay: parameter,
            },
        }
    }
}

/// Sample `signal` over `domain` every `step`.
///
/// Produces `floor((end - start) / step) + 1` points starting at `start`.
///
/// # Example
/// ```
/// use signal_lab::dsp::{sample, Domain, Signal};
/// let seq = sample(&Signal::UnitStep, Domain::new(-1.0, 1.0).unwrap(), 0.5).unwrap();
/// let values: Vec<f64> = seq.values().collect();
/// assert_eq!(values, vec![0.0, 0.0, 1.0, 1.0, 1.0]);
/// ```
pub fn sample(signal: &Signal, domain: Domain, step: f64) -> Result<Sequence> {
    signal.validate()?;
    let grid = domain.grid(step)?;
    Ok(Sequence::from_fn(&grid, |t| signal.evaluate(t)))
}

// Math.sign semantics: exact zeros stay zero.
#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn scaled(amplitude: f64) -> String {
    if amplitude == 1.0 {
        String::new()
    } else {
        format!("{amplitude}·")
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Signal::Exponential { scale, rate } => {
                write!(f, "x(t) = {}e^({rate}t)", scaled(scale))
            }
            Signal::DecayingExponential { rate } => write!(f, "x(t) = e^(-{rate}|t|)"),
            Signal::Sinusoid { amplitude, omega } => {
                write!(f, "x(t) = {}cos({omega}t)", scaled(amplitude))
            }
            Signal::Sine {
                amplitude,
                frequency,
            } => write!(f, "x(t) = {}sin(2π·{frequency}t)", scaled(amplitude)),
            Signal::Cosine {
                amplitude,
                frequency,
            } => write!(f, "x(t) = {}cos(2π·{frequency}t)", scaled(amplitude)),
            Signal::UnitStep => write!(f, "x(t) = u(t)"),
            Signal::UnitImpulse => write!(f, "x(t) = δ(t)"),
            Signal::Square { frequency } => write!(f, "x(t) = sgn(sin(2π·{frequency}t))"),
            Signal::Sawtooth { frequency } => {
                write!(f, "x(t) = 2({frequency}t - ⌊{frequency}t + 1/2⌋)")
            }
            Signal::RectanglePulse { width, height } => {
                write!(f, "x(t) = {}rect(t/{width})", scaled(height))
            }
            Signal::TrianglePulse { half_width } => write!(f, "x(t) = tri(t/{half_width})"),
            Signal::Gaussian { rate } => write!(f, "x(t) = e^(-{rate}t²)"),
            Signal::DampedSine { frequency, decay } => {
                write!(f, "x(t) = sin(2π·{frequency}t)·e^(-{decay}t)")
            }
        }
    }
}

/// Signal families selectable by name, each with one adjustable parameter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Exponential,
    Sinusoid,
    UnitStep,
    UnitImpulse,
    DecayingExponential,
    Sine,
    Cosine,
    Square,
    Sawtooth,
    RectanglePulse,
    TrianglePulse,
    Gaussian,
    DampedSine,
}

/// Slider description for a kind's parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterInfo {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterInfo {
    /// Clamp a slider position into range. Only for interactive widgets;
    /// `sample` itself never clamps.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl SignalKind {
    pub const ALL: [SignalKind; 13] = [
        SignalKind::Exponential,
        SignalKind::Sinusoid,
        SignalKind::UnitStep,
        SignalKind::UnitImpulse,
        SignalKind::DecayingExponential,
        SignalKind::Sine,
        SignalKind::Cosine,
        SignalKind::Square,
        SignalKind::Sawtooth,
        SignalKind::RectanglePulse,
        SignalKind::TrianglePulse,
        SignalKind::Gaussian,
        SignalKind::DampedSine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::Exponential => "exponential",
            SignalKind::Sinusoid => "sinusoid",
            SignalKind::UnitStep => "step",
            SignalKind::UnitImpulse => "impulse",
            SignalKind::DecayingExponential => "decaying-exp",
            SignalKind::Sine => "sine",
            SignalKind::Cosine => "cosine",
            SignalKind::Square => "square",
            SignalKind::Sawtooth => "sawtooth",
            SignalKind::RectanglePulse => "rect",
            SignalKind::TrianglePulse => "triangle",
            SignalKind::Gaussian => "gaussian",
            SignalKind::DampedSine => "damped-sine",
        }
    }

    /// Range of the kind's parameter, or `None` for fixed shapes.
    pub fn parameter_info(&self) -> Option<ParameterInfo> {
        let info = |label, min, max, step| {
            Some(ParameterInfo {
                label,
                min,
                max,
                step,
            })
        };
        match self {
            SignalKind::Exponential => info("Exponent (a)", -2.0, 2.0, 0.1),
            SignalKind::Sinusoid => info("Frequency (ω)", 0.5, 4.0, 0.1),
            SignalKind::DecayingExponential => info("Decay rate (a)", 0.1, 3.0, 0.1),
            SignalKind::Sine | SignalKind::Cosine | SignalKind::Square | SignalKind::Sawtooth => {
                info("Frequency (f)", 0.25, 4.0, 0.25)
            }
            SignalKind::RectanglePulse => info("Width (w)", 0.5, 6.0, 0.5),
            SignalKind::TrianglePulse => info("Half-width (T)", 0.5, 3.0, 0.25),
            SignalKind::Gaussian => info("Rate (a)", 0.1, 4.0, 0.1),
            SignalKind::DampedSine => info("Decay (d)", 0.0, 2.0, 0.1),
            SignalKind::UnitStep | SignalKind::UnitImpulse => None,
        }
    }

    /// Starting slider position.
    pub fn default_parameter(&self) -> f64 {
        match self {
            SignalKind::Exponential => 0.5,
            SignalKind::RectanglePulse => 2.0,
            SignalKind::DampedSine => 0.5,
            SignalKind::UnitStep | SignalKind::UnitImpulse => 0.0,
            _ => 1.0,
        }
    }

    /// Viewing window and step used by the course widgets.
    ///
    /// The impulse gets a narrow window and a fine step so its pulse is hit.
    pub fn default_window(&self) -> (Domain, f64) {
        match self {
            SignalKind::UnitImpulse => (
                Domain {
                    start: -0.5,
                    end: 0.5,
                },
                0.01,
            ),
            _ => (
                Domain {
                    start: -4.0,
                    end: 4.0,
                },
                0.1,
            ),
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignalKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SignalKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid(format!("unknown signal kind '{s}'")))
    }
}
