//! Discrete linear convolution and the flip-shift-multiply view of it.

use std::fmt;
use std::str::FromStr;

use rustfft::{num_complex::Complex, FftPlanner};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::sequence::Sequence;
use crate::{Error, Result};

/*
Convolution
===========

For finite sequences x (length M) and h (length N):

    y[n] = Σ_k x[k] · h[n - k]        n = 0 … M + N - 2

Indices of h outside [0, N) contribute zero. That is linear convolution: the
output is longer than either input and nothing wraps around (circular
convolution would fold the tail back onto the start).

Flip, Shift, Multiply, Sum
--------------------------

Reading the formula one output at a time:

  1. flip      h(τ) becomes h(-τ)
  2. shift     slide the flipped copy to h(t - τ)
  3. multiply  pointwise with x(τ)
  4. sum       the area under that product is y(t)

`product_slice` computes steps 1-3 for a single t on a grid centered at zero,
τ_i = i - N/2. The index into h for τ_i is

    j = round(t - τ_i + N/2)

and is bounds-checked; anything outside [0, N) reads as zero. Summing the
product gives y at output index round(t) + N, the same number `convolve`
produces there.

Display Scaling
---------------

Two unit pulses of width W overlap to a peak of W, far above the pulses
themselves. Plots divide the output by DISPLAY_SCALE_DIVISOR so both fit one
axis. That is a presentation choice: `convolve` never applies it, and
`scale_for_display` is the one place it happens.
*/

/// Divisor applied to convolution output for plotting only.
pub const DISPLAY_SCALE_DIVISOR: f64 = 20.0;

/// Resolution of the course's step-by-step view.
pub const DEFAULT_POINTS: usize = 200;

/// Linear convolution by direct double summation, O(M·N).
///
/// Returns `x.len() + h.len() - 1` values, or nothing if either input is empty.
///
/// # Example
/// ```
/// use signal_lab::dsp::convolution::convolve;
/// let y = convolve(&[1.0; 4], &[1.0; 4]);
/// assert_eq!(y, vec![1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0]);
/// ```
pub fn convolve(x: &[f64], h: &[f64]) -> Vec<f64> {
    if x.is_empty() || h.is_empty() {
        return Vec::new();
    }

    let out_len = x.len() + h.len() - 1;
    let mut y = vec![0.0; out_len];
    for (n, out) in y.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (k, &xk) in x.iter().enumerate() {
            // h[n - k] is zero outside [0, N)
            if let Some(&hk) = n.checked_sub(k).and_then(|j| h.get(j)) {
                sum += xk * hk;
            }
        }
        *out = sum;
    }
    y
}

/// Same result as [`convolve`] computed through the frequency domain.
///
/// Both inputs are zero-padded to a power of two at least `M + N - 1` long,
/// so the circular product equals the linear one. Values agree with the
/// direct sum up to floating-point rounding.
pub fn convolve_fft(x: &[f64], h: &[f64]) -> Vec<f64> {
    if x.is_empty() || h.is_empty() {
        return Vec::new();
    }

    let out_len = x.len() + h.len() - 1;
    let fft_len = out_len.next_power_of_two();

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(fft_len);
    let inverse = planner.plan_fft_inverse(fft_len);

    let padded = |values: &[f64]| -> Vec<Complex<f64>> {
        let mut buffer = vec![Complex::new(0.0, 0.0); fft_len];
        for (slot, &v) in buffer.iter_mut().zip(values) {
            slot.re = v;
        }
        buffer
    };

    let mut x_spec = padded(x);
    let mut h_spec = padded(h);
    forward.process(&mut x_spec);
    forward.process(&mut h_spec);

    for (a, b) in x_spec.iter_mut().zip(&h_spec) {
        *a *= *b;
    }
    inverse.process(&mut x_spec);

    // rustfft leaves the inverse unnormalized
    let norm = 1.0 / fft_len as f64;
    x_spec[..out_len].iter().map(|c| c.re * norm).collect()
}

/// Divide values by `divisor` for plotting. Not part of the convolution.
pub fn scale_for_display(values: &[f64], divisor: f64) -> Result<Vec<f64>> {
    if !divisor.is_finite() || divisor == 0.0 {
        return Err(Error::invalid(format!(
            "display divisor must be finite and non-zero, got {divisor}"
        )));
    }
    Ok(values.iter().map(|v| v / divisor).collect())
}

/// Grid `τ_i = i - n/2`, centered on zero.
pub fn centered_domain(n: usize) -> Vec<f64> {
    let half = n as f64 / 2.0;
    (0..n).map(|i| i as f64 - half).collect()
}

/// Output index for shift `t` on an `n`-point centered grid, if in range.
pub fn output_index_for_shift(shift: f64, n: usize) -> Option<usize> {
    if !shift.is_finite() || n == 0 {
        return None;
    }
    // range check in f64; an integer cast saturates for far shifts
    let index = shift.round() + n as f64;
    (index >= 0.0 && index < (2 * n - 1) as f64).then_some(index as usize)
}

/// One frame of the flip-shift-multiply walk-through.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSlice {
    pub shift: f64,
    /// h(shift - τ) on the centered grid.
    pub shifted_impulse: Sequence,
    /// x(τ) · h(shift - τ).
    pub product: Sequence,
    /// Sum of the product, i.e. y(shift) before display scaling.
    pub area: f64,
}

/// Flip `h`, slide it to `shift`, and multiply with `x`.
///
/// Both inputs live on the same `N`-point centered grid. A shift that moves
/// the flipped impulse completely off the input yields an all-zero product
/// and zero area.
pub fn product_slice(x: &[f64], h: &[f64], shift: f64) -> Result<ProductSlice> {
    if x.len() != h.len() {
        return Err(Error::invalid(format!(
            "input and impulse must share a grid, got lengths {} and {}",
            x.len(),
            h.len()
        )));
    }
    if !shift.is_finite() {
        return Err(Error::invalid(format!("shift must be finite, got {shift}")));
    }

    let n = x.len();
    let half = n as f64 / 2.0;
    let domain = centered_domain(n);

    let shifted: Vec<f64> = domain
        .iter()
        .map(|&tau| {
            let index = (shift - tau + half).round();
            // out-of-support reads are zero, never an error
            if index >= 0.0 && index < n as f64 {
                h[index as usize]
            } else {
                0.0
            }
        })
        .collect();

    let product: Vec<f64> = x.iter().zip(&shifted).map(|(a, b)| a * b).collect();
    let area = product.iter().sum();

    Ok(ProductSlice {
        shift,
        shifted_impulse: Sequence::from_parts(&domain, &shifted),
        product: Sequence::from_parts(&domain, &product),
        area,
    })
}

/// Elementary shapes used as input and impulse response.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseShape {
    Rectangle,
    Triangle,
}

impl PulseShape {
    pub fn toggled(self) -> Self {
        match self {
            PulseShape::Rectangle => PulseShape::Triangle,
            PulseShape::Triangle => PulseShape::Rectangle,
        }
    }
}

impl fmt::Display for PulseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PulseShape::Rectangle => f.write_str("rect"),
            PulseShape::Triangle => f.write_str("triangle"),
        }
    }
}

impl FromStr for PulseShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Ok(PulseShape::Rectangle),
            "tri" | "triangle" => Ok(PulseShape::Triangle),
            other => Err(Error::invalid(format!("unknown pulse shape '{other}'"))),
        }
    }
}

/// A pulse a quarter of `total_points` wide, centered in the array.
///
/// The triangle starts and ends at zero and peaks at 1 in the middle.
pub fn pulse(shape: PulseShape, total_points: usize) -> Vec<f64> {
    let mut signal = vec![0.0; total_points];
    let width = total_points / 4;
    let start = (total_points - width) / 2;
    let half_width = width as f64 / 2.0;

    for i in 0..width {
        signal[start + i] = match shape {
            PulseShape::Rectangle => 1.0,
            PulseShape::Triangle => 1.0 - (i as f64 - half_width).abs() / half_width,
        };
    }
    signal
}

/// Everything the step-by-step convolution view draws for one shift.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionScene {
    pub input: Sequence,
    pub impulse: Sequence,
    pub slice: ProductSlice,
    /// Unscaled y[n] over `t = n - N`.
    pub output: Sequence,
    /// `output` divided by [`DISPLAY_SCALE_DIVISOR`].
    pub display_output: Sequence,
}

impl ConvolutionScene {
    pub fn new(
        input_shape: PulseShape,
        impulse_shape: PulseShape,
        points: usize,
        shift: f64,
    ) -> Result<Self> {
        if points == 0 {
            return Err(Error::invalid("convolution grid needs at least one point"));
        }
        let x = pulse(input_shape, points);
        let h = pulse(impulse_shape, points);
        Self::from_samples(&x, &h, shift)
    }

    /// Build a scene from arbitrary equal-length samples.
    pub fn from_samples(x: &[f64], h: &[f64], shift: f64) -> Result<Self> {
        let slice = product_slice(x, h, shift)?;
        let n = x.len();
        let domain = centered_domain(n);

        let y = convolve(x, h);
        let out_grid: Vec<f64> = (0..y.len()).map(|i| i as f64 - n as f64).collect();
        let scaled = scale_for_display(&y, DISPLAY_SCALE_DIVISOR)?;

        Ok(Self {
            input: Sequence::from_parts(&domain, x),
            impulse: Sequence::from_parts(&domain, h),
            slice,
            output: Sequence::from_parts(&out_grid, &y),
            display_output: Sequence::from_parts(&out_grid, &scaled),
        })
    }

    /// Unscaled output at the scene's shift, or zero past either end.
    pub fn output_at_shift(&self) -> f64 {
        output_index_for_shift(self.slice.shift, self.input.len())
            .and_then(|i| self.output.get(i))
            .map_or(0.0, |s| s.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_length_is_sum_minus_one() {
        for n in [1, 2, 7, 50] {
            let x = vec![0.5; n];
            assert_eq!(convolve(&x, &x).len(), 2 * n - 1);
        }
        assert_eq!(convolve(&[1.0, 2.0], &[1.0, 2.0, 3.0]).len(), 4);
        assert!(convolve(&[], &[1.0]).is_empty());
    }

    #[test]
    fn rect_with_rect_is_a_discrete_triangle() {
        let y = convolve(&[1.0; 4], &[1.0; 4]);
        assert_eq!(y, vec![1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn matches_definition_with_zero_padding() {
        let x = [1.0, -2.0, 0.5, 3.0];
        let h = [0.25, 1.0, -1.0, 2.0];
        let y = convolve(&x, &h);
        for (n, &yn) in y.iter().enumerate() {
            let mut expected = 0.0;
            for k in 0..x.len() {
                let j = n as i64 - k as i64;
                if j >= 0 && (j as usize) < h.len() {
                    expected += x[k] * h[j as usize];
                }
            }
            assert!((yn - expected).abs() < 1e-12, "y[{n}] = {yn}, expected {expected}");
        }
    }

    #[test]
    fn fft_path_agrees_with_direct_sum() {
        let x = pulse(PulseShape::Triangle, 64);
        let h = pulse(PulseShape::Rectangle, 64);
        let direct = convolve(&x, &h);
        let fast = convolve_fft(&x, &h);
        assert_eq!(direct.len(), fast.len());
        for (a, b) in direct.iter().zip(&fast) {
            assert!((a - b).abs() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    fn display_scaling_is_separate() {
        let y = convolve(&[1.0; 4], &[1.0; 4]);
        let scaled = scale_for_display(&y, DISPLAY_SCALE_DIVISOR).unwrap();
        assert_eq!(y[3], 4.0);
        assert!((scaled[3] - 0.2).abs() < 1e-12);
        assert!(scale_for_display(&y, 0.0).is_err());
    }

    #[test]
    fn pulses_are_centered_quarter_width() {
        let rect = pulse(PulseShape::Rectangle, 200);
        assert_eq!(rect.iter().filter(|&&v| v == 1.0).count(), 50);
        assert_eq!(rect[75], 1.0);
        assert_eq!(rect[124], 1.0);
        assert_eq!(rect[74], 0.0);
        assert_eq!(rect[125], 0.0);

        let tri = pulse(PulseShape::Triangle, 200);
        assert_eq!(tri[75], 0.0);
        assert_eq!(tri[100], 1.0);
        assert!((tri[87] - 0.48).abs() < 1e-12);
    }

    #[test]
    fn slice_area_equals_convolution_output() {
        let x = pulse(PulseShape::Rectangle, 40);
        let h = pulse(PulseShape::Triangle, 40);
        let y = convolve(&x, &h);
        for shift in -30..=30 {
            let slice = product_slice(&x, &h, shift as f64).unwrap();
            let index = output_index_for_shift(shift as f64, 40).unwrap();
            assert!(
                (slice.area - y[index]).abs() < 1e-9,
                "shift {shift}: area {} vs y {}",
                slice.area,
                y[index]
            );
        }
    }

    #[test]
    fn slice_is_the_flipped_impulse() {
        // asymmetric impulse makes the flip visible
        let x = vec![1.0; 8];
        let h = [0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0];
        let slice = product_slice(&x, &h, 0.0).unwrap();
        let shifted: Vec<f64> = slice.shifted_impulse.values().collect();
        // τ = -1 reads h[5], τ = 0 reads h[4]
        assert_eq!(shifted, vec![0.0, 0.0, 0.0, 2.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(slice.area, 3.0);
    }

    #[test]
    fn far_shift_gives_zero_product_not_error() {
        let x = pulse(PulseShape::Rectangle, 200);
        let h = pulse(PulseShape::Rectangle, 200);
        for shift in [-180.0, 180.0, 1e6] {
            let slice = product_slice(&x, &h, shift).unwrap();
            assert!(slice.product.values().all(|v| v == 0.0));
            assert_eq!(slice.area, 0.0);
        }
        for shift in [1e19, -1e19, f64::MAX, f64::MIN] {
            let scene =
                ConvolutionScene::new(PulseShape::Rectangle, PulseShape::Rectangle, 200, shift)
                    .unwrap();
            assert_eq!(scene.slice.area, 0.0);
            assert_eq!(scene.output_at_shift(), 0.0);
            assert_eq!(output_index_for_shift(shift, 200), None);
        }
    }

    #[test]
    fn slice_rejects_bad_input() {
        assert!(product_slice(&[1.0; 4], &[1.0; 3], 0.0).is_err());
        assert!(product_slice(&[1.0; 4], &[1.0; 4], f64::NAN).is_err());
    }

    #[test]
    fn scene_bundles_consistent_views() {
        let scene =
            ConvolutionScene::new(PulseShape::Rectangle, PulseShape::Rectangle, 200, -1.0).unwrap();
        assert_eq!(scene.input.len(), 200);
        assert_eq!(scene.output.len(), 399);
        assert_eq!(scene.output.get(0).unwrap().t, -200.0);
        // each rect spans τ = -25..=24, its flip spans -24..=25, so the two
        // fully overlap at t = -1
        assert_eq!(scene.slice.area, 50.0);
        assert_eq!(scene.output_at_shift(), 50.0);
        assert!((scene.display_output.get(199).unwrap().value - 2.5).abs() < 1e-12);

        let centered =
            ConvolutionScene::new(PulseShape::Rectangle, PulseShape::Rectangle, 200, 0.0).unwrap();
        assert_eq!(centered.slice.area, 49.0);
    }

    #[test]
    fn shapes_parse_and_toggle() {
        assert_eq!("rect".parse::<PulseShape>().unwrap(), PulseShape::Rectangle);
        assert_eq!("Triangle".parse::<PulseShape>().unwrap(), PulseShape::Triangle);
        assert!("circle".parse::<PulseShape>().is_err());
        assert_eq!(PulseShape::Rectangle.toggled(), PulseShape::Triangle);
    }
}
