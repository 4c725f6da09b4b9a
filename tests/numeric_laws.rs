use signal_lab::dsp::convolution::{pulse, DEFAULT_POINTS};
use signal_lab::dsp::fourier::DEFAULT_RESOLUTION;
use signal_lab::dsp::{
    convolve, convolve_fft, partial_sum, product_slice, sample, ConvolutionScene, Domain,
    FourierTarget, PulseShape, Signal,
};
use signal_lab::Error;
use std::f64::consts::{PI, TAU};

#[test]
fn sampled_grid_has_expected_length_and_spacing() {
    let signal = Signal::Sine {
        amplitude: 1.0,
        frequency: 1.0,
    };
    for (start, end, step) in [(0.0, 1.0, 0.1), (-4.0, 4.0, 0.1), (-0.5, 0.5, 0.01), (0.0, 3.0, 0.7)] {
        let seq = sample(&signal, Domain::new(start, end).unwrap(), step).unwrap();
        let expected = ((end - start) / step + 1e-9).floor() as usize + 1;
        assert_eq!(seq.len(), expected, "[{start}, {end}] step {step}");
        for (i, s) in seq.iter().enumerate() {
            assert!((s.t - (start + i as f64 * step)).abs() < 1e-12);
        }
    }
}

#[test]
fn bad_sampling_requests_are_rejected_not_clamped() {
    let domain = Domain::new(0.0, 1.0).unwrap();
    assert!(matches!(
        sample(&Signal::UnitStep, domain, 0.0),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        sample(&Signal::UnitStep, domain, -0.1),
        Err(Error::InvalidParameter(_))
    ));
    assert!(Domain::new(1.0, 0.0).is_err());
}

#[test]
fn every_generated_sequence_runs_forward_in_time() {
    let ordered = |seq: &signal_lab::dsp::Sequence| {
        seq.times().zip(seq.times().skip(1)).all(|(a, b)| a <= b)
    };
    let signal = Signal::Gaussian { rate: 1.0 };
    assert!(ordered(&sample(&signal, Domain::symmetric(4.0).unwrap(), 0.1).unwrap()));

    let scene = ConvolutionScene::new(PulseShape::Triangle, PulseShape::Rectangle, 101, 3.0).unwrap();
    for seq in [&scene.input, &scene.slice.product, &scene.output, &scene.display_output] {
        assert!(ordered(seq));
    }

    let sum = partial_sum(FourierTarget::Sawtooth, 7, TAU, DEFAULT_RESOLUTION).unwrap();
    assert!(ordered(&sum.approximation()));
}

#[test]
fn oversized_grids_are_rejected() {
    let widest = Domain::new(-f64::MAX, f64::MAX).unwrap();
    assert!(matches!(
        sample(&Signal::UnitStep, widest, 1.0),
        Err(Error::InvalidParameter(_))
    ));
    let sine = Signal::Sine {
        amplitude: 1.0,
        frequency: 1.0,
    };
    assert!(matches!(
        sample(&sine, Domain::symmetric(4.0).unwrap(), 1e-15),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn convolution_length_is_m_plus_n_minus_one() {
    for (m, n) in [(1, 1), (3, 5), (200, 200), (17, 4)] {
        let y = convolve(&vec![1.0; m], &vec![0.5; n]);
        assert_eq!(y.len(), m + n - 1);
    }
    assert!(convolve(&[], &[1.0, 2.0]).is_empty());
    assert!(convolve_fft(&[1.0], &[]).is_empty());
}

#[test]
fn rect_with_rect_gives_a_triangle() {
    let y = convolve(&[1.0; 4], &[1.0; 4]);
    assert_eq!(y, vec![1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0]);

    let x = pulse(PulseShape::Rectangle, DEFAULT_POINTS);
    let y = convolve(&x, &x);
    let width = DEFAULT_POINTS / 4;
    let peak = y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(peak, width as f64);
    // rises by one per sample, then falls by one
    let ramps = y
        .windows(2)
        .filter(|w| (w[1] - w[0]).abs() == 1.0)
        .count();
    assert_eq!(ramps, 2 * width);
}

#[test]
fn fft_and_direct_sums_agree() {
    let x = pulse(PulseShape::Triangle, 137);
    let h: Vec<f64> = (0..61).map(|i| (i as f64 * 0.3).sin()).collect();
    let direct = convolve(&x, &h);
    let fast = convolve_fft(&x, &h);
    assert_eq!(direct.len(), fast.len());
    for (a, b) in direct.iter().zip(&fast) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn slice_area_matches_output_at_integer_shifts() {
    for (xs, hs) in [
        (PulseShape::Rectangle, PulseShape::Rectangle),
        (PulseShape::Rectangle, PulseShape::Triangle),
        (PulseShape::Triangle, PulseShape::Triangle),
    ] {
        let scene = ConvolutionScene::new(xs, hs, DEFAULT_POINTS, 0.0).unwrap();
        let x = pulse(xs, DEFAULT_POINTS);
        let h = pulse(hs, DEFAULT_POINTS);
        for shift in -60..=60 {
            let slice = product_slice(&x, &h, shift as f64).unwrap();
            let index = (shift + DEFAULT_POINTS as i64) as usize;
            let y = scene.output.get(index).unwrap().value;
            assert!(
                (slice.area - y).abs() < 1e-9,
                "{xs}/{hs} shift {shift}: area {} vs y {y}",
                slice.area
            );
        }
    }
}

#[test]
fn far_shifts_give_empty_products() {
    let x = pulse(PulseShape::Rectangle, DEFAULT_POINTS);
    let slice = product_slice(&x, &x, 150.0).unwrap();
    assert_eq!(slice.area, 0.0);
    assert!(slice.product.values().all(|v| v == 0.0));
}

#[test]
fn fourier_with_no_harmonics_is_silent() {
    for target in [FourierTarget::Square, FourierTarget::Sawtooth] {
        let sum = partial_sum(target, 0, TAU, DEFAULT_RESOLUTION).unwrap();
        assert!(sum.approximation().values().all(|v| v == 0.0));
        assert_eq!(sum.ideal().len(), DEFAULT_RESOLUTION);
    }
}

#[test]
fn more_harmonics_approximate_better() {
    let mut previous = f64::INFINITY;
    for harmonics in [1, 3, 9, 27, 81] {
        let sum = partial_sum(FourierTarget::Sawtooth, harmonics, TAU, DEFAULT_RESOLUTION).unwrap();
        let err = sum.rms_error();
        assert!(err < previous, "H={harmonics}: {err} !< {previous}");
        previous = err;
    }
}

#[test]
fn first_square_harmonic_peaks_at_four_over_pi() {
    let sum = partial_sum(FourierTarget::Square, 1, TAU, 4).unwrap();
    let at_quarter_period = sum.approximation().get(1).unwrap();
    assert!((at_quarter_period.t - PI / 2.0).abs() < 1e-12);
    assert!((at_quarter_period.value - 1.2732).abs() < 1e-4);
}
