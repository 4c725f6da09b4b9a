//! Plain CSV dumps for plotting elsewhere.

use color_eyre::Result;
use signal_lab::dsp::{
    partial_sum, sample as sample_signal, ConvolutionScene, Domain, FourierTarget, PulseShape,
    Signal, SignalKind,
};
use std::io::{self, BufWriter, Write};

pub fn sample(
    kind: SignalKind,
    parameter: Option<f64>,
    start: Option<f64>,
    end: Option<f64>,
    step: Option<f64>,
) -> Result<()> {
    let (window, default_step) = kind.default_window();
    let domain = Domain::new(start.unwrap_or(window.start), end.unwrap_or(window.end))?;
    let signal = Signal::preset(kind, parameter.unwrap_or_else(|| kind.default_parameter()));
    let seq = sample_signal(&signal, domain, step.unwrap_or(default_step))?;
    tracing::info!(%signal, points = seq.len(), "sampled");

    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(out, "t,value")?;
    for s in &seq {
        writeln!(out, "{},{}", s.t, s.value)?;
    }
    out.flush()?;
    Ok(())
}

pub fn convolve(
    input: PulseShape,
    impulse: PulseShape,
    points: usize,
    shift: Option<f64>,
) -> Result<()> {
    let scene = ConvolutionScene::new(input, impulse, points, shift.unwrap_or(0.0))?;
    let mut out = BufWriter::new(io::stdout().lock());

    if shift.is_some() {
        tracing::info!(
            shift = scene.slice.shift,
            area = scene.slice.area,
            "product slice"
        );
        writeln!(out, "tau,input,shifted_impulse,product")?;
        let rows = scene
            .input
            .iter()
            .zip(scene.slice.shifted_impulse.iter())
            .zip(scene.slice.product.iter());
        for ((x, h), p) in rows {
            writeln!(out, "{},{},{},{}", x.t, x.value, h.value, p.value)?;
        }
    } else {
        tracing::info!(%input, %impulse, points, "convolution output (display scale)");
        writeln!(out, "t,output")?;
        for s in &scene.display_output {
            writeln!(out, "{},{}", s.t, s.value)?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn fourier(
    target: FourierTarget,
    harmonics: usize,
    period: f64,
    resolution: usize,
) -> Result<()> {
    let sum = partial_sum(target, harmonics, period, resolution)?;
    tracing::info!(
        %target,
        harmonics,
        max_error = sum.max_error(),
        peak = sum.peak(),
        "partial sum"
    );

    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(out, "t,approximation,ideal")?;
    for (a, i) in sum.approximation().iter().zip(sum.ideal().iter()) {
        writeln!(out, "{},{},{}", a.t, a.value, i.value)?;
    }
    out.flush()?;
    Ok(())
}
