//! Explorer state and key handling
//!
//! Every key press mutates these fields; the views recompute their sequences
//! from scratch on the next draw.

use crossterm::event::KeyCode;
use signal_lab::dsp::convolution::DEFAULT_POINTS;
use signal_lab::dsp::fourier::DEFAULT_RESOLUTION;
use signal_lab::dsp::{
    partial_sum, sample, ConvolutionScene, FourierTarget, PartialSum, PulseShape, Sequence,
    Signal, SignalKind,
};
use signal_lab::Result;
use std::f64::consts::TAU;

pub const MAX_HARMONICS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Signals,
    Convolution,
    Fourier,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Signals => View::Convolution,
            View::Convolution => View::Fourier,
            View::Fourier => View::Signals,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Signals => "Signals",
            View::Convolution => "Convolution",
            View::Fourier => "Fourier series",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExplorerState {
    pub view: View,
    /// Index into `SignalKind::ALL`
    pub kind_index: usize,
    pub parameter: f64,
    pub input_shape: PulseShape,
    pub impulse_shape: PulseShape,
    pub shift: f64,
    pub target: FourierTarget,
    pub harmonics: usize,
    pub should_quit: bool,
}

impl Default for ExplorerState {
    fn default() -> Self {
        let kind = SignalKind::ALL[0];
        Self {
            view: View::Signals,
            kind_index: 0,
            parameter: kind.default_parameter(),
            input_shape: PulseShape::Rectangle,
            impulse_shape: PulseShape::Rectangle,
            shift: 0.0,
            target: FourierTarget::Square,
            harmonics: 1,
            should_quit: false,
        }
    }
}

impl ExplorerState {
    pub fn kind(&self) -> SignalKind {
        SignalKind::ALL[self.kind_index]
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.view = self.view.next(),
            KeyCode::Right => self.nudge(1.0),
            KeyCode::Left => self.nudge(-1.0),
            KeyCode::PageUp => self.nudge(10.0),
            KeyCode::PageDown => self.nudge(-10.0),
            KeyCode::Down => self.cycle_kind(1),
            KeyCode::Up => self.cycle_kind(SignalKind::ALL.len() - 1),
            KeyCode::Char('i') => self.input_shape = self.input_shape.toggled(),
            KeyCode::Char('h') => self.impulse_shape = self.impulse_shape.toggled(),
            KeyCode::Char('t') => self.target = self.target.toggled(),
            _ => {}
        }
    }

    /// Move the current view's slider by `clicks` steps.
    fn nudge(&mut self, clicks: f64) {
        match self.view {
            View::Signals => {
                if let Some(info) = self.kind().parameter_info() {
                    self.parameter = info.clamp(self.parameter + clicks * info.step);
                }
            }
            View::Convolution => {
                let limit = DEFAULT_POINTS as f64;
                self.shift = (self.shift + clicks).clamp(-limit, limit);
            }
            View::Fourier => {
                let h = self.harmonics as f64 + clicks;
                self.harmonics = h.clamp(1.0, MAX_HARMONICS as f64) as usize;
            }
        }
    }

    fn cycle_kind(&mut self, by: usize) {
        if self.view != View::Signals {
            return;
        }
        self.kind_index = (self.kind_index + by) % SignalKind::ALL.len();
        self.parameter = self.kind().default_parameter();
    }

    pub fn signal(&self) -> Signal {
        Signal::preset(self.kind(), self.parameter)
    }

    pub fn sampled_signal(&self) -> Result<Sequence> {
        let (domain, step) = self.kind().default_window();
        sample(&self.signal(), domain, step)
    }

    pub fn convolution(&self) -> Result<ConvolutionScene> {
        ConvolutionScene::new(self.input_shape, self.impulse_shape, DEFAULT_POINTS, self.shift)
    }

    pub fn fourier(&self) -> Result<PartialSum> {
        partial_sum(self.target, self.harmonics, TAU, DEFAULT_RESOLUTION)
    }
}
