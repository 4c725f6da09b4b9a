use clap::{Parser, Subcommand};
use signal_lab::dsp::{FourierTarget, PulseShape, SignalKind};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "siglab")]
#[command(author, version, about = "Signals, convolution and Fourier series for the classroom")]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON config file (defaults are used when absent)
    #[arg(long, global = true, env = "SIGLAB_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the question-answering API server
    Serve {
        /// Host address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask the assistant questions interactively
    Ask {
        /// Page text the questions refer to
        #[arg(long, default_value = "")]
        context: String,

        /// Ask a single question and exit
        #[arg(long)]
        question: Option<String>,
    },

    /// Print a sampled signal as CSV
    Sample {
        /// Signal family (exponential, sine, rect, ...)
        kind: SignalKind,

        /// The family's adjustable parameter
        #[arg(long, allow_hyphen_values = true)]
        parameter: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        start: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        end: Option<f64>,

        #[arg(long)]
        step: Option<f64>,
    },

    /// Print the convolution of two pulses as CSV
    Convolve {
        #[arg(long, default_value = "rect")]
        input: PulseShape,

        #[arg(long, default_value = "rect")]
        impulse: PulseShape,

        /// Samples per pulse grid
        #[arg(long, default_value_t = signal_lab::dsp::convolution::DEFAULT_POINTS)]
        points: usize,

        /// Print the flip-shift-multiply slice at this shift instead of the output
        #[arg(long, allow_hyphen_values = true)]
        shift: Option<f64>,
    },

    /// Print a Fourier partial sum and its target as CSV
    Fourier {
        #[arg(default_value = "square")]
        target: FourierTarget,

        #[arg(long, default_value_t = 5)]
        harmonics: usize,

        #[arg(long, default_value_t = std::f64::consts::TAU)]
        period: f64,

        #[arg(long, default_value_t = signal_lab::dsp::fourier::DEFAULT_RESOLUTION)]
        resolution: usize,
    },

    /// Browse signals, convolution and Fourier series in the terminal
    Explore,
}
