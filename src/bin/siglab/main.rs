//! siglab - signal processing course toolkit
//!
//! Run with: cargo run --bin siglab -- --help

mod cli;
mod commands;
mod ui;

use clap::Parser;
use signal_lab::config::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // The explorer owns the terminal; log lines would tear its frames.
    if !matches!(cli.command, Commands::Explore) {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
            .init();
    }

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };

    match cli.command {
        Commands::Serve { host, port } => commands::serve::run(config, host, port).await,
        Commands::Ask { context, question } => {
            commands::ask::run(config, &context, question.as_deref()).await
        }
        Commands::Sample {
            kind,
            parameter,
            start,
            end,
            step,
        } => commands::csv::sample(kind, parameter, start, end, step),
        Commands::Convolve {
            input,
            impulse,
            points,
            shift,
        } => commands::csv::convolve(input, impulse, points, shift),
        Commands::Fourier {
            target,
            harmonics,
            period,
            resolution,
        } => commands::csv::fourier(target, harmonics, period, resolution),
        Commands::Explore => ui::run(),
    }
}
