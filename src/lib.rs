pub mod dsp;
pub mod error;

#[cfg(feature = "server")]
pub mod assistant;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use error::{Error, Result};
