//! Pronosticar: supervised training loop for sequence forecasting
//!
//! Provides the glue between a windowed time-series dataset and a gradient
//! layer: per-epoch optimization, validation, cosine learning-rate
//! scheduling, early stopping, best-checkpoint persistence, and experiment
//! tracking.
//!
//! # Example
//!
//! ```no_run
//! use pronosticar::data::SeriesFrame;
//! use pronosticar::train::{train_loop, Hyperparameters, RunOptions};
//!
//! # fn main() -> pronosticar::Result<()> {
//! let hp = Hyperparameters::default();
//! let frame = SeriesFrame::from_json_file("frame.json")?;
//! let opts = RunOptions::new("run-0");
//!
//! let best_val_loss = train_loop(&hp, &frame, &opts, None)?;
//! println!("best val loss: {best_val_loss:.4}");
//! # Ok(())
//! # }
//! ```

pub mod autograd;
pub mod cli;
pub mod data;
pub mod io;
pub mod model;
pub mod optim;
pub mod tracking;
pub mod train;

pub use autograd::Tensor;

/// Top-level error type for training runs
///
/// Failures in the gradient layer or on the filesystem propagate uncaught
/// and abort the run; there is no retry or recovery policy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Tracking error: {0}")]
    Tracking(#[from] tracking::TrackingError),
}

/// Result alias for fallible operations in this crate
pub type Result<T> = std::result::Result<T, Error>;
