//! Training loop: batching, hyperparameters, the epoch trainer, and the
//! run controller that ties them together.

pub mod batch;
pub mod config;
pub mod loss;
mod run;
mod state;
mod trainer;

pub use batch::Batch;
pub use config::{Hyperparameters, LossKind, OptimizerKind};
pub use run::{train_loop, RunOptions};
pub use state::{EpochOutcome, RunState};
pub use trainer::Trainer;
