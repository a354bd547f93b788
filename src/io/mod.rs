//! Checkpoint persistence

mod model;

pub use model::{load_model, save_model, ModelState, ParamState};
