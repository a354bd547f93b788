//! Model checkpoint format
//!
//! Parameters are serialized as an ordered list, not a map, so two runs
//! that reach the same weights produce byte-identical checkpoint files.

use crate::model::Forecaster;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One named parameter tensor, flattened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamState {
    pub name: String,
    pub values: Vec<f32>,
}

/// A serializable snapshot of model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    pub format_version: u32,
    pub past_len: usize,
    pub horizon: usize,
    pub params: Vec<ParamState>,
}

impl ModelState {
    /// Capture the current parameters of a model
    pub fn capture(model: &dyn Forecaster, past_len: usize, horizon: usize) -> Self {
        let params = model
            .named_params()
            .into_iter()
            .map(|(name, tensor)| ParamState { name, values: tensor.data().to_vec() })
            .collect();
        Self { format_version: 1, past_len, horizon, params }
    }

    /// Named parameter values for loading back into a model
    pub fn named_values(&self) -> Vec<(String, Vec<f32>)> {
        self.params.iter().map(|p| (p.name.clone(), p.values.clone())).collect()
    }
}

/// Write a model snapshot as JSON
pub fn save_model<P: AsRef<Path>>(
    model: &dyn Forecaster,
    past_len: usize,
    horizon: usize,
    path: P,
) -> Result<()> {
    let state = ModelState::capture(model, past_len, horizon);
    let json = serde_json::to_string_pretty(&state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a model snapshot back from JSON
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<ModelState> {
    let contents = std::fs::read_to_string(path)?;
    let state: ModelState = serde_json::from_str(&contents)?;
    Ok(state)
}
