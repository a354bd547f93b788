//! Sliding window extraction over a series split

use super::SeriesSplit;
use crate::{Error, Result};

/// One supervised example: a past-context window, the covariates over the
/// forecast horizon, and the target values to predict.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub past: Vec<f32>,
    pub covariates: Vec<f32>,
    pub target: Vec<f32>,
}

/// All sliding windows of a split, in series order
#[derive(Debug, Clone)]
pub struct WindowDataset {
    windows: Vec<Window>,
    past_len: usize,
    horizon: usize,
}

impl WindowDataset {
    /// Extract every window with stride 1.
    ///
    /// A split with fewer than `past_len + horizon` rows yields no windows,
    /// which is an error: the caller cannot train or validate on it.
    pub fn new(split: &SeriesSplit, past_len: usize, horizon: usize) -> Result<Self> {
        if past_len == 0 || horizon == 0 {
            return Err(Error::Config("past_len and horizon must be positive".to_string()));
        }
        let span = past_len + horizon;
        if split.len() < span {
            return Err(Error::Data(format!(
                "split has {} rows, need at least {} for one window",
                split.len(),
                span
            )));
        }

        let mut windows = Vec::with_capacity(split.len() - span + 1);
        for start in 0..=(split.len() - span) {
            let cut = start + past_len;
            windows.push(Window {
                past: split.values[start..cut].to_vec(),
                covariates: split.covariates[cut..cut + horizon].to_vec(),
                target: split.values[cut..cut + horizon].to_vec(),
            });
        }

        Ok(Self { windows, past_len, horizon })
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past_len
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }
}
