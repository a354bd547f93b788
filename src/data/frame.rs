//! Observed series with split membership columns

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A univariate series with one known-future covariate and three boolean
/// split membership columns, all aligned by row.
///
/// Membership columns are not required to be disjoint; partitioning reads
/// them as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesFrame {
    /// Observed target values
    pub values: Vec<f32>,
    /// Covariate known ahead of time (e.g. calendar features)
    pub covariates: Vec<f32>,
    /// Training split membership
    pub train: Vec<bool>,
    /// Validation split membership
    pub val: Vec<bool>,
    /// Test split membership
    pub test: Vec<bool>,
}

/// A contiguous slice of the series selected by split membership
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSplit {
    pub values: Vec<f32>,
    pub covariates: Vec<f32>,
}

impl SeriesSplit {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SeriesFrame {
    /// Load a frame from a JSON file and validate column alignment
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let frame: Self = serde_json::from_str(&contents)?;
        frame.validate()?;
        Ok(frame)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check all columns have the same number of rows
    pub fn validate(&self) -> Result<()> {
        let n = self.values.len();
        if self.covariates.len() != n
            || self.train.len() != n
            || self.val.len() != n
            || self.test.len() != n
        {
            return Err(Error::Data(format!(
                "column length mismatch: values={}, covariates={}, train={}, val={}, test={}",
                n,
                self.covariates.len(),
                self.train.len(),
                self.val.len(),
                self.test.len()
            )));
        }
        Ok(())
    }

    /// Select the optimization and evaluation splits.
    ///
    /// With `merge_train_val` unset, optimization runs on `train` rows and
    /// evaluation on `val` rows. When set, the validation rows are folded
    /// into the optimization split and evaluation moves to the `test` rows,
    /// for a final fit on all non-test data.
    pub fn partition(&self, merge_train_val: bool) -> (SeriesSplit, SeriesSplit) {
        if merge_train_val {
            let fit = self.select(|i| self.train[i] || self.val[i]);
            let eval = self.select(|i| self.test[i]);
            (fit, eval)
        } else {
            let fit = self.select(|i| self.train[i]);
            let eval = self.select(|i| self.val[i]);
            (fit, eval)
        }
    }

    fn select<F: Fn(usize) -> bool>(&self, keep: F) -> SeriesSplit {
        let mut values = Vec::new();
        let mut covariates = Vec::new();
        for i in 0..self.len() {
            if keep(i) {
                values.push(self.values[i]);
                covariates.push(self.covariates[i]);
            }
        }
        SeriesSplit { values, covariates }
    }
}
