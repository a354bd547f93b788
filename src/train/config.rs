//! Hyperparameter bundle

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optimizer selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    AdamW,
    Sgd,
}

/// Loss selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LossKind {
    Mse,
    L1,
}

/// Everything a run needs, loaded once and persisted alongside the model.
///
/// The bundle is written verbatim into the run directory so a finished run
/// can always be reproduced from its artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hyperparameters {
    pub batch_size: usize,
    pub learning_rate: f32,
    /// Floor of the cosine schedule
    #[serde(default)]
    pub min_lr: f32,
    pub epochs: usize,
    /// Global gradient norm ceiling, unset disables clipping
    #[serde(default)]
    pub clip_grad: Option<f32>,
    #[serde(default = "default_optimizer")]
    pub optimizer: OptimizerKind,
    #[serde(default = "default_loss")]
    pub loss: LossKind,
    pub save_path: PathBuf,
    #[serde(default = "default_seed")]
    pub seed: u64,
    pub past_len: usize,
    pub horizon: usize,
}

fn default_optimizer() -> OptimizerKind {
    OptimizerKind::AdamW
}

fn default_loss() -> LossKind {
    LossKind::Mse
}

fn default_seed() -> u64 {
    42
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            batch_size: 32,
            learning_rate: 1e-3,
            min_lr: 0.0,
            epochs: 100,
            clip_grad: None,
            optimizer: OptimizerKind::AdamW,
            loss: LossKind::Mse,
            save_path: PathBuf::from("runs"),
            seed: 42,
            past_len: 24,
            horizon: 6,
        }
    }
}

impl Hyperparameters {
    /// Load from a YAML file and validate
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let hp: Self = serde_yaml::from_str(&contents)?;
        hp.validate()?;
        Ok(hp)
    }

    /// Persist the bundle as JSON into a run directory
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be positive".to_string()));
        }
        if self.learning_rate <= 0.0 {
            return Err(Error::Config("learning_rate must be positive".to_string()));
        }
        if self.min_lr < 0.0 || self.min_lr > self.learning_rate {
            return Err(Error::Config(
                "min_lr must be in [0, learning_rate]".to_string(),
            ));
        }
        if let Some(max_norm) = self.clip_grad {
            if max_norm <= 0.0 {
                return Err(Error::Config("clip_grad must be positive when set".to_string()));
            }
        }
        if self.past_len == 0 || self.horizon == 0 {
            return Err(Error::Config("past_len and horizon must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn bundle() -> Hyperparameters {
        Hyperparameters {
            batch_size: 8,
            learning_rate: 0.01,
            min_lr: 0.001,
            epochs: 10,
            clip_grad: Some(1.0),
            optimizer: OptimizerKind::AdamW,
            loss: LossKind::Mse,
            save_path: PathBuf::from("/tmp/runs"),
            seed: 42,
            past_len: 12,
            horizon: 3,
        }
    }

    #[test]
    fn test_yaml_load_with_defaults() {
        let yaml = "batch_size: 4\nlearning_rate: 0.01\nepochs: 5\nsave_path: runs\npast_len: 8\nhorizon: 2\n";
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{yaml}").unwrap();

        let hp = Hyperparameters::from_yaml_file(tmp.path()).unwrap();
        assert_eq!(hp.seed, 42);
        assert_eq!(hp.optimizer, OptimizerKind::AdamW);
        assert_eq!(hp.loss, LossKind::Mse);
        assert_eq!(hp.min_lr, 0.0);
        assert!(hp.clip_grad.is_none());
    }

    #[test]
    fn test_yaml_load_rejects_zero_batch() {
        let yaml = "batch_size: 0\nlearning_rate: 0.01\nepochs: 5\nsave_path: runs\npast_len: 8\nhorizon: 2\n";
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{yaml}").unwrap();
        assert!(Hyperparameters::from_yaml_file(tmp.path()).is_err());
    }

    #[test]
    fn test_min_lr_above_lr_is_invalid() {
        let mut hp = bundle();
        hp.min_lr = 0.1;
        assert!(hp.validate().is_err());
    }

    #[test]
    fn test_zero_epochs_is_valid() {
        let mut hp = bundle();
        hp.epochs = 0;
        assert!(hp.validate().is_ok());
    }

    #[test]
    fn test_json_persist_roundtrip() {
        let hp = bundle();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hyperparameters.json");

        hp.to_json_file(&path).unwrap();
        let back: Hyperparameters =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.batch_size, hp.batch_size);
        assert_eq!(back.optimizer, hp.optimizer);
        assert_eq!(back.clip_grad, hp.clip_grad);
    }
}
