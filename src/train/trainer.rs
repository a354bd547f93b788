//! Epoch-level training and validation passes

use super::loss::LossFn;
use super::Batch;
use crate::autograd::backward;
use crate::model::Forecaster;
use crate::optim::{clip_grad_norm, Optimizer};
use crate::{Error, Result, Tensor};

/// Runs optimization steps over batches.
///
/// Holds the model's parameter handles directly; tensor clones alias
/// storage, so optimizer updates land in the model without any copying
/// back.
pub struct Trainer {
    params: Vec<Tensor>,
    optimizer: Box<dyn Optimizer>,
    loss: Box<dyn LossFn>,
    clip_grad: Option<f32>,
}

impl Trainer {
    pub fn new(
        params: Vec<Tensor>,
        optimizer: Box<dyn Optimizer>,
        loss: Box<dyn LossFn>,
        clip_grad: Option<f32>,
    ) -> Self {
        Self { params, optimizer, loss, clip_grad }
    }

    /// Learning rate currently applied by the optimizer
    pub fn lr(&self) -> f32 {
        self.optimizer.lr()
    }

    pub fn optimizer_mut(&mut self) -> &mut dyn Optimizer {
        self.optimizer.as_mut()
    }

    /// One optimization pass over all batches, returns the mean batch loss.
    ///
    /// Per batch: zero grads, forward, loss, backward, optional clip, step.
    pub fn train_epoch(&mut self, model: &dyn Forecaster, batches: &[Batch]) -> Result<f32> {
        debug_assert!(model.is_training());
        if batches.is_empty() {
            return Err(Error::Data("no training batches".to_string()));
        }

        let mut total = 0.0;
        for batch in batches {
            self.optimizer.zero_grad(&mut self.params);

            let predictions = model.forward(&batch.past, &batch.horizon_input);
            let loss = self.loss.loss(&predictions, &batch.targets);
            backward(&loss, None);

            if let Some(max_norm) = self.clip_grad {
                clip_grad_norm(&mut self.params, max_norm);
            }
            self.optimizer.step(&mut self.params);

            total += loss.item();
        }
        Ok(total / batches.len() as f32)
    }

    /// One evaluation pass, returns the mean batch loss. The model must be
    /// in eval mode so no backward ops are recorded.
    pub fn validate(&self, model: &dyn Forecaster, batches: &[Batch]) -> Result<f32> {
        debug_assert!(!model.is_training());
        if batches.is_empty() {
            return Err(Error::Data("no validation batches".to_string()));
        }

        let mut total = 0.0;
        for batch in batches {
            let predictions = model.forward(&batch.past, &batch.horizon_input);
            total += self.loss.loss(&predictions, &batch.targets).item();
        }
        Ok(total / batches.len() as f32)
    }
}
