//! Loss functions

mod l1;
mod mse;

pub use l1::L1Loss;
pub use mse::MSELoss;

use crate::train::LossKind;
use crate::Tensor;

/// A differentiable scalar loss over a prediction batch
pub trait LossFn {
    /// Compute the scalar loss tensor.
    ///
    /// When the predictions carry gradients the returned tensor records a
    /// backward op that pushes the loss gradient into the predictions and
    /// then continues down their own backward chain.
    fn loss(&self, predictions: &Tensor, targets: &Tensor) -> Tensor;

    fn name(&self) -> &'static str;
}

/// Instantiate the loss selected in the hyperparameter bundle
pub fn build(kind: LossKind) -> Box<dyn LossFn> {
    match kind {
        LossKind::Mse => Box::new(MSELoss),
        LossKind::L1 => Box::new(L1Loss),
    }
}
