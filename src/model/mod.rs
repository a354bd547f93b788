//! Pluggable predictor interface and the linear reference model

mod linear;

pub use linear::LinearForecaster;

use crate::Tensor;

/// A sequence forecasting model
///
/// Consumes a past-context window and a horizon covariate window, produces
/// one prediction per horizon step. The trainer flips the mode switch: in
/// eval mode `forward` must not record backward ops, so validation is
/// side-effect-free with respect to the trainable parameters.
pub trait Forecaster {
    /// Compute predictions for one window
    fn forward(&self, past: &Tensor, horizon_input: &Tensor) -> Tensor;

    /// Trainable parameters, aliased (clones share storage)
    fn params(&self) -> Vec<Tensor>;

    /// Parameters with stable names, in a stable order, for checkpointing
    fn named_params(&self) -> Vec<(String, Tensor)>;

    /// Switch to training mode
    fn train(&mut self);

    /// Switch to inference mode
    fn eval(&mut self);

    /// Whether the model is in training mode
    fn is_training(&self) -> bool;
}
