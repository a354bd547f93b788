//! Backward operation trait

/// A recorded backward operation
///
/// Implementations read the gradient of their output from its grad cell,
/// accumulate gradients into their inputs, and recurse into the inputs'
/// own backward ops.
pub trait BackwardOp {
    /// Propagate gradients from the output to the inputs
    fn backward(&self);
}
