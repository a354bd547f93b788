//! Minimal tape-based gradient layer
//!
//! One-dimensional f32 tensors with shared data/grad cells and explicit
//! backward operations. The training loop never inspects the tape itself;
//! it only zeroes gradients, triggers `backward`, clips, and steps.

mod backward;
mod tensor;

pub use backward::BackwardOp;
pub use tensor::Tensor;

/// Perform a backward pass starting from a scalar loss tensor
///
/// Seeds the loss gradient with ones unless an explicit output gradient is
/// given, then walks the recorded backward ops.
pub fn backward(tensor: &Tensor, grad_output: Option<ndarray::Array1<f32>>) {
    match grad_output {
        Some(grad) => tensor.set_grad(grad),
        None => tensor.set_grad(ndarray::Array1::ones(tensor.len())),
    }

    if let Some(op) = tensor.backward_op() {
        op.backward();
    }
}
