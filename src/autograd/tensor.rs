//! 1-D tensor with shared data and gradient cells

use super::BackwardOp;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::Rng;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// A 1-D f32 tensor
///
/// Data and gradient live behind `Rc<RefCell<..>>` so clones alias the same
/// storage: the trainer's parameter list and the model's weights are the
/// same buffers, which is what lets clipping and optimizer steps mutate the
/// model in place.
#[derive(Clone)]
pub struct Tensor {
    data: Rc<RefCell<Array1<f32>>>,
    grad: Rc<RefCell<Option<Array1<f32>>>>,
    requires_grad: bool,
    backward_op: Option<Rc<dyn BackwardOp>>,
}

impl Tensor {
    /// Create a tensor from an ndarray
    pub fn new(data: Array1<f32>, requires_grad: bool) -> Self {
        Self {
            data: Rc::new(RefCell::new(data)),
            grad: Rc::new(RefCell::new(None)),
            requires_grad,
            backward_op: None,
        }
    }

    /// Create a tensor from a Vec
    pub fn from_vec(data: Vec<f32>, requires_grad: bool) -> Self {
        Self::new(Array1::from_vec(data), requires_grad)
    }

    /// Create a zero-filled tensor of the given length
    pub fn zeros(len: usize, requires_grad: bool) -> Self {
        Self::new(Array1::zeros(len), requires_grad)
    }

    /// Create a tensor with uniform values in `[-scale, scale)`
    ///
    /// Parameter initialization draws from a caller-supplied RNG so runs
    /// stay reproducible for a fixed seed.
    pub fn uniform(len: usize, scale: f32, rng: &mut StdRng, requires_grad: bool) -> Self {
        let data: Vec<f32> = (0..len).map(|_| rng.gen_range(-scale..scale)).collect();
        Self::from_vec(data, requires_grad)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Whether the tensor is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the underlying data
    pub fn data(&self) -> Ref<'_, Array1<f32>> {
        self.data.borrow()
    }

    /// Mutably borrow the underlying data
    pub fn data_mut(&self) -> RefMut<'_, Array1<f32>> {
        self.data.borrow_mut()
    }

    /// First element, for scalar loss tensors
    pub fn item(&self) -> f32 {
        self.data.borrow()[0]
    }

    /// Whether gradients are tracked for this tensor
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Current gradient, cloned out of the cell
    pub fn grad(&self) -> Option<Array1<f32>> {
        self.grad.borrow().clone()
    }

    /// Overwrite the gradient
    pub fn set_grad(&self, grad: Array1<f32>) {
        *self.grad.borrow_mut() = Some(grad);
    }

    /// Add into the gradient, initializing it on first use
    pub fn accumulate_grad(&self, grad: Array1<f32>) {
        let mut cell = self.grad.borrow_mut();
        match cell.as_mut() {
            Some(existing) => *existing = &*existing + &grad,
            None => *cell = Some(grad),
        }
    }

    /// Clear the gradient
    pub fn zero_grad(&self) {
        *self.grad.borrow_mut() = None;
    }

    /// Shared handle to the gradient cell, for backward ops
    pub fn grad_cell(&self) -> Rc<RefCell<Option<Array1<f32>>>> {
        Rc::clone(&self.grad)
    }

    /// The backward op recorded for this tensor, if any
    pub fn backward_op(&self) -> Option<Rc<dyn BackwardOp>> {
        self.backward_op.clone()
    }

    /// Record the backward op producing this tensor
    pub fn set_backward_op(&mut self, op: Rc<dyn BackwardOp>) {
        self.backward_op = Some(op);
    }
}

impl std::fmt::Debug for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("data", &self.data.borrow())
            .field("grad", &self.grad.borrow())
            .field("requires_grad", &self.requires_grad)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;
    use rand::SeedableRng;

    #[test]
    fn test_tensor_creation() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
        assert_eq!(t.len(), 3);
        assert!(t.requires_grad());
        assert!(t.grad().is_none());
    }

    #[test]
    fn test_zeros() {
        let t = Tensor::zeros(4, false);
        assert_eq!(t.len(), 4);
        assert!(t.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_clone_aliases_data() {
        let t = Tensor::from_vec(vec![1.0, 2.0], true);
        let alias = t.clone();
        t.data_mut()[0] = 5.0;
        assert_eq!(alias.data()[0], 5.0);
    }

    #[test]
    fn test_accumulate_grad() {
        let t = Tensor::from_vec(vec![1.0, 2.0], true);
        t.accumulate_grad(arr1(&[0.5, 0.5]));
        t.accumulate_grad(arr1(&[1.0, 2.0]));
        let grad = t.grad().unwrap();
        assert_eq!(grad[0], 1.5);
        assert_eq!(grad[1], 2.5);
    }

    #[test]
    fn test_zero_grad() {
        let t = Tensor::from_vec(vec![1.0], true);
        t.set_grad(arr1(&[2.0]));
        assert!(t.grad().is_some());
        t.zero_grad();
        assert!(t.grad().is_none());
    }

    #[test]
    fn test_uniform_is_seeded() {
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = Tensor::uniform(8, 0.1, &mut rng_a, true);
        let b = Tensor::uniform(8, 0.1, &mut rng_b, true);
        assert_eq!(a.data().to_vec(), b.data().to_vec());
        assert!(a.data().iter().all(|v| v.abs() < 0.1));
    }

    #[test]
    fn test_item() {
        let t = Tensor::from_vec(vec![3.5], false);
        assert_eq!(t.item(), 3.5);
    }
}
