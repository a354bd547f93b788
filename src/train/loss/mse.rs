//! Mean squared error

use super::LossFn;
use crate::autograd::BackwardOp;
use crate::Tensor;
use ndarray::Array1;
use std::cell::RefCell;
use std::rc::Rc;

/// MSE = mean((predictions - targets)^2)
pub struct MSELoss;

impl LossFn for MSELoss {
    fn loss(&self, predictions: &Tensor, targets: &Tensor) -> Tensor {
        assert_eq!(predictions.len(), targets.len(), "loss shape mismatch");

        let diff: Array1<f32> = &*predictions.data() - &*targets.data();
        let n = diff.len() as f32;
        let value = diff.iter().map(|d| d * d).sum::<f32>() / n;

        let mut out = Tensor::from_vec(vec![value], predictions.requires_grad());
        if predictions.requires_grad() {
            out.set_backward_op(Rc::new(MseBackward {
                diff,
                pred_grad: predictions.grad_cell(),
                pred_op: predictions.backward_op(),
                loss_grad: out.grad_cell(),
            }));
        }
        out
    }

    fn name(&self) -> &'static str {
        "mse"
    }
}

struct MseBackward {
    diff: Array1<f32>,
    pred_grad: Rc<RefCell<Option<Array1<f32>>>>,
    pred_op: Option<Rc<dyn BackwardOp>>,
    loss_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for MseBackward {
    fn backward(&self) {
        let upstream = {
            let loss_grad = self.loss_grad.borrow();
            match loss_grad.as_ref() {
                Some(g) => g[0],
                None => return,
            }
        };

        let n = self.diff.len() as f32;
        let grad = self.diff.mapv(|d| upstream * 2.0 * d / n);

        {
            let mut cell = self.pred_grad.borrow_mut();
            match cell.as_mut() {
                Some(existing) => *existing = &*existing + &grad,
                None => *cell = Some(grad),
            }
        }

        if let Some(op) = &self.pred_op {
            op.backward();
        }
    }
}
