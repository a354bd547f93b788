//! SGD optimizer with momentum

use super::Optimizer;
use crate::Tensor;
use ndarray::Array1;

/// Stochastic gradient descent with optional momentum
pub struct SGD {
    lr: f32,
    momentum: f32,
    velocity: Vec<Option<Array1<f32>>>,
}

impl SGD {
    /// Create a new SGD optimizer
    pub fn new(lr: f32, momentum: f32) -> Self {
        Self { lr, momentum, velocity: Vec::new() }
    }
}

impl Optimizer for SGD {
    fn step(&mut self, params: &mut [Tensor]) {
        if self.velocity.is_empty() {
            self.velocity = params.iter().map(|_| None).collect();
        }

        for (i, param) in params.iter_mut().enumerate() {
            let Some(grad) = param.grad() else { continue };

            let update = if self.momentum > 0.0 {
                if self.velocity[i].is_none() {
                    self.velocity[i] = Some(Array1::zeros(grad.len()));
                }
                let vel = self.velocity[i].as_mut().unwrap();
                *vel = &*vel * self.momentum + &grad;
                vel.clone()
            } else {
                grad
            };

            let mut data = param.data_mut();
            for (d, u) in data.iter_mut().zip(update.iter()) {
                *d -= self.lr * u;
            }
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_sgd_step() {
        let mut opt = SGD::new(0.1, 0.0);
        let mut params = vec![Tensor::from_vec(vec![1.0, 2.0], true)];
        params[0].set_grad(arr1(&[1.0, 1.0]));

        opt.step(&mut params);

        let data = params[0].data().to_vec();
        assert!((data[0] - 0.9).abs() < 1e-6);
        assert!((data[1] - 1.9).abs() < 1e-6);
    }

    #[test]
    fn test_sgd_momentum_accumulates() {
        let mut opt = SGD::new(0.1, 0.9);
        let mut params = vec![Tensor::from_vec(vec![0.0], true)];

        params[0].set_grad(arr1(&[1.0]));
        opt.step(&mut params);
        let after_first = params[0].data()[0];

        params[0].set_grad(arr1(&[1.0]));
        opt.step(&mut params);
        let second_delta = params[0].data()[0] - after_first;

        // Momentum makes the second update larger than the first
        assert!(second_delta.abs() > after_first.abs());
    }
}
