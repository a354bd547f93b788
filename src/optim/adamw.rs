//! AdamW optimizer (Adam with decoupled weight decay)

use super::Optimizer;
use crate::Tensor;
use ndarray::Array1;

/// AdamW optimizer
///
/// Weight decay is applied directly to the parameters rather than folded
/// into the gradient:
///
/// θ_t = (1 - lr * λ) * θ_{t-1} - lr_t * m_t / (√v_t + ε)
pub struct AdamW {
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    weight_decay: f32,
    t: u64,
    m: Vec<Option<Array1<f32>>>,
    v: Vec<Option<Array1<f32>>>,
}

impl AdamW {
    /// Create a new AdamW optimizer
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32, weight_decay: f32) -> Self {
        Self { lr, beta1, beta2, epsilon, weight_decay, t: 0, m: Vec::new(), v: Vec::new() }
    }

    /// AdamW with the usual defaults (β₁=0.9, β₂=0.999, ε=1e-8, λ=0.01)
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 0.999, 1e-8, 0.01)
    }

    fn ensure_moments(&mut self, params: &[Tensor]) {
        if self.m.is_empty() {
            self.m = params.iter().map(|_| None).collect();
            self.v = params.iter().map(|_| None).collect();
        }
    }
}

impl Optimizer for AdamW {
    fn step(&mut self, params: &mut [Tensor]) {
        self.ensure_moments(params);
        self.t += 1;

        // Bias-corrected step size
        let lr_t = self.lr
            * ((1.0 - self.beta2.powi(self.t as i32)).sqrt()
                / (1.0 - self.beta1.powi(self.t as i32)));

        for (i, param) in params.iter_mut().enumerate() {
            let Some(grad) = param.grad() else { continue };

            if self.m[i].is_none() {
                self.m[i] = Some(Array1::zeros(grad.len()));
                self.v[i] = Some(Array1::zeros(grad.len()));
            }
            let m = self.m[i].as_mut().unwrap();
            let v = self.v[i].as_mut().unwrap();

            *m = &*m * self.beta1 + &grad * (1.0 - self.beta1);
            *v = &*v * self.beta2 + &(&grad * &grad) * (1.0 - self.beta2);

            let mut data = param.data_mut();
            for ((d, &mi), &vi) in data.iter_mut().zip(m.iter()).zip(v.iter()) {
                *d *= 1.0 - self.lr * self.weight_decay;
                *d -= lr_t * mi / (vi.sqrt() + self.epsilon);
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
    fn test_adamw_step_moves_against_gradient() {
        let mut opt = AdamW::default_params(0.1);
        let mut params = vec![Tensor::from_vec(vec![1.0, -1.0], true)];
        params[0].set_grad(arr1(&[1.0, -1.0]));

        opt.step(&mut params);

        let data = params[0].data().to_vec();
        assert!(data[0] < 1.0);
        assert!(data[1] > -1.0);
    }

    #[test]
    fn test_adamw_skips_params_without_grad() {
        let mut opt = AdamW::default_params(0.1);
        let mut params = vec![Tensor::from_vec(vec![1.0], false)];

        opt.step(&mut params);
        assert_eq!(params[0].data()[0], 1.0);
    }

    #[test]
    fn test_adamw_converges_on_quadratic() {
        // Minimize f(x) = x^2; grad = 2x
        let mut opt = AdamW::new(0.1, 0.9, 0.999, 1e-8, 0.0);
        let mut params = vec![Tensor::from_vec(vec![2.0], true)];

        for _ in 0..200 {
            let x = params[0].data()[0];
            params[0].set_grad(arr1(&[2.0 * x]));
            opt.step(&mut params);
        }

        assert!(params[0].data()[0].abs() < 0.05);
    }

    #[test]
    fn test_adamw_lr_accessors() {
        let mut opt = AdamW::default_params(0.01);
        assert_eq!(opt.lr(), 0.01);
        opt.set_lr(0.001);
        assert_eq!(opt.lr(), 0.001);
    }

    #[test]
    fn test_adamw_weight_decay_shrinks_params() {
        // Zero gradient, nonzero decay: parameters shrink toward zero
        let mut opt = AdamW::new(0.1, 0.9, 0.999, 1e-8, 0.5);
        let mut params = vec![Tensor::from_vec(vec![1.0], true)];
        params[0].set_grad(arr1(&[0.0]));

        opt.step(&mut params);
        assert!(params[0].data()[0] < 1.0);
    }
}
