//! Linear forecaster: one weight row per horizon step

use super::Forecaster;
use crate::autograd::BackwardOp;
use crate::Tensor;
use ndarray::Array1;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;

/// Linear forecasting model
///
/// For each window row b and horizon step h:
///
/// y[b, h] = Σ_i w[h, i] * x[b, i] + b[h]
///
/// where x[b] is the concatenated (past, horizon covariate) window. Input
/// tensors stack batch rows flat: `past` holds B·L values, `horizon_input`
/// B·H, and the output B·H. The weight matrix is stored flat, row-major, as
/// a single 1-D parameter tensor.
pub struct LinearForecaster {
    weight: Tensor,
    bias: Tensor,
    past_len: usize,
    horizon: usize,
    training: bool,
}

impl LinearForecaster {
    /// Create a model with seeded uniform initialization
    pub fn new(past_len: usize, horizon: usize, rng: &mut StdRng) -> Self {
        let in_len = past_len + horizon;
        let scale = 1.0 / (in_len as f32).sqrt();
        Self {
            weight: Tensor::uniform(in_len * horizon, scale, rng, true),
            bias: Tensor::zeros(horizon, true),
            past_len,
            horizon,
            training: true,
        }
    }

    /// Past-context window length this model expects
    pub fn past_len(&self) -> usize {
        self.past_len
    }

    /// Forecast horizon length
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Overwrite parameters from a named checkpoint state
    pub fn load_named_params(&mut self, named: &[(String, Vec<f32>)]) -> crate::Result<()> {
        for (name, values) in named {
            let target = match name.as_str() {
                "weight" => &self.weight,
                "bias" => &self.bias,
                other => {
                    return Err(crate::Error::Data(format!("unknown parameter '{other}'")));
                }
            };
            if target.len() != values.len() {
                return Err(crate::Error::Data(format!(
                    "parameter '{name}' length mismatch: expected {}, got {}",
                    target.len(),
                    values.len()
                )));
            }
            *target.data_mut() = Array1::from_vec(values.clone());
        }
        Ok(())
    }
}

impl Forecaster for LinearForecaster {
    fn forward(&self, past: &Tensor, horizon_input: &Tensor) -> Tensor {
        assert!(
            past.len() % self.past_len == 0,
            "past tensor length {} is not a multiple of the window length {}",
            past.len(),
            self.past_len
        );
        let rows = past.len() / self.past_len;
        assert_eq!(
            horizon_input.len(),
            rows * self.horizon,
            "horizon tensor length mismatch"
        );

        let in_len = self.past_len + self.horizon;

        // Concatenate (past, covariates) per row, row-major
        let inputs: Array1<f32> = {
            let past = past.data();
            let fc = horizon_input.data();
            let mut x = Vec::with_capacity(rows * in_len);
            for b in 0..rows {
                x.extend_from_slice(
                    &past.as_slice().unwrap()[b * self.past_len..(b + 1) * self.past_len],
                );
                x.extend_from_slice(
                    &fc.as_slice().unwrap()[b * self.horizon..(b + 1) * self.horizon],
                );
            }
            Array1::from_vec(x)
        };

        let out = {
            let weight = self.weight.data();
            let bias = self.bias.data();
            let w = weight.as_slice().unwrap();
            let x = inputs.as_slice().unwrap();

            let mut out = Array1::zeros(rows * self.horizon);
            for b in 0..rows {
                let row_x = &x[b * in_len..(b + 1) * in_len];
                for h in 0..self.horizon {
                    let row_w = &w[h * in_len..(h + 1) * in_len];
                    out[b * self.horizon + h] =
                        row_w.iter().zip(row_x.iter()).map(|(w, x)| w * x).sum::<f32>() + bias[h];
                }
            }
            out
        };

        let mut predictions = Tensor::new(out, self.training);

        if self.training {
            predictions.set_backward_op(Rc::new(LinearBackward {
                weight_grad: self.weight.grad_cell(),
                bias_grad: self.bias.grad_cell(),
                inputs,
                pred_grad: predictions.grad_cell(),
                in_len,
                horizon: self.horizon,
                rows,
            }));
        }

        predictions
    }

    fn params(&self) -> Vec<Tensor> {
        vec![self.weight.clone(), self.bias.clone()]
    }

    fn named_params(&self) -> Vec<(String, Tensor)> {
        vec![("weight".to_string(), self.weight.clone()), ("bias".to_string(), self.bias.clone())]
    }

    fn train(&mut self) {
        self.training = true;
    }

    fn eval(&mut self) {
        self.training = false;
    }

    fn is_training(&self) -> bool {
        self.training
    }
}

struct LinearBackward {
    weight_grad: Rc<RefCell<Option<Array1<f32>>>>,
    bias_grad: Rc<RefCell<Option<Array1<f32>>>>,
    inputs: Array1<f32>,
    pred_grad: Rc<RefCell<Option<Array1<f32>>>>,
    in_len: usize,
    horizon: usize,
    rows: usize,
}

impl BackwardOp for LinearBackward {
    fn backward(&self) {
        let pred_grad = self.pred_grad.borrow();
        let Some(g) = pred_grad.as_ref() else { return };

        let x = self.inputs.as_slice().unwrap();

        // dL/dw[h, i] = Σ_b g[b, h] * x[b, i]; dL/db[h] = Σ_b g[b, h]
        let mut dw = Array1::zeros(self.in_len * self.horizon);
        let mut db = Array1::zeros(self.horizon);
        for b in 0..self.rows {
            let row_x = &x[b * self.in_len..(b + 1) * self.in_len];
            for h in 0..self.horizon {
                let gh = g[b * self.horizon + h];
                db[h] += gh;
                for (i, &xi) in row_x.iter().enumerate() {
                    dw[h * self.in_len + i] += gh * xi;
                }
            }
        }

        accumulate(&self.weight_grad, dw);
        accumulate(&self.bias_grad, db);
    }
}

fn accumulate(cell: &Rc<RefCell<Option<Array1<f32>>>>, grad: Array1<f32>) {
    let mut cell = cell.borrow_mut();
    match cell.as_mut() {
        Some(existing) => *existing = &*existing + &grad,
        None => *cell = Some(grad),
    }
}
