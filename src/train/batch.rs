//! Window batching

use crate::data::Window;
use crate::Tensor;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// A group of windows stacked into flat row-major tensors.
///
/// `past` holds `rows * past_len` values, `horizon_input` and `targets`
/// hold `rows * horizon` each.
pub struct Batch {
    pub past: Tensor,
    pub horizon_input: Tensor,
    pub targets: Tensor,
    pub rows: usize,
}

impl Batch {
    /// Stack a non-empty slice of windows into one batch
    pub fn stack(windows: &[Window]) -> Self {
        let mut past = Vec::new();
        let mut horizon_input = Vec::new();
        let mut targets = Vec::new();
        for w in windows {
            past.extend_from_slice(&w.past);
            horizon_input.extend_from_slice(&w.covariates);
            targets.extend_from_slice(&w.target);
        }
        Self {
            past: Tensor::from_vec(past, false),
            horizon_input: Tensor::from_vec(horizon_input, false),
            targets: Tensor::from_vec(targets, false),
            rows: windows.len(),
        }
    }
}

/// Group windows into batches of `batch_size`, keeping the final partial
/// batch. With an rng the window order is shuffled first (training);
/// without one, batches follow series order (validation).
pub fn batches(windows: &[Window], batch_size: usize, rng: Option<&mut StdRng>) -> Vec<Batch> {
    let mut order: Vec<usize> = (0..windows.len()).collect();
    if let Some(rng) = rng {
        order.shuffle(rng);
    }

    order
        .chunks(batch_size.max(1))
        .map(|chunk| {
            let group: Vec<Window> = chunk.iter().map(|&i| windows[i].clone()).collect();
            Batch::stack(&group)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn windows(n: usize) -> Vec<Window> {
        (0..n)
            .map(|i| Window {
                past: vec![i as f32, i as f32 + 1.0],
                covariates: vec![0.5],
                target: vec![i as f32 + 2.0],
            })
            .collect()
    }

    #[test]
    fn test_stack_concatenates_rows() {
        let ws = windows(3);
        let batch = Batch::stack(&ws);
        assert_eq!(batch.rows, 3);
        assert_eq!(batch.past.len(), 6);
        assert_eq!(batch.targets.data().to_vec(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_batches_keep_partial_tail() {
        let ws = windows(5);
        let bs = batches(&ws, 2, None);
        assert_eq!(bs.len(), 3);
        assert_eq!(bs[2].rows, 1);
    }

    #[test]
    fn test_unshuffled_batches_follow_series_order() {
        let ws = windows(4);
        let bs = batches(&ws, 2, None);
        assert_eq!(bs[0].past.data().to_vec(), vec![0.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let ws = windows(16);
        let mut rng_a = StdRng::seed_from_u64(3);
        let mut rng_b = StdRng::seed_from_u64(3);
        let a = batches(&ws, 4, Some(&mut rng_a));
        let b = batches(&ws, 4, Some(&mut rng_b));
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.past.data().to_vec(), y.past.data().to_vec());
        }
    }
}
