//! Run controller
//!
//! Owns the epoch loop: train, validate, anneal the learning rate, track
//! improvement, checkpoint, and decide when to stop.

use super::config::OptimizerKind;
use super::state::{EpochOutcome, RunState};
use super::{batch, loss, Hyperparameters, Trainer};
use crate::data::{SeriesFrame, WindowDataset};
use crate::model::{Forecaster, LinearForecaster};
use crate::optim::{AdamW, CosineAnnealingLR, LRScheduler, Optimizer, SGD};
use crate::tracking::{EpochMetrics, MetricsSink};
use crate::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Per-invocation knobs that are not part of the hyperparameter bundle
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Names the run directory under the save path
    pub run_id: String,
    /// Fold validation rows into training and evaluate on test rows
    pub merge_train_val: bool,
    /// Epochs without improvement before stopping
    pub patience: usize,
}

impl RunOptions {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self { run_id: run_id.into(), merge_train_val: false, patience: 10 }
    }
}

fn build_optimizer(kind: OptimizerKind, lr: f32) -> Box<dyn Optimizer> {
    match kind {
        OptimizerKind::AdamW => Box::new(AdamW::default_params(lr)),
        OptimizerKind::Sgd => Box::new(SGD::new(lr, 0.9)),
    }
}

/// Train a model to completion and return the best validation loss.
///
/// Artifacts land in `<save_path>/<run_id>/`: the hyperparameter bundle up
/// front, and `model.json` rewritten on every strict improvement, so the
/// checkpoint on disk is always the best model seen. A run with zero
/// epochs writes no checkpoint and reports infinity.
///
/// Early stopping fires once `patience` consecutive epochs fail to
/// improve; the terminal epoch is not recorded to the metrics sink.
pub fn train_loop(
    hp: &Hyperparameters,
    frame: &SeriesFrame,
    opts: &RunOptions,
    mut sink: Option<&mut dyn MetricsSink>,
) -> Result<f32> {
    hp.validate()?;
    frame.validate()?;

    let mut rng = StdRng::seed_from_u64(hp.seed);

    let (fit_split, eval_split) = frame.partition(opts.merge_train_val);
    let train_ds = WindowDataset::new(&fit_split, hp.past_len, hp.horizon)?;
    let val_ds = WindowDataset::new(&eval_split, hp.past_len, hp.horizon)?;

    let mut model = LinearForecaster::new(hp.past_len, hp.horizon, &mut rng);
    let mut trainer = Trainer::new(
        model.params(),
        build_optimizer(hp.optimizer, hp.learning_rate),
        loss::build(hp.loss),
        hp.clip_grad,
    );
    let mut scheduler = CosineAnnealingLR::new(hp.learning_rate, hp.epochs, hp.min_lr);

    let run_dir = hp.save_path.join(&opts.run_id);
    std::fs::create_dir_all(&run_dir)?;
    hp.to_json_file(run_dir.join("hyperparameters.json"))?;
    let model_path = run_dir.join("model.json");

    let mut state = RunState::new(opts.patience);
    let val_batches = batch::batches(val_ds.windows(), hp.batch_size, None);

    for epoch in 0..hp.epochs {
        model.train();
        let train_batches = batch::batches(train_ds.windows(), hp.batch_size, Some(&mut rng));
        let train_loss = trainer.train_epoch(&model, &train_batches)?;

        model.eval();
        let val_loss = trainer.validate(&model, &val_batches)?;

        // Rate actually used this epoch, read before annealing
        let learning_rate = trainer.lr();
        scheduler.step();
        scheduler.apply(trainer.optimizer_mut());

        let outcome = state.observe(val_loss);

        println!(
            "epoch {}/{}: train_loss={train_loss:.6} val_loss={val_loss:.6} lr={learning_rate:.6}",
            epoch + 1,
            hp.epochs
        );

        // The counter resets only on improvement, so this also covers an
        // improving epoch that exhausts a zero patience
        if state.counter == 0 {
            crate::io::save_model(&model, hp.past_len, hp.horizon, &model_path)?;
        }

        if outcome == EpochOutcome::PatienceExhausted {
            println!("early stopping at epoch {} (patience {})", epoch + 1, opts.patience);
            break;
        }

        let metrics = EpochMetrics {
            epoch,
            train_loss,
            val_loss,
            best_val_loss: state.best_val_loss,
            learning_rate,
        };
        match sink.as_deref_mut() {
            Some(sink) => sink.log_epoch(&opts.run_id, &metrics)?,
            None => eprintln!("tracking is not initialized, skipping log."),
        }
    }

    Ok(state.best_val_loss)
}
