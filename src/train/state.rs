//! Improvement tracking and early stopping policy

/// What the run controller should do after observing a validation loss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochOutcome {
    /// Validation loss strictly improved: checkpoint and keep going
    Improved,
    /// No improvement, but patience remains
    NoImprovement,
    /// Patience is spent: stop before recording this epoch
    PatienceExhausted,
}

/// Mutable state of one training run.
///
/// `best_val_loss` starts at infinity, so a run with zero epochs reports
/// infinity and any finite first validation loss counts as an improvement.
/// Only a strict decrease resets the patience counter; equal losses burn
/// patience. The patience check runs after the improvement branch, so a
/// patience of zero stops after the first epoch even when it improved.
#[derive(Debug, Clone)]
pub struct RunState {
    pub best_val_loss: f32,
    pub counter: usize,
    patience: usize,
}

impl RunState {
    pub fn new(patience: usize) -> Self {
        Self { best_val_loss: f32::INFINITY, counter: 0, patience }
    }

    /// Fold one epoch's validation loss into the run state.
    ///
    /// An improvement still resets the counter (and `best_val_loss`) when
    /// patience comes back exhausted, so the caller can checkpoint before
    /// stopping.
    pub fn observe(&mut self, val_loss: f32) -> EpochOutcome {
        let improved = val_loss < self.best_val_loss;
        if improved {
            self.best_val_loss = val_loss;
            self.counter = 0;
        } else {
            self.counter += 1;
        }

        if self.counter >= self.patience {
            EpochOutcome::PatienceExhausted
        } else if improved {
            EpochOutcome::Improved
        } else {
            EpochOutcome::NoImprovement
        }
    }
}
