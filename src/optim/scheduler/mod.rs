//! Learning rate schedulers

mod cosine_annealing;

pub use cosine_annealing::CosineAnnealingLR;

/// Learning rate scheduler trait
pub trait LRScheduler {
    /// Get the current learning rate
    fn get_lr(&self) -> f32;

    /// Advance the schedule by one step
    fn step(&mut self);
}
