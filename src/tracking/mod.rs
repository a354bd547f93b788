//! Experiment tracking
//!
//! Per-epoch metrics flow through a [`MetricsSink`]. The run controller
//! treats the sink as optional: when tracking is disabled it prints a
//! notice instead of recording anything.

mod jsonl;

pub use jsonl::JsonlSink;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tracking backend failure
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("tracking io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tracking serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metrics recorded once per completed epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch: usize,
    pub train_loss: f32,
    pub val_loss: f32,
    pub best_val_loss: f32,
    pub learning_rate: f32,
}

/// Destination for per-epoch experiment metrics
pub trait MetricsSink {
    /// Record one epoch's metrics for a run
    fn log_epoch(&mut self, run_id: &str, metrics: &EpochMetrics) -> Result<(), TrackingError>;
}

/// In-memory sink, records everything it sees
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<(String, EpochMetrics)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsSink for MemorySink {
    fn log_epoch(&mut self, run_id: &str, metrics: &EpochMetrics) -> Result<(), TrackingError> {
        self.records.push((run_id.to_string(), metrics.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let mut sink = MemorySink::new();
        for epoch in 0..3 {
            let m = EpochMetrics {
                epoch,
                train_loss: 1.0,
                val_loss: 0.5,
                best_val_loss: 0.5,
                learning_rate: 0.01,
            };
            sink.log_epoch("run-a", &m).unwrap();
        }
        assert_eq!(sink.records.len(), 3);
        assert_eq!(sink.records[2].1.epoch, 2);
    }

    #[test]
    fn test_epoch_metrics_serde_roundtrip() {
        let m = EpochMetrics {
            epoch: 4,
            train_loss: 0.25,
            val_loss: 0.3,
            best_val_loss: 0.28,
            learning_rate: 0.001,
        };
        let json = serde_json::to_string(&m).unwrap();
        let back: EpochMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
