//! Append-only JSON lines metrics backend

use super::{EpochMetrics, MetricsSink, TrackingError};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct Record<'a> {
    run_id: &'a str,
    timestamp: String,
    #[serde(flatten)]
    metrics: &'a EpochMetrics,
}

/// Writes one JSON object per epoch to an append-only file.
///
/// The file survives across runs; each line carries its run id, so multiple
/// runs can share a metrics file.
pub struct JsonlSink {
    path: PathBuf,
    file: File,
}

impl JsonlSink {
    /// Open (or create) the metrics file for appending
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TrackingError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path.as_ref())?;
        Ok(Self { path: path.as_ref().to_path_buf(), file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetricsSink for JsonlSink {
    fn log_epoch(&mut self, run_id: &str, metrics: &EpochMetrics) -> Result<(), TrackingError> {
        let record = Record {
            run_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
            metrics,
        };
        let line = serde_json::to_string(&record)?;
        writeln!(self.file, "{line}")?;
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(epoch: usize, val_loss: f32) -> EpochMetrics {
        EpochMetrics {
            epoch,
            train_loss: 1.0,
            val_loss,
            best_val_loss: val_loss,
            learning_rate: 0.01,
        }
    }

    #[test]
    fn test_appends_one_line_per_epoch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.jsonl");

        let mut sink = JsonlSink::open(&path).unwrap();
        sink.log_epoch("run-a", &metrics(0, 0.5)).unwrap();
        sink.log_epoch("run-a", &metrics(1, 0.4)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed["run_id"], "run-a");
        assert_eq!(parsed["epoch"], 1);
    }

    #[test]
    fn test_reopen_appends_instead_of_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.jsonl");

        {
            let mut sink = JsonlSink::open(&path).unwrap();
            sink.log_epoch("run-a", &metrics(0, 0.5)).unwrap();
        }
        {
            let mut sink = JsonlSink::open(&path).unwrap();
            sink.log_epoch("run-b", &metrics(0, 0.6)).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/metrics.jsonl");
        let sink = JsonlSink::open(&path).unwrap();
        assert!(sink.path().parent().unwrap().exists());
    }
}
