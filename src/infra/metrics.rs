// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records per-batch loss and accuracy to a CSV file, plus a
// JSON summary of the whole run.
//
// Output files (inside the configured directory):
//   metrics.csv   ← one row per batch, training and test
//   summary.json  ← config, dataset sizes, final accuracy/loss
//
// Example CSV output:
//   phase,epoch,batch,loss,accuracy
//   train,1,1,1.609438,0.194000
//   train,1,2,1.571200,0.262000
//   test,1,1,1.498100,0.318000

use anyhow::{Context, Result};
use std::{
    fmt,
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Train,
    Test,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Train => f.write_str("train"),
            Phase::Test  => f.write_str("test"),
        }
    }
}

/// Loss and accuracy of one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMetrics {
    pub phase: Phase,

    /// Epoch the batch belongs to (starts at 1)
    pub epoch: usize,

    /// Batch number within the epoch (starts at 1)
    pub batch: usize,

    /// Mean cross-entropy over the batch
    pub loss: f64,

    /// Fraction of the batch classified correctly, in [0.0, 1.0]
    pub accuracy: f64,
}

impl BatchMetrics {
    pub fn new(phase: Phase, epoch: usize, batch: usize, loss: f64, accuracy: f64) -> Self {
        Self { phase, epoch, batch, loss, accuracy }
    }
}

/// Mean loss and accuracy over a slice of batches; None when empty.
pub fn mean_metrics(batches: &[BatchMetrics]) -> Option<(f64, f64)> {
    if batches.is_empty() {
        return None;
    }
    let n = batches.len() as f64;
    let loss     = batches.iter().map(|b| b.loss).sum::<f64>() / n;
    let accuracy = batches.iter().map(|b| b.accuracy).sum::<f64>() / n;
    Some((loss, accuracy))
}

/// Logs batch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    dir:      PathBuf,
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the directory if needed and start a fresh metrics.csv.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");
        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "phase,epoch,batch,loss,accuracy")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { dir, csv_path })
    }

    /// Append rows for `batches` to metrics.csv.
    pub fn log(&self, batches: &[BatchMetrics]) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        for m in batches {
            writeln!(
                f,
                "{},{},{},{:.6},{:.6}",
                m.phase, m.epoch, m.batch, m.loss, m.accuracy,
            )?;
        }
        Ok(())
    }

    /// Write `summary` as pretty JSON to summary.json, replacing any previous one.
    pub fn write_summary<T: Serialize>(&self, summary: &T) -> Result<()> {
        let path = self.dir.join("summary.json");
        let json = serde_json::to_string_pretty(summary)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write summary to '{}'", path.display()))?;
        tracing::debug!("Saved run summary to '{}'", path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_metrics() {
        let batches = vec![
            BatchMetrics::new(Phase::Train, 1, 1, 2.0, 0.25),
            BatchMetrics::new(Phase::Train, 1, 2, 1.0, 0.75),
        ];
        assert_eq!(mean_metrics(&batches), Some((1.5, 0.5)));
        assert_eq!(mean_metrics(&[]), None);
    }

    #[test]
    fn test_logs_rows_and_summary() {
        let tmp    = tempfile::tempdir().unwrap();
        let dir    = tmp.path().join("metrics");
        let logger = MetricsLogger::new(&dir).unwrap();

        logger.log(&[
            BatchMetrics::new(Phase::Train, 1, 1, 1.5, 0.2),
            BatchMetrics::new(Phase::Test,  1, 1, 1.25, 0.5),
        ]).unwrap();
        logger.write_summary(&serde_json::json!({ "accuracy": 0.5 })).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "phase,epoch,batch,loss,accuracy");
        assert_eq!(lines[1], "train,1,1,1.500000,0.200000");
        assert_eq!(lines[2], "test,1,1,1.250000,0.500000");

        let summary = fs::read_to_string(dir.join("summary.json")).unwrap();
        assert!(summary.contains("\"accuracy\": 0.5"));
    }
}
