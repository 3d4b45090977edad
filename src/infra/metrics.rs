// ============================================================
// Infra - Scoring and Metrics
// ============================================================
// calc_f is the precision/recall/F1 computation shared by both
// corpus-level evaluators. EpochMetrics/MetricsLogger append one CSV
// row per training epoch for later plotting.

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Precision, recall and F1 from raw counts, with every division by
/// zero pinned to 0.0:
///
///   precision = tp / (tp + fp)        (0 when tp + fp == 0)
///   recall    = tp / (tp + fn)        (0 when tp + fn == 0)
///   f1        = 2 * P * R / (P + R)   (0 when P == 0 and R == 0)
pub fn calc_f(tp: usize, fp: usize, fn_: usize) -> (f64, f64, f64) {
    let precision = if tp + fp == 0 {
        0.0
    } else {
        tp as f64 / (tp + fp) as f64
    };
    let recall = if tp + fn_ == 0 {
        0.0
    } else {
        tp as f64 / (tp + fn_) as f64
    };
    let f1 = if precision == 0.0 && recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };
    (precision, recall, f1)
}

/// One row of training metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch: usize,
    /// Average cross-entropy loss over the epoch's training batches.
    pub train_loss: f64,
    /// Classification accuracy on the gold-annotated dev set.
    pub dev_accuracy: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, dev_accuracy: f64) -> Self {
        Self { epoch, train_loss, dev_accuracy }
    }
}

/// Appends epoch metrics to `<dir>/metrics.csv`, writing the header
/// only when the file is new so runs can be resumed.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,dev_accuracy")?;
            tracing::debug!("Created metrics CSV '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(f, "{},{:.6},{:.6}", m.epoch, m.train_loss, m.dev_accuracy)?;
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
