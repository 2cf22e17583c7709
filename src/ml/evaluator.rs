// ============================================================
// Layer 5 — Evaluation
// ============================================================
// Same fixed-stride, remainder-dropping batching as training,
// but forward only: no gradients, no parameter changes. The
// reported accuracy and loss are plain averages over batches.

use anyhow::{bail, Result};
use burn::{data::dataloader::batcher::Batcher, prelude::*};
use serde::{Deserialize, Serialize};

use crate::data::{
    batcher::TweetBatcher,
    dataset::{batch_ranges, TweetDataset},
};
use crate::infra::metrics::{mean_metrics, BatchMetrics, Phase};
use crate::ml::model::SentimentModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    /// Mean of the per-batch accuracies
    pub accuracy: f64,
    /// Mean of the per-batch losses
    pub loss: f64,
    pub batches: Vec<BatchMetrics>,
}

/// Evaluate `model` over `dataset` in batches of `batch_size`.
///
/// Fails when the split does not fill a single batch.
pub fn evaluate<B: Backend>(
    model:      &SentimentModel<B>,
    dataset:    &TweetDataset,
    batch_size: usize,
    epoch:      usize,
    device:     &B::Device,
) -> Result<EvalReport> {
    let batcher = TweetBatcher::<B>::new(device.clone());
    let mut batches = Vec::new();

    for (i, range) in batch_ranges(dataset.sample_count(), batch_size).enumerate() {
        let batch  = batcher.batch(dataset.items(range));
        let output = model.predict(batch.tweets);

        let loss: f64 = model
            .loss(output.logits, batch.labels.clone())
            .into_scalar().elem::<f64>();
        let accuracy = model.accuracy(output.probabilities, batch.labels);

        tracing::debug!("Testing batch {} | loss={:.4} | acc={:.3}", i + 1, loss, accuracy);
        batches.push(BatchMetrics::new(Phase::Test, epoch, i + 1, loss, accuracy));
    }

    let Some((loss, accuracy)) = mean_metrics(&batches) else {
        bail!(
            "test split has {} examples, fewer than one batch of {}",
            dataset.sample_count(), batch_size,
        );
    };

    tracing::info!(
        "Evaluated {} batches | test_loss={:.4} | test_acc={:.1}%",
        batches.len(), loss, accuracy * 100.0,
    );

    Ok(EvalReport { accuracy, loss, batches })
}
