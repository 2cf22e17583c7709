// ============================================================
// Layer 5 — Training Loop
// ============================================================
// One call to `train_epoch` is one full pass over the training
// split:
//
//   1. Shuffle tweets and labels with ONE shared permutation
//   2. Walk contiguous batches of `batch_size` from offset 0;
//      a trailing partial batch is dropped
//   3. Per batch: forward → cross-entropy → backward → Adam step
//
// `fit` repeats that for the configured number of epochs and then
// evaluates on the test split.

use anyhow::Result;
use burn::{
    data::dataloader::batcher::Batcher,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use rand::Rng;

use crate::data::{
    batcher::TweetBatcher,
    dataset::{batch_ranges, TweetDataset},
};
use crate::infra::metrics::{mean_metrics, BatchMetrics, MetricsLogger, Phase};
use crate::ml::{
    evaluator::{evaluate, EvalReport},
    model::{SentimentModel, SentimentModelConfig},
};

#[derive(Config)]
pub struct TrainingConfig {
    pub model: SentimentModelConfig,
    pub optimizer: AdamConfig,
    #[config(default = 500)]
    pub batch_size: usize,
    #[config(default = 0.01)]
    pub learning_rate: f64,
    #[config(default = 1)]
    pub num_epochs: usize,
}

/// What happened during one pass over the training split.
#[derive(Debug, Clone)]
pub struct EpochSummary {
    pub epoch:   usize,
    pub batches: Vec<BatchMetrics>,
    /// Examples left over after the last full batch
    pub dropped: usize,
}

impl EpochSummary {
    pub fn mean_loss(&self) -> Option<f64> {
        mean_metrics(&self.batches).map(|(loss, _)| loss)
    }

    pub fn mean_accuracy(&self) -> Option<f64> {
        mean_metrics(&self.batches).map(|(_, acc)| acc)
    }
}

/// Run exactly one epoch over `dataset`, returning the updated model.
///
/// `dataset` is left in its shuffled order.
pub fn train_epoch<B, O, R>(
    mut model: SentimentModel<B>,
    optim:     &mut O,
    dataset:   &mut TweetDataset,
    cfg:       &TrainingConfig,
    epoch:     usize,
    rng:       &mut R,
    device:    &B::Device,
) -> (SentimentModel<B>, EpochSummary)
where
    B: AutodiffBackend,
    O: Optimizer<SentimentModel<B>, B>,
    R: Rng + ?Sized,
{
    dataset.co_shuffle(rng);

    let batcher = TweetBatcher::<B>::new(device.clone());
    let total   = dataset.sample_count();
    let dropped = if cfg.batch_size == 0 { total } else { total % cfg.batch_size };
    let mut batches = Vec::new();

    for (i, range) in batch_ranges(total, cfg.batch_size).enumerate() {
        let batch  = batcher.batch(dataset.items(range));
        let output = model.predict(batch.tweets);
        let loss   = model.loss(output.logits, batch.labels.clone());

        let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
        let accuracy      = model.accuracy(output.probabilities, batch.labels);

        // Backward pass + Adam update
        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &model);
        model = optim.step(cfg.learning_rate, model, grads);

        tracing::debug!(
            "Training batch {} | loss={:.4} | acc={:.3}",
            i + 1, loss_val, accuracy,
        );
        batches.push(BatchMetrics::new(Phase::Train, epoch, i + 1, loss_val, accuracy));
    }

    if batches.is_empty() {
        tracing::warn!(
            "Training split has {} examples, fewer than one batch of {}; no update made",
            total, cfg.batch_size,
        );
    } else if dropped > 0 {
        tracing::info!("Dropped {} trailing training examples (partial batch)", dropped);
    }

    (model, EpochSummary { epoch, batches, dropped })
}

/// Everything a full run produced.
#[derive(Debug, Clone)]
pub struct FitReport {
    pub epochs:     Vec<EpochSummary>,
    pub evaluation: EvalReport,
}

/// Build a fresh model, train it for `cfg.num_epochs` epochs and
/// evaluate it on `test`.
pub fn fit<B, R>(
    cfg:     &TrainingConfig,
    train:   &mut TweetDataset,
    test:    &TweetDataset,
    rng:     &mut R,
    device:  &B::Device,
    metrics: Option<&MetricsLogger>,
) -> Result<FitReport>
where
    B: AutodiffBackend,
    R: Rng + ?Sized,
{
    let mut model: SentimentModel<B> = cfg.model.init(device);
    let mut optim = cfg.optimizer.init();
    tracing::debug!("Training config: {}", cfg);
    tracing::info!(
        "Model ready: vocab={}, embedding={}, hidden={}, classes={}",
        cfg.model.vocab_size, cfg.model.embedding_size,
        cfg.model.hidden_size, cfg.model.num_classes,
    );

    let mut epochs = Vec::with_capacity(cfg.num_epochs);
    for epoch in 1..=cfg.num_epochs {
        let (trained, summary) = train_epoch(model, &mut optim, train, cfg, epoch, rng, device);
        model = trained;

        if let Some(loss) = summary.mean_loss() {
            tracing::info!(
                "Epoch {:>3}/{} | {} batches | train_loss={:.4} | train_acc={:.1}%",
                epoch, cfg.num_epochs, summary.batches.len(), loss,
                summary.mean_accuracy().unwrap_or_default() * 100.0,
            );
        }
        if let Some(logger) = metrics {
            logger.log(&summary.batches)?;
        }
        epochs.push(summary);
    }

    // model.valid() drops the autodiff wrapper: no gradients while testing
    let evaluation = evaluate(&model.valid(), test, cfg.batch_size, cfg.num_epochs, device)?;
    if let Some(logger) = metrics {
        logger.log(&evaluation.batches)?;
    }

    Ok(FitReport { epochs, evaluation })
}
