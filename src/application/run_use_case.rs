// ============================================================
// Layer 2 — RunUseCase
// ============================================================
// Orchestrates the full pipeline in order:
//
//   Step 1: Validate the configuration
//   Step 2: Load + vectorise train/test files (Layer 4 - data)
//   Step 3: Seed the backend and shuffle RNG
//   Step 4: Train for the configured epochs     (Layer 5 - ml)
//   Step 5: Evaluate on the test split          (Layer 5 - ml)
//   Step 6: Write metrics, if requested         (Layer 6 - infra)

use anyhow::{bail, Result};
use burn::{optim::AdamConfig, prelude::Backend};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{
    loader::DelimitedTweetLoader,
    vectorizer::{get_data, DEFAULT_TWEET_LEN},
};
use crate::infra::metrics::MetricsLogger;
use crate::ml::{
    default_device,
    evaluator::EvalReport,
    model::SentimentModelConfig,
    trainer::{fit, TrainingConfig},
    TrainBackend,
};

// ─── Run Configuration ───────────────────────────────────────────────────────
// Defaults reproduce the reference run: one epoch over data/train.csv,
// batches of 500, Adam at 0.01, 300-d embeddings, 150 LSTM units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub train_file:     String,
    pub test_file:      String,
    pub delimiter:      char,
    pub tweet_len:      usize,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub learning_rate:  f64,
    pub embedding_size: usize,
    pub hidden_size:    usize,
    pub seed:           Option<u64>,
    pub metrics_dir:    Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            train_file:     "data/train.csv".to_string(),
            test_file:      "data/test.csv".to_string(),
            delimiter:      ',',
            tweet_len:      DEFAULT_TWEET_LEN,
            epochs:         1,
            batch_size:     500,
            learning_rate:  0.01,
            embedding_size: 300,
            hidden_size:    150,
            seed:           None,
            metrics_dir:    None,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("batch size must be at least 1");
        }
        if self.epochs == 0 {
            bail!("epochs must be at least 1");
        }
        if self.tweet_len == 0 {
            bail!("tweet length must be at least 1");
        }
        if self.embedding_size == 0 || self.hidden_size == 0 {
            bail!("embedding and hidden sizes must be at least 1");
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            bail!("learning rate must be a positive number, got {}", self.learning_rate);
        }
        Ok(())
    }

    /// Burn training config for a vocabulary with `vocab_size` rows.
    pub fn training_config(&self, vocab_size: usize) -> TrainingConfig {
        let model = SentimentModelConfig::new(vocab_size)
            .with_embedding_size(self.embedding_size)
            .with_hidden_size(self.hidden_size);

        TrainingConfig::new(model, AdamConfig::new())
            .with_batch_size(self.batch_size)
            .with_learning_rate(self.learning_rate)
            .with_num_epochs(self.epochs)
    }
}

/// Written to summary.json when a metrics directory is configured.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub config:         &'a RunConfig,
    pub vocab_size:     usize,
    pub train_examples: usize,
    pub test_examples:  usize,
    pub train_loss:     Option<f64>,
    pub test_loss:      f64,
    pub test_accuracy:  f64,
}

// ─── RunUseCase ──────────────────────────────────────────────────────────────
pub struct RunUseCase {
    config: RunConfig,
}

impl RunUseCase {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Execute the pipeline end to end and return the test evaluation.
    pub fn execute(&self) -> Result<EvalReport> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Load and vectorise both splits ───────────────────────────────────
        let train_source = DelimitedTweetLoader::new(&cfg.train_file).with_delimiter(cfg.delimiter);
        let test_source  = DelimitedTweetLoader::new(&cfg.test_file).with_delimiter(cfg.delimiter);
        let mut data = get_data(&train_source, &test_source, cfg.tweet_len)?;
        tracing::info!(
            "Data ready: {} train, {} test, vocabulary of {}",
            data.train.sample_count(),
            data.test.sample_count(),
            data.vocabulary.len(),
        );

        // ── Randomness ───────────────────────────────────────────────────────
        let mut rng = match cfg.seed {
            Some(seed) => {
                TrainBackend::seed(seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        let metrics = cfg.metrics_dir
            .as_deref()
            .map(MetricsLogger::new)
            .transpose()?;

        // ── Train + evaluate ─────────────────────────────────────────────────
        let device       = default_device();
        let training_cfg = cfg.training_config(data.vocabulary.len());
        let report = fit::<TrainBackend, _>(
            &training_cfg,
            &mut data.train,
            &data.test,
            &mut rng,
            &device,
            metrics.as_ref(),
        )?;

        if let Some(logger) = &metrics {
            logger.write_summary(&RunSummary {
                config:         cfg,
                vocab_size:     data.vocabulary.len(),
                train_examples: data.train.sample_count(),
                test_examples:  data.test.sample_count(),
                train_loss:     report.epochs.last().and_then(|e| e.mean_loss()),
                test_loss:      report.evaluation.loss,
                test_accuracy:  report.evaluation.accuracy,
            })?;
            tracing::info!("Metrics written to '{}'", logger.csv_path().display());
        }

        Ok(report.evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_match_reference_hyperparameters() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.batch_size, 500);
        assert_eq!(cfg.epochs, 1);
        assert_eq!(cfg.learning_rate, 0.01);

        let training = cfg.training_config(1000);
        assert_eq!(training.model.vocab_size, 1000);
        assert_eq!(training.model.embedding_size, 300);
        assert_eq!(training.model.hidden_size, 150);
        assert_eq!(training.model.num_classes, 5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            RunConfig { batch_size: 0, ..Default::default() },
            RunConfig { epochs: 0, ..Default::default() },
            RunConfig { tweet_len: 0, ..Default::default() },
            RunConfig { learning_rate: 0.0, ..Default::default() },
            RunConfig { learning_rate: f64::NAN, ..Default::default() },
        ];
        for cfg in bad {
            assert!(cfg.validate().is_err(), "{cfg:?} should be rejected");
        }
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn test_missing_train_file_is_an_error() {
        let cfg = RunConfig {
            train_file: "no/such/train.csv".to_string(),
            ..Default::default()
        };
        assert!(RunUseCase::new(cfg).execute().is_err());
    }

    #[test]
    fn test_runs_end_to_end_from_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        let rows: String = (0..40)
            .map(|i| if i % 2 == 0 { "4,good good day\n" } else { "0,\"bad, bad day\"\n" })
            .collect();
        fs::write(dir.join("train.csv"), format!("label,text\n{rows}")).unwrap();
        fs::write(dir.join("test.csv"), "4,good day\n0,bad day\n4,good\n0,bad\n").unwrap();

        let cfg = RunConfig {
            train_file:     dir.join("train.csv").display().to_string(),
            test_file:      dir.join("test.csv").display().to_string(),
            tweet_len:      4,
            epochs:         10,
            batch_size:     2,
            learning_rate:  0.05,
            embedding_size: 8,
            hidden_size:    8,
            seed:           Some(5),
            metrics_dir:    Some(dir.join("metrics").display().to_string()),
            ..Default::default()
        };

        let report = RunUseCase::new(cfg).execute().unwrap();
        assert_eq!(report.batches.len(), 2);
        assert!(report.accuracy > 0.99, "accuracy was {}", report.accuracy);

        let summary = fs::read_to_string(dir.join("metrics").join("summary.json")).unwrap();
        assert!(summary.contains("\"train_examples\": 40"));
        let csv = fs::read_to_string(dir.join("metrics").join("metrics.csv")).unwrap();
        // header + 10 epochs × 20 train batches + 2 test batches
        assert_eq!(csv.lines().count(), 1 + 200 + 2);
    }
}
