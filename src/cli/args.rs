// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// Every flag is optional: running the binary with no arguments
// reproduces the reference run (one epoch, batch size 500, …).

use clap::Args;
use crate::application::run_use_case::RunConfig;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Training file with one `label,text` record per line
    #[arg(long, default_value = "data/train.csv")]
    pub train_file: String,

    /// Test file, same format as the training file
    #[arg(long, default_value = "data/test.csv")]
    pub test_file: String,

    /// Field delimiter between label and text
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Token positions per tweet; longer tweets are truncated, shorter padded
    #[arg(long, default_value_t = 50)]
    pub tweet_len: usize,

    /// Full passes over the training split
    #[arg(long, default_value_t = 1)]
    pub epochs: usize,

    /// Tweets per batch; a trailing partial batch is skipped
    #[arg(long, default_value_t = 500)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.01)]
    pub lr: f64,

    /// Embedding vector width
    #[arg(long, default_value_t = 300)]
    pub embedding_size: usize,

    /// LSTM units
    #[arg(long, default_value_t = 150)]
    pub hidden_size: usize,

    /// Seed for shuffling and weight initialisation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write metrics.csv and summary.json into this directory
    #[arg(long)]
    pub metrics_dir: Option<String>,
}

/// The application layer never sees clap types.
impl From<RunArgs> for RunConfig {
    fn from(a: RunArgs) -> Self {
        RunConfig {
            train_file:     a.train_file,
            test_file:      a.test_file,
            delimiter:      a.delimiter,
            tweet_len:      a.tweet_len,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            learning_rate:  a.lr,
            embedding_size: a.embedding_size,
            hidden_size:    a.hidden_size,
            seed:           a.seed,
            metrics_dir:    a.metrics_dir,
        }
    }
}
