// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands a RunConfig to Layer 2.
// The only thing printed to stdout is the final test accuracy.

pub mod args;

use anyhow::Result;
use clap::Parser;
use args::RunArgs;

#[derive(Parser, Debug)]
#[command(
    name = "tweet-sentiment",
    version,
    about = "Train an LSTM on labelled tweets for one epoch and report test accuracy."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: RunArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        use crate::application::run_use_case::RunUseCase;

        tracing::info!("Training on '{}', testing on '{}'", self.args.train_file, self.args.test_file);

        let report = RunUseCase::new(self.args.into()).execute()?;
        println!("{}", report.accuracy);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::run_use_case::RunConfig;

    #[test]
    fn test_no_flags_gives_reference_defaults() {
        let cli = Cli::try_parse_from(["tweet-sentiment"]).unwrap();
        let cfg: RunConfig = cli.args.into();
        let default = RunConfig::default();

        assert_eq!(cfg.train_file, default.train_file);
        assert_eq!(cfg.test_file, default.test_file);
        assert_eq!(cfg.tweet_len, default.tweet_len);
        assert_eq!(cfg.batch_size, default.batch_size);
        assert_eq!(cfg.epochs, default.epochs);
        assert_eq!(cfg.learning_rate, default.learning_rate);
        assert_eq!(cfg.embedding_size, default.embedding_size);
        assert_eq!(cfg.hidden_size, default.hidden_size);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "tweet-sentiment", "--epochs", "3", "--batch-size", "64",
            "--lr", "0.001", "--seed", "9", "--delimiter", "\t",
        ]).unwrap();
        let cfg: RunConfig = cli.args.into();

        assert_eq!(cfg.epochs, 3);
        assert_eq!(cfg.batch_size, 64);
        assert_eq!(cfg.learning_rate, 0.001);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.delimiter, '\t');
    }
}
