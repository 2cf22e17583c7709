use anyhow::Result;
use clap::Parser;
use tweet_sentiment::cli::Cli;

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the final accuracy
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tweet_sentiment=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
