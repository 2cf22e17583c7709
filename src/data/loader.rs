// ============================================================
// Layer 4 — Tweet Loader
// ============================================================
// Reads labelled tweets from a delimited text file.
//
// Record format (one per line):
//   label,text
//
//   - label: integer class in [0, 4]
//   - text:  everything after the first delimiter; may be wrapped
//            in double quotes, with "" standing for a literal quote,
//            and may itself contain the delimiter
//
// Example:
//   sentiment,tweet
//   4,"loving this weather, finally!"
//   0,worst commute ever
//
// A first line whose label does not parse as an integer is a
// header and gets skipped. Blank lines are ignored. Any other
// malformed record fails the whole load with its line number.

use anyhow::{anyhow, bail, Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use crate::domain::{sentiment::Sentiment, traits::TweetSource, tweet::LabelledTweet};

/// Loads `label,text` records from a file.
/// Implements the TweetSource trait from Layer 3.
pub struct DelimitedTweetLoader {
    path:      PathBuf,
    delimiter: char,
}

impl DelimitedTweetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), delimiter: ',' }
    }

    /// Use a delimiter other than a comma (e.g. '\t' for TSV exports)
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl TweetSource for DelimitedTweetLoader {
    fn load_all(&self) -> Result<Vec<LabelledTweet>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open tweet file '{}'", self.path.display()))?;

        let tweets = parse_records(BufReader::new(file), self.delimiter)
            .with_context(|| format!("Cannot parse tweet file '{}'", self.path.display()))?;

        tracing::info!("Loaded {} tweets from '{}'", tweets.len(), self.path.display());
        Ok(tweets)
    }
}

/// Parse every record from `reader`.
pub fn parse_records(reader: impl BufRead, delimiter: char) -> Result<Vec<LabelledTweet>> {
    let mut tweets     = Vec::new();
    let mut first_line = true;

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line    = line.with_context(|| format!("Cannot read line {line_no}"))?;
        // Excel exports like to prepend a byte order mark
        let line = line.trim_start_matches('\u{FEFF}').trim_end_matches('\r');

        if line.trim().is_empty() {
            continue;
        }

        let is_header_candidate = first_line;
        first_line = false;

        let (label_field, text_field) = line
            .split_once(delimiter)
            .ok_or_else(|| anyhow!("line {line_no}: expected 'label{delimiter}text'"))?;

        let label_field = unquote(label_field.trim());
        let label = match label_field.parse::<u8>() {
            Ok(label) => label,
            Err(_) if is_header_candidate => {
                tracing::debug!("Skipping header line: {line}");
                continue;
            }
            Err(_) => bail!("line {line_no}: label '{label_field}' is not an integer"),
        };

        let sentiment = Sentiment::from_index(label)
            .with_context(|| format!("line {line_no}"))?;

        tweets.push(LabelledTweet::new(sentiment, unquote(text_field.trim())));
    }

    Ok(tweets)
}

/// Strip one pair of surrounding double quotes and undo "" escapes.
fn unquote(field: &str) -> String {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        field[1..field.len() - 1].replace("\"\"", "\"")
    } else {
        field.to_string()
    }
}
