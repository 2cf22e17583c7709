// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw train/test files to tensor batches.
//
//   train.csv / test.csv
//       │
//       ▼
//   DelimitedTweetLoader  → label + raw text per record
//       │
//       ▼
//   TweetPreprocessor     → normalised tokens
//       │
//       ▼
//   Vectorizer            → vocabulary + fixed-length index sequences
//       │
//       ▼
//   TweetDataset          → parallel (tweets, labels), Burn Dataset
//       │
//       ▼
//   TweetBatcher          → [batch, tweet_len] / [batch] tensors

/// Reads `label,text` records from delimited files
pub mod loader;

/// Normalises and tokenises tweet text
pub mod preprocessor;

/// Builds the vocabulary and encodes tweets as index sequences
pub mod vectorizer;

/// Parallel tweets/labels split implementing Burn's Dataset trait
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
