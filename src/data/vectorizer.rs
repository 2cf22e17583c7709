// ============================================================
// Layer 4 — Vectorizer
// ============================================================
// Turns labelled tweets into the integer form the model eats:
//
//   "Loving it!!"  ──preprocess──▶ ["loving", "it"]
//                  ──vocabulary──▶ [57, 12]
//                  ──pad/truncate▶ [57, 12, 0, 0, …, 0]   (max_len)
//
// The vocabulary is built from the TRAINING split only; test
// tweets reuse it, and words never seen in training become
// "<unk>".

use anyhow::Result;

use crate::data::{dataset::TweetDataset, preprocessor::TweetPreprocessor};
use crate::domain::{
    sentiment::Sentiment,
    traits::TweetSource,
    tweet::LabelledTweet,
    vocabulary::{Vocabulary, PAD_ID},
};

/// Default number of token positions per tweet.
pub const DEFAULT_TWEET_LEN: usize = 50;

/// Both splits, vectorised against one shared vocabulary.
#[derive(Debug, Clone)]
pub struct VectorizedData {
    pub train:      TweetDataset,
    pub test:       TweetDataset,
    pub vocabulary: Vocabulary,
}

pub struct Vectorizer {
    preprocessor: TweetPreprocessor,
    tweet_len:    usize,
}

impl Vectorizer {
    pub fn new(tweet_len: usize) -> Self {
        Self { preprocessor: TweetPreprocessor::new(), tweet_len }
    }

    /// Vocabulary over every token of `tweets`, in first-appearance order.
    pub fn build_vocabulary(&self, tweets: &[LabelledTweet]) -> Vocabulary {
        let mut vocabulary = Vocabulary::new();
        for tweet in tweets {
            for token in self.preprocessor.tokenize(&tweet.text) {
                vocabulary.insert(&token);
            }
        }
        vocabulary
    }

    /// Fixed-length index sequence for one tweet.
    pub fn encode(&self, text: &str, vocabulary: &Vocabulary) -> Vec<u32> {
        let mut ids: Vec<u32> = self.preprocessor
            .tokenize(text)
            .iter()
            .take(self.tweet_len)
            .map(|token| vocabulary.encode(token))
            .collect();
        ids.resize(self.tweet_len, PAD_ID);
        ids
    }

    pub fn encode_split(&self, tweets: &[LabelledTweet], vocabulary: &Vocabulary) -> Result<TweetDataset> {
        let encoded = tweets.iter().map(|t| self.encode(&t.text, vocabulary)).collect();
        let labels  = tweets.iter().map(|t| t.sentiment.index()).collect();
        TweetDataset::new(encoded, labels)
    }

    pub fn vectorize(&self, train: &[LabelledTweet], test: &[LabelledTweet]) -> Result<VectorizedData> {
        let vocabulary = self.build_vocabulary(train);
        tracing::info!("Vocabulary built: {} tokens", vocabulary.token_count());
        tracing::info!("Training labels: {}", describe_labels(train));

        let truncated = train.iter()
            .chain(test)
            .filter(|t| self.preprocessor.tokenize(&t.text).len() > self.tweet_len)
            .count();
        if truncated > 0 {
            tracing::debug!("{} tweets truncated to {} tokens", truncated, self.tweet_len);
        }

        Ok(VectorizedData {
            train: self.encode_split(train, &vocabulary)?,
            test:  self.encode_split(test, &vocabulary)?,
            vocabulary,
        })
    }
}

/// Per-class counts, e.g. "very negative=3, negative=0, …".
pub fn describe_labels(tweets: &[LabelledTweet]) -> String {
    let mut counts = [0usize; Sentiment::ALL.len()];
    for tweet in tweets {
        counts[tweet.sentiment.index() as usize] += 1;
    }
    Sentiment::ALL
        .iter()
        .zip(counts)
        .map(|(sentiment, n)| format!("{sentiment}={n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load both splits and vectorise them: token sequences, labels
/// and the vocabulary, ready for training and evaluation.
pub fn get_data(
    train_source: &dyn TweetSource,
    test_source:  &dyn TweetSource,
    tweet_len:    usize,
) -> Result<VectorizedData> {
    let train = train_source.load_all()?;
    let test  = test_source.load_all()?;
    Vectorizer::new(tweet_len).vectorize(&train, &test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sentiment::Sentiment, vocabulary::UNK_ID};

    fn tweets(rows: &[(u8, &str)]) -> Vec<LabelledTweet> {
        rows.iter()
            .map(|(label, text)| LabelledTweet::new(Sentiment::from_index(*label).unwrap(), *text))
            .collect()
    }

    #[test]
    fn test_encode_pads_with_zero() {
        let v     = Vectorizer::new(5);
        let vocab = v.build_vocabulary(&tweets(&[(4, "good day")]));
        assert_eq!(v.encode("good day", &vocab), vec![2, 3, 0, 0, 0]);
    }

    #[test]
    fn test_encode_truncates_long_tweets() {
        let v     = Vectorizer::new(2);
        let vocab = v.build_vocabulary(&tweets(&[(4, "a b c d")]));
        assert_eq!(v.encode("a b c d", &vocab), vec![2, 3]);
    }

    #[test]
    fn test_test_split_uses_training_vocabulary() {
        let train = tweets(&[(4, "good good"), (0, "bad")]);
        let test  = tweets(&[(2, "good unseen")]);
        let data  = Vectorizer::new(3).vectorize(&train, &test).unwrap();

        assert_eq!(data.vocabulary.id("unseen"), None);
        assert_eq!(data.test.tweets()[0], vec![2, UNK_ID, 0]);
        assert_eq!(data.test.labels(), &[2]);
        assert_eq!(data.train.labels(), &[4, 0]);
    }

    #[test]
    fn test_describe_labels_counts_every_class() {
        let rows = tweets(&[(4, "yay"), (0, "ugh"), (4, "woo")]);
        assert_eq!(
            describe_labels(&rows),
            "very negative=1, negative=0, neutral=0, positive=0, very positive=2"
        );
    }

    #[test]
    fn test_get_data_from_in_memory_sources() {
        let train = tweets(&[(1, "meh"), (3, "nice one")]);
        let test  = tweets(&[(3, "nice")]);
        let data  = get_data(&train, &test, 4).unwrap();
        assert_eq!(data.train.sample_count(), 2);
        assert_eq!(data.test.tweets()[0].len(), 4);
        assert_eq!(data.vocabulary.len(), 5);
    }
}
