use serde::{Deserialize, Serialize};

use crate::domain::sentiment::Sentiment;

/// One record of a train/test file: raw text plus its label.
/// Tokenisation and index encoding happen later in the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelledTweet {
    pub sentiment: Sentiment,
    pub text:      String,
}

impl LabelledTweet {
    pub fn new(sentiment: Sentiment, text: impl Into<String>) -> Self {
        Self { sentiment, text: text.into() }
    }
}
