// ============================================================
// Layer 3 — Sentiment Label
// ============================================================
// The label of a tweet is one of five ordered classes,
// stored on disk and in tensors as an integer in [0, 4].

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of sentiment classes the classifier predicts.
pub const NUM_CLASSES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl Sentiment {
    pub const ALL: [Sentiment; NUM_CLASSES] = [
        Sentiment::VeryNegative,
        Sentiment::Negative,
        Sentiment::Neutral,
        Sentiment::Positive,
        Sentiment::VeryPositive,
    ];

    /// Class index used by the model (0 = very negative … 4 = very positive)
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Result<Self> {
        match Self::ALL.get(index as usize) {
            Some(s) => Ok(*s),
            None    => bail!("sentiment label {index} is outside [0, {}]", NUM_CLASSES - 1),
        }
    }
}

impl TryFrom<u8> for Sentiment {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_index(value)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sentiment::VeryNegative => "very negative",
            Sentiment::Negative     => "negative",
            Sentiment::Neutral      => "neutral",
            Sentiment::Positive     => "positive",
            Sentiment::VeryPositive => "very positive",
        };
        f.write_str(name)
    }
}
