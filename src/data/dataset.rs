use anyhow::{bail, Result};
use burn::data::dataset::Dataset;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::domain::sentiment::NUM_CLASSES;

/// One vectorised tweet: fixed-length token indices plus class label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetItem {
    pub tokens: Vec<u32>,
    pub label:  u8,
}

/// A train or test split held as two parallel sequences.
///
/// Tweet `i` always belongs with label `i`; every mutation
/// reorders both sides the same way.
#[derive(Debug, Clone, Default)]
pub struct TweetDataset {
    tweets: Vec<Vec<u32>>,
    labels: Vec<u8>,
}

impl TweetDataset {
    pub fn new(tweets: Vec<Vec<u32>>, labels: Vec<u8>) -> Result<Self> {
        if tweets.len() != labels.len() {
            bail!("{} tweets but {} labels", tweets.len(), labels.len());
        }
        if let Some(bad) = labels.iter().find(|&&l| l as usize >= NUM_CLASSES) {
            bail!("label {bad} is outside [0, {}]", NUM_CLASSES - 1);
        }
        if let Some(first) = tweets.first() {
            if let Some(i) = tweets.iter().position(|t| t.len() != first.len()) {
                bail!("tweet {i} has length {} but tweet 0 has length {}", tweets[i].len(), first.len());
            }
        }
        Ok(Self { tweets, labels })
    }

    pub fn tweets(&self) -> &[Vec<u32>] {
        &self.tweets
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn sample_count(&self) -> usize {
        self.labels.len()
    }

    /// Apply one random permutation to tweets and labels alike.
    /// Returns the permutation: position `i` now holds old example `order[i]`.
    pub fn co_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.sample_count()).collect();
        order.shuffle(rng);

        self.tweets = order.iter().map(|&i| self.tweets[i].clone()).collect();
        self.labels = order.iter().map(|&i| self.labels[i]).collect();
        order
    }

    /// Items in `range`, in order. Out-of-range positions are skipped.
    pub fn items(&self, range: Range<usize>) -> Vec<TweetItem> {
        range.filter_map(|i| self.get(i)).collect()
    }
}

impl Dataset<TweetItem> for TweetDataset {
    fn get(&self, index: usize) -> Option<TweetItem> {
        Some(TweetItem {
            tokens: self.tweets.get(index)?.clone(),
            label:  *self.labels.get(index)?,
        })
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

/// Contiguous batch ranges of exactly `batch_size`, starting at offset 0.
/// A trailing remainder shorter than one batch is not yielded, so there
/// are `len / batch_size` ranges (none when `batch_size` is 0).
pub fn batch_ranges(len: usize, batch_size: usize) -> impl Iterator<Item = Range<usize>> {
    let count = if batch_size == 0 { 0 } else { len / batch_size };
    (0..count).map(move |b| b * batch_size..(b + 1) * batch_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn sample_dataset(n: usize) -> TweetDataset {
        // Label is derivable from the tweet so pairing can be checked
        let tweets = (0..n).map(|i| vec![i as u32 + 1, (i % 5) as u32, 0]).collect();
        let labels = (0..n).map(|i| (i % 5) as u8).collect();
        TweetDataset::new(tweets, labels).unwrap()
    }

    #[test]
    fn test_rejects_misaligned_sequences() {
        assert!(TweetDataset::new(vec![vec![1], vec![2]], vec![0]).is_err());
    }

    #[test]
    fn test_rejects_label_out_of_range() {
        assert!(TweetDataset::new(vec![vec![1]], vec![5]).is_err());
    }

    #[test]
    fn test_rejects_ragged_tweets() {
        assert!(TweetDataset::new(vec![vec![1, 2], vec![3]], vec![0, 1]).is_err());
    }

    #[test]
    fn test_co_shuffle_keeps_pairs_together() {
        let original = sample_dataset(200);
        let mut shuffled = original.clone();
        let order = shuffled.co_shuffle(&mut StdRng::seed_from_u64(7));

        for (pos, &old) in order.iter().enumerate() {
            assert_eq!(shuffled.tweets()[pos], original.tweets()[old]);
            assert_eq!(shuffled.labels()[pos], original.labels()[old]);
            assert_eq!(shuffled.tweets()[pos][1] as u8, shuffled.labels()[pos]);
        }
    }

    #[test]
    fn test_co_shuffle_is_a_permutation() {
        let mut dataset = sample_dataset(50);
        let mut order   = dataset.co_shuffle(&mut StdRng::seed_from_u64(1));
        order.sort_unstable();
        assert_eq!(order, (0..50).collect::<Vec<_>>());
        assert_eq!(dataset.sample_count(), 50);
    }

    #[test]
    fn test_batch_ranges_drop_the_remainder() {
        let ranges: Vec<_> = batch_ranges(1_234, 500).collect();
        assert_eq!(ranges, vec![0..500, 500..1000]);
    }

    #[test]
    fn test_batch_count_is_floor_of_len_over_batch_size() {
        for (len, batch) in [(0, 3), (2, 3), (3, 3), (10, 3), (10, 1), (7, 10)] {
            assert_eq!(batch_ranges(len, batch).count(), len / batch);
        }
        assert_eq!(batch_ranges(10, 0).count(), 0);
    }

    #[test]
    fn test_items_follow_dataset_order() {
        let dataset = sample_dataset(6);
        let items   = dataset.items(2..4);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].tokens, dataset.tweets()[2]);
        assert_eq!(items[1].label, dataset.labels()[3]);
    }
}
