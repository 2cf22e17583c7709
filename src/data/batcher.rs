// ============================================================
// Layer 4 — Tweet Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<TweetItem>
// into tensors.
//
//   Input:  N TweetItems, each with S token indices
//   Output: TweetBatch { tweets: [N, S] Int, labels: [N] Int }
//
// All tweets are padded to the same length by the vectorizer,
// so flattening and reshaping is enough.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::TweetItem;

/// A batch of tweets ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct TweetBatch<B: Backend> {
    /// Token indices, shape: [batch_size, tweet_len], 0 = padding
    pub tweets: Tensor<B, 2, Int>,

    /// Class labels, shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

/// Holds the target device so tensors are created on the right CPU/GPU.
#[derive(Clone, Debug)]
pub struct TweetBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TweetBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<TweetItem, TweetBatch<B>> for TweetBatcher<B> {
    fn batch(&self, items: Vec<TweetItem>) -> TweetBatch<B> {
        let batch_size = items.len();
        let tweet_len  = items.first().map_or(0, |item| item.tokens.len());

        // Burn Int tensors are built from i32 here
        let tokens_flat: Vec<i32> = items
            .iter()
            .flat_map(|item| item.tokens.iter().map(|&t| t as i32))
            .collect();

        let labels: Vec<i32> = items
            .iter()
            .map(|item| item.label as i32)
            .collect();

        let tweets = Tensor::<B, 1, Int>::from_ints(
            tokens_flat.as_slice(), &self.device
        ).reshape([batch_size, tweet_len]);

        let labels = Tensor::<B, 1, Int>::from_ints(
            labels.as_slice(), &self.device
        );

        TweetBatch { tweets, labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_batch_shapes_and_values() {
        let batcher = TweetBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(vec![
            TweetItem { tokens: vec![1, 2, 0], label: 4 },
            TweetItem { tokens: vec![3, 0, 0], label: 0 },
        ]);

        assert_eq!(batch.tweets.dims(), [2, 3]);
        assert_eq!(batch.labels.dims(), [2]);

        let tokens: Vec<i64> = batch.tweets.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(tokens, vec![1, 2, 0, 3, 0, 0]);
        let labels: Vec<i64> = batch.labels.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(labels, vec![4, 0]);
    }
}
