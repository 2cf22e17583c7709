use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig, LstmState,
    },
    prelude::*,
    tensor::activation::softmax,
};

use crate::domain::vocabulary::PAD_ID;

#[derive(Config, Debug)]
pub struct SentimentModelConfig {
    /// Rows of the embedding table (highest token index + 1)
    pub vocab_size: usize,
    #[config(default = 300)]
    pub embedding_size: usize,
    /// LSTM units
    #[config(default = 150)]
    pub hidden_size: usize,
    #[config(default = 5)]
    pub num_classes: usize,
}

impl SentimentModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SentimentModel<B> {
        let embedding  = EmbeddingConfig::new(self.vocab_size, self.embedding_size).init(device);
        let encoder    = LstmConfig::new(self.embedding_size, self.hidden_size, true).init(device);
        let classifier = LinearConfig::new(self.hidden_size, self.num_classes).init(device);
        SentimentModel { embedding, encoder, classifier }
    }
}

/// Embedding → LSTM → mean pool → linear, classifying a tweet into
/// one of `num_classes` sentiments.
#[derive(Module, Debug)]
pub struct SentimentModel<B: Backend> {
    pub embedding:  Embedding<B>,
    pub encoder:    Lstm<B>,
    pub classifier: Linear<B>,
}

pub struct SentimentOutput<B: Backend> {
    /// Unnormalised class scores: [batch, num_classes]
    pub logits: Tensor<B, 2>,
    /// Softmax of the logits, each row sums to 1: [batch, num_classes]
    pub probabilities: Tensor<B, 2>,
    /// Final LSTM cell and hidden state: [batch, hidden_size] each
    pub state: LstmState<B, 2>,
}

impl<B: Backend> SentimentModel<B> {
    /// tweets: [batch, tweet_len] token indices, 0 = padding.
    pub fn predict(&self, tweets: Tensor<B, 2, Int>) -> SentimentOutput<B> {
        let (pooled, state) = self.encode(tweets);

        let logits        = self.classifier.forward(pooled);
        let probabilities = softmax(logits.clone(), 1);

        SentimentOutput { logits, probabilities, state }
    }

    /// Run the LSTM over `tweets` and mean-pool its outputs.
    ///
    /// Returns the pooled features [batch, hidden_size] and the state
    /// after the last real token. Padding positions neither move the
    /// state nor add to the pooled sum, but they still count in the
    /// mean, which is taken over all `tweet_len` positions.
    pub fn encode(&self, tweets: Tensor<B, 2, Int>) -> (Tensor<B, 2>, LstmState<B, 2>) {
        let [batch_size, tweet_len] = tweets.dims();
        let [hidden_size, _]        = self.classifier.weight.val().dims();
        let device = tweets.device();

        // 1.0 at real tokens, 0.0 at padding: [batch, tweet_len]
        let mask = tweets.clone()
            .equal_elem(PAD_ID as i64)
            .bool_not()
            .float();

        let embedded = self.embedding.forward(tweets); // [batch, tweet_len, embedding]
        let [_, _, embedding_size] = embedded.dims();

        let mut cell   = Tensor::<B, 2>::zeros([batch_size, hidden_size], &device);
        let mut hidden = Tensor::<B, 2>::zeros([batch_size, hidden_size], &device);
        let mut summed = Tensor::<B, 2>::zeros([batch_size, hidden_size], &device);

        for t in 0..tweet_len {
            let step = embedded.clone().slice([0..batch_size, t..t + 1, 0..embedding_size]);
            let keep = mask.clone().slice([0..batch_size, t..t + 1]); // [batch, 1]
            let hold = keep.clone().neg().add_scalar(1.0);

            let (output, next) = self.encoder.forward(
                step,
                Some(LstmState::new(cell.clone(), hidden.clone())),
            );
            let output = output.reshape([batch_size, hidden_size]);

            cell   = next.cell * keep.clone() + cell * hold.clone();
            hidden = next.hidden * keep.clone() + hidden * hold;
            summed = summed + output * keep;
        }

        let pooled = summed.div_scalar(tweet_len.max(1) as f32);
        (pooled, LstmState::new(cell, hidden))
    }

    /// Mean sparse categorical cross-entropy over the batch.
    pub fn loss(&self, logits: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits, labels)
    }

    /// Fraction of rows whose most probable class equals the label.
    pub fn accuracy(&self, probabilities: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> f64 {
        let [batch_size, _] = probabilities.dims();
        if batch_size == 0 {
            return 0.0;
        }

        // argmax(1) returns [batch, 1]; flatten before comparing with [batch]
        let predicted = probabilities.argmax(1).reshape([batch_size]);
        let correct: i64 = predicted
            .equal(labels)
            .int().sum().into_scalar().elem::<i64>();

        correct as f64 / batch_size as f64
    }
}
