// ============================================================
// ML - Frame Classifier Network
// ============================================================
// A feed-forward classifier over sentence features: embedding lookup,
// context averaging with trigger re-injection, a configurable stack
// of Linear+ReLU hidden layers, and a linear output layer of raw
// per-class scores (normalization happens in the loss).
//
// The layer stack is built once from the config; hidden widths are
// data, not code, so there is exactly one network implementation.

use anyhow::Result;
use burn::{
    nn::{loss::CrossEntropyLossConfig, Embedding, EmbeddingConfig, Linear, LinearConfig},
    prelude::*,
    tensor::activation::relu,
};

use crate::data::batcher::FrameBatch;
use crate::domain::errors::FrameError;

#[derive(Config, Debug)]
pub struct FrameIdNetworkConfig {
    /// Embedding-table rows, including PAD and UNK.
    pub vocab_size: usize,
    /// Width of one word embedding; features are twice this.
    pub embedding_size: usize,
    /// Hidden layer widths, applied in order with ReLU between.
    pub hidden_sizes: Vec<usize>,
    /// Size of the frame inventory.
    pub num_classes: usize,
}

impl FrameIdNetworkConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> FrameIdNetwork<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_size).init(device);

        let mut hidden = Vec::with_capacity(self.hidden_sizes.len());
        let mut width = self.embedding_size * 2;
        for &hidden_size in &self.hidden_sizes {
            hidden.push(LinearConfig::new(width, hidden_size).init(device));
            width = hidden_size;
        }
        let output = LinearConfig::new(width, self.num_classes).init(device);

        FrameIdNetwork {
            embedding,
            hidden,
            output,
            embedding_size: self.embedding_size,
        }
    }
}

#[derive(Module, Debug)]
pub struct FrameIdNetwork<B: Backend> {
    embedding: Embedding<B>,
    hidden: Vec<Linear<B>>,
    output: Linear<B>,
    embedding_size: usize,
}

impl<B: Backend> FrameIdNetwork<B> {
    /// The feature encoder: one vector of size 2*embedding_size per
    /// sentence.
    ///
    /// First the context vector: the weighted sum of all token
    /// embeddings, where `mean_weights` holds 1/len for the
    /// sentence's own positions and 0 for padding, i.e. the mean over
    /// exactly the real tokens. Averaging alone would dilute the
    /// trigger amid a long sentence, so the trigger token's own
    /// embedding (position 0 by batch convention) is concatenated in
    /// front of the mean, keeping an undiluted signal for the word
    /// that actually evokes the frame. A single-token sentence
    /// degenerates to the trigger vector concatenated with itself.
    pub fn encode(&self, token_ids: Tensor<B, 2, Int>, mean_weights: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch_size, _seq_len] = token_ids.dims();
        let width = self.embedding_size;

        let embedded = self.embedding.forward(token_ids); // [batch, seq, emb]

        let weights = mean_weights.unsqueeze_dim::<3>(2).repeat(&[1, 1, width]);
        let context = (embedded.clone() * weights).sum_dim(1).squeeze::<2>(1); // [batch, emb]

        let trigger = embedded
            .slice([0..batch_size, 0..1, 0..width])
            .reshape([batch_size, width]); // [batch, emb]

        Tensor::cat(vec![trigger, context], 1) // [batch, 2*emb]
    }

    /// Raw per-class scores, shape [batch, num_classes].
    pub fn forward(&self, token_ids: Tensor<B, 2, Int>, mean_weights: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = self.encode(token_ids, mean_weights);
        for layer in &self.hidden {
            x = relu(layer.forward(x));
        }
        self.output.forward(x)
    }

    /// Cross-entropy loss against the batch's gold labels, plus the
    /// logits. Fails fast when sentence and label counts disagree.
    pub fn forward_loss(&self, batch: FrameBatch<B>) -> Result<(Tensor<B, 1>, Tensor<B, 2>)> {
        let [sentences, _] = batch.token_ids.dims();
        let [labels] = batch.labels.dims();
        if sentences != labels {
            return Err(FrameError::BatchShape { sentences, labels }.into());
        }

        let logits = self.forward(batch.token_ids, batch.mean_weights);
        let ce = CrossEntropyLossConfig::new().init(&logits.device());
        let loss = ce.forward(logits.clone(), batch.labels);
        Ok((loss, logits))
    }

    /// Arg-max class index per sentence. Pure computation, no side
    /// effects.
    pub fn predict(
        &self,
        token_ids: Tensor<B, 2, Int>,
        mean_weights: Tensor<B, 2>,
    ) -> Result<Vec<usize>> {
        let logits = self.forward(token_ids, mean_weights);
        let predicted = logits.argmax(1).flatten::<1>(0, 1);

        let ids: Vec<i64> = predicted
            .into_data()
            .to_vec()
            .map_err(|e| anyhow::anyhow!("cannot read predictions: {e:?}"))?;
        Ok(ids.into_iter().map(|id| id as usize).collect())
    }
}
