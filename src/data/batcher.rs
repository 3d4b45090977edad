// ============================================================
// Data - Frame Batcher
// ============================================================
// Implements Burn's Batcher trait: stacks a Vec<FrameSample> into the
// tensors one forward pass consumes. Sequences are padded to the
// longest sentence in the batch; alongside the token ids we emit a
// mean-weight matrix holding 1/len for real positions and 0 for
// padding, so the encoder's context mean is taken over exactly the
// sentence's own tokens regardless of padding.

use burn::data::dataloader::batcher::Batcher;
use burn::prelude::*;

use crate::data::dataset::FrameSample;
use crate::data::vocab::TokenVocab;

/// A batch of frame-classification samples.
#[derive(Debug, Clone)]
pub struct FrameBatch<B: Backend> {
    /// Trigger-first token ids, shape [batch_size, seq_len].
    pub token_ids: Tensor<B, 2, Int>,

    /// Per-position context-mean weights, shape [batch_size, seq_len].
    /// Row i sums to 1; padding cells are 0.
    pub mean_weights: Tensor<B, 2>,

    /// Gold frame class per sample, shape [batch_size].
    pub labels: Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct FrameBatcher<B: Backend> {
    device: B::Device,
}

impl<B: Backend> FrameBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<FrameSample, FrameBatch<B>> for FrameBatcher<B> {
    fn batch(&self, items: Vec<FrameSample>) -> FrameBatch<B> {
        let batch_size = items.len();
        let seq_len = items
            .iter()
            .map(|s| s.token_ids.len())
            .max()
            .unwrap_or(1)
            .max(1);

        let mut ids_flat = Vec::with_capacity(batch_size * seq_len);
        let mut weights_flat = Vec::with_capacity(batch_size * seq_len);
        let mut labels = Vec::with_capacity(batch_size);

        for sample in &items {
            let len = sample.token_ids.len().max(1);
            let weight = 1.0f32 / len as f32;

            for position in 0..seq_len {
                match sample.token_ids.get(position) {
                    Some(&id) => {
                        ids_flat.push(id as i32);
                        weights_flat.push(weight);
                    }
                    None => {
                        ids_flat.push(TokenVocab::PAD as i32);
                        weights_flat.push(0.0);
                    }
                }
            }

            labels.push(sample.label as i32);
        }

        let token_ids = Tensor::<B, 1, Int>::from_ints(ids_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);
        let mean_weights = Tensor::<B, 1>::from_floats(weights_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);
        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        FrameBatch { token_ids, mean_weights, labels }
    }
}

// ─── Unit Tests ──────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn batcher() -> FrameBatcher<TestBackend> {
        FrameBatcher::new(burn::backend::ndarray::NdArrayDevice::Cpu)
    }

    #[test]
    fn test_pads_to_longest_sentence() {
        let batch = batcher().batch(vec![
            FrameSample { token_ids: vec![3, 4, 5], label: 0 },
            FrameSample { token_ids: vec![6], label: 1 },
        ]);

        assert_eq!(batch.token_ids.dims(), [2, 3]);
        assert_eq!(batch.labels.dims(), [2]);

        let ids: Vec<i64> = batch.token_ids.into_data().to_vec().unwrap();
        assert_eq!(ids, vec![3, 4, 5, 6, TokenVocab::PAD as i64, TokenVocab::PAD as i64]);
    }

    #[test]
    fn test_mean_weights_cover_real_tokens_only() {
        let batch = batcher().batch(vec![
            FrameSample { token_ids: vec![3, 4], label: 0 },
            FrameSample { token_ids: vec![6], label: 1 },
        ]);

        let weights: Vec<f32> = batch.mean_weights.into_data().to_vec().unwrap();
        assert_eq!(weights, vec![0.5, 0.5, 1.0, 0.0]);
    }
}
