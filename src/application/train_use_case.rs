// ============================================================
// Application - Training Use Case
// ============================================================
// Orchestrates a full training run:
//
//   1. Read the gold train and dev corpora
//   2. Build the token and frame vocabularies from the train corpus
//   3. Build classifier samples and Burn datasets
//   4. Persist config and vocabularies next to the checkpoint
//   5. Run the training loop
//
// All hyperparameters live in TrainConfig; there are no module-level
// defaults anywhere else.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::dataset::{samples_from_corpus, FrameDataset};
use crate::data::reader::CorpusReader;
use crate::data::vocab::{FrameVocab, TokenVocab};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::FrameIdNetworkConfig;
use crate::ml::trainer::run_training;

/// Everything a training run needs, serializable so the run can be
/// reconstructed from the checkpoint directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub train_sentences: String,
    pub train_elements: String,
    pub dev_sentences: String,
    pub dev_elements: String,
    pub model_dir: String,
    pub hidden_sizes: Vec<usize>,
    pub batch_size: usize,
    pub num_epochs: usize,
    pub learning_rate: f64,
    pub embedding_size: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            train_sentences: "data/experiments/xp_001/data/train.sentences".to_string(),
            train_elements: "data/experiments/xp_001/data/train.frame.elements".to_string(),
            dev_sentences: "data/experiments/xp_001/data/dev.sentences".to_string(),
            dev_elements: "data/experiments/xp_001/data/dev.frames".to_string(),
            model_dir: "data/models".to_string(),
            hidden_sizes: vec![512, 256],
            batch_size: 10,
            num_epochs: 5,
            learning_rate: 0.001,
            embedding_size: 300,
        }
    }
}

pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        tracing::info!("Reading train corpus from '{}'", cfg.train_sentences);
        let train_corpus =
            CorpusReader::with_paths(&cfg.train_sentences, &cfg.train_elements).read_data()?;

        tracing::info!("Reading dev corpus from '{}'", cfg.dev_sentences);
        let dev_corpus =
            CorpusReader::with_paths(&cfg.dev_sentences, &cfg.dev_elements).read_data()?;

        // Vocabularies come from the training corpus only; dev tokens
        // unseen there map to UNK, dev frames unseen there can never
        // be predicted and always count as errors.
        let tokens = TokenVocab::build(&[&train_corpus]);
        let frames = FrameVocab::build(&[&train_corpus]);
        tracing::info!(
            "Vocabularies: {} tokens, {} frame classes",
            tokens.len(),
            frames.len(),
        );

        let network_config = FrameIdNetworkConfig::new(
            tokens.len(),
            cfg.embedding_size,
            cfg.hidden_sizes.clone(),
            frames.len(),
        );

        let train_samples = samples_from_corpus(&train_corpus, &tokens, &frames)?;
        let dev_samples = samples_from_corpus(&dev_corpus, &tokens, &frames)?;
        tracing::info!(
            "Samples: {} train, {} dev",
            train_samples.len(),
            dev_samples.len(),
        );

        let ckpt = CheckpointManager::new(&cfg.model_dir);
        ckpt.save_json("train_config.json", cfg)?;
        ckpt.save_network_config(&network_config)?;
        ckpt.save_vocabs(&tokens, &frames)?;

        run_training(
            cfg,
            network_config,
            FrameDataset::new(train_samples),
            FrameDataset::new(dev_samples),
            &ckpt,
        )
    }
}

// ─── Unit Tests ──────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// A miniature end-to-end run: two frames, four sentences, a tiny
    /// network. Checks the artifacts, not the learned quality.
    #[test]
    fn test_execute_trains_and_checkpoints() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sentences = dir.path().join("train.sentences");
        let elements = dir.path().join("train.frame.elements");

        fs::write(&sentences, "cats sleep\ndogs run\nbirds sleep\nhorses run\n").unwrap();
        fs::write(
            &elements,
            "0\t0\t0\tSleep\tsleep.v\t1\tsleep\t0\n\
             0\t0\t0\tMotion\trun.v\t1\trun\t1\n\
             0\t0\t0\tSleep\tsleep.v\t1\tsleep\t2\n\
             0\t0\t0\tMotion\trun.v\t1\trun\t3\n",
        )
        .unwrap();

        let model_dir = dir.path().join("model");
        let config = TrainConfig {
            train_sentences: sentences.display().to_string(),
            train_elements: elements.display().to_string(),
            dev_sentences: sentences.display().to_string(),
            dev_elements: elements.display().to_string(),
            model_dir: model_dir.display().to_string(),
            hidden_sizes: vec![16],
            batch_size: 2,
            num_epochs: 2,
            learning_rate: 0.01,
            embedding_size: 8,
        };

        TrainUseCase::new(config).execute().expect("training");

        assert!(model_dir.join("model.mpk").exists());
        assert!(model_dir.join("network.json").exists());
        assert!(model_dir.join("token_vocab.json").exists());
        assert!(model_dir.join("frame_vocab.json").exists());
        assert!(model_dir.join("train_config.json").exists());
        assert!(model_dir.join("metrics.csv").exists());

        let metrics = fs::read_to_string(model_dir.join("metrics.csv")).unwrap();
        // Header plus one row per epoch.
        assert_eq!(metrics.lines().count(), 3);
    }
}
