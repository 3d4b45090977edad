// ============================================================
// Infra - Checkpoint Manager
// ============================================================
// Persists everything evaluation needs to rebuild the classifier:
//
//   model.mpk           - network parameters (full-precision
//                         NamedMpkFileRecorder blob, so save/load
//                         round-trips reproduce logits exactly)
//   network.json        - FrameIdNetworkConfig, to rebuild the
//                         architecture before loading parameters
//   token_vocab.json    - token -> embedding row mapping
//   frame_vocab.json    - frame label <-> class index mapping
//   train_config.json   - the full training configuration
//
// Only parameters go into the blob; optimizer state is not saved.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
};
use serde::{de::DeserializeOwned, Serialize};

use crate::data::vocab::{FrameVocab, TokenVocab};
use crate::domain::errors::FrameError;
use crate::ml::model::{FrameIdNetwork, FrameIdNetworkConfig};

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Creates the checkpoint directory if it does not exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Path of the parameter blob (the recorder appends ".mpk" to
    /// the stem it is given).
    pub fn model_blob_path(&self) -> PathBuf {
        self.dir.join("model.mpk")
    }

    fn model_stem(&self) -> PathBuf {
        self.dir.join("model")
    }

    /// Saves the network parameters at full precision.
    pub fn save_model<B: Backend>(&self, model: &FrameIdNetwork<B>) -> Result<()> {
        let stem = self.model_stem();
        NamedMpkFileRecorder::<FullPrecisionSettings>::new()
            .record(model.clone().into_record(), stem.clone())
            .with_context(|| format!("failed to save checkpoint to '{}'", stem.display()))?;

        tracing::debug!("Saved model parameters to '{}'", self.model_blob_path().display());
        Ok(())
    }

    /// Restores parameters into a freshly built network of the same
    /// architecture. Fails with `ModelNotFound` when no blob exists.
    pub fn load_model<B: Backend>(
        &self,
        model: FrameIdNetwork<B>,
        device: &B::Device,
    ) -> Result<FrameIdNetwork<B>> {
        let blob = self.model_blob_path();
        if !blob.exists() {
            return Err(FrameError::ModelNotFound(blob.display().to_string()).into());
        }

        let record = NamedMpkFileRecorder::<FullPrecisionSettings>::new()
            .load(self.model_stem(), device)
            .with_context(|| format!("cannot load checkpoint '{}'", blob.display()))?;

        Ok(model.load_record(record))
    }

    pub fn save_network_config(&self, config: &FrameIdNetworkConfig) -> Result<()> {
        self.save_json("network.json", config)
    }

    pub fn load_network_config(&self) -> Result<FrameIdNetworkConfig> {
        self.load_json("network.json")
    }

    pub fn save_vocabs(&self, tokens: &TokenVocab, frames: &FrameVocab) -> Result<()> {
        self.save_json("token_vocab.json", tokens)?;
        self.save_json("frame_vocab.json", frames)
    }

    pub fn load_vocabs(&self) -> Result<(TokenVocab, FrameVocab)> {
        Ok((self.load_json("token_vocab.json")?, self.load_json("frame_vocab.json")?))
    }

    /// Saves an arbitrary serde value beside the checkpoint, used for
    /// the training configuration.
    pub fn save_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("cannot write '{}'", path.display()))?;
        tracing::debug!("Saved '{}'", path.display());
        Ok(())
    }

    pub fn load_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path).with_context(|| {
            format!("cannot read '{}', has the model been trained?", path.display())
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

// ─── Unit Tests ──────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::batcher::FrameBatcher;
    use crate::data::dataset::FrameSample;
    use burn::data::dataloader::batcher::Batcher;

    type TestBackend = burn::backend::NdArray;

    fn device() -> burn::backend::ndarray::NdArrayDevice {
        burn::backend::ndarray::NdArrayDevice::Cpu
    }

    #[test]
    fn test_round_trip_preserves_predictions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manager = CheckpointManager::new(dir.path());

        let config = FrameIdNetworkConfig::new(12, 4, vec![8], 3);
        let trained: FrameIdNetwork<TestBackend> = config.init(&device());
        manager.save_model(&trained).expect("save");

        // The blob must land exactly where load_model's existence
        // check looks for it.
        assert!(manager.model_blob_path().exists());

        // A second init draws different random parameters; loading
        // must overwrite them with the saved ones.
        let restored = manager
            .load_model(config.init::<TestBackend>(&device()), &device())
            .expect("load");

        let batcher = FrameBatcher::<TestBackend>::new(device());
        let samples = vec![
            FrameSample { token_ids: vec![2, 3, 4], label: 0 },
            FrameSample { token_ids: vec![5, 6], label: 1 },
            FrameSample { token_ids: vec![7], label: 2 },
        ];

        let before = batcher.batch(samples.clone());
        let after = batcher.batch(samples);

        let original: Vec<f32> = trained
            .forward(before.token_ids, before.mean_weights)
            .into_data()
            .to_vec()
            .unwrap();
        let reloaded: Vec<f32> = restored
            .forward(after.token_ids, after.mean_weights)
            .into_data()
            .to_vec()
            .unwrap();

        assert_eq!(original.len(), reloaded.len());
        for (a, b) in original.iter().zip(&reloaded) {
            assert!((a - b).abs() < 1e-6, "logits diverge: {a} vs {b}");
        }
    }

    #[test]
    fn test_missing_blob_is_model_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manager = CheckpointManager::new(dir.path());

        let config = FrameIdNetworkConfig::new(12, 4, vec![8], 3);
        let err = manager
            .load_model(config.init::<TestBackend>(&device()), &device())
            .unwrap_err();

        let frame_err = err.downcast_ref::<FrameError>().expect("typed error");
        assert!(matches!(frame_err, FrameError::ModelNotFound(_)));
    }

    #[test]
    fn test_config_and_vocab_json_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manager = CheckpointManager::new(dir.path());

        let config = FrameIdNetworkConfig::new(12, 4, vec![8, 6], 3);
        manager.save_network_config(&config).expect("save config");
        let loaded = manager.load_network_config().expect("load config");
        assert_eq!(loaded.hidden_sizes, vec![8, 6]);
        assert_eq!(loaded.num_classes, 3);

        let tokens = TokenVocab::default();
        let frames = FrameVocab::default();
        manager.save_vocabs(&tokens, &frames).expect("save vocabs");
        let (tokens2, frames2) = manager.load_vocabs().expect("load vocabs");
        assert_eq!(tokens2.len(), tokens.len());
        assert!(frames2.is_empty());
    }
}
