// ============================================================
// Data - Frame Dataset
// ============================================================
// Turns gold-annotated corpora into classifier samples and exposes
// them through Burn's Dataset trait so the DataLoader can batch them.
//
// Sample convention: the token-id sequence starts with the trigger
// token, followed by the rest of the sentence in order. The encoder
// relies on position 0 holding the trigger.

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::vocab::{FrameVocab, TokenVocab};
use crate::domain::annotation::Corpus;
use crate::domain::errors::FrameError;

/// One classifier input: trigger-first token ids plus the gold frame
/// class.
///
/// Frames unseen at training time get the out-of-range class
/// `frame_vocab.len()`, which the arg-max can never produce, so they
/// always score as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSample {
    pub token_ids: Vec<u32>,
    pub label: usize,
}

/// A gold sample paired with its frame label string, for corpus-level
/// evaluation reporting.
#[derive(Debug, Clone)]
pub struct GoldInstance {
    pub sample: FrameSample,
    pub frame: String,
}

/// Builds one instance per gold annotation, in corpus order.
///
/// Every annotation must carry a gold trigger position and frame;
/// predicted or raw corpora are rejected, since their samples would
/// have no defined trigger index or label.
pub fn gold_instances(
    corpus: &Corpus,
    tokens: &TokenVocab,
    frames: &FrameVocab,
) -> Result<Vec<GoldInstance>, FrameError> {
    let mut instances = Vec::with_capacity(corpus.annotation_count());

    for (sentence, annotations) in corpus.sentences().iter().zip(corpus.annotations()) {
        for annotation in annotations {
            let position = annotation.position.ok_or_else(|| {
                FrameError::MalformedCorpus("annotation without gold trigger position".into())
            })?;
            let frame = annotation.frame.clone().ok_or_else(|| {
                FrameError::MalformedCorpus("annotation without gold frame label".into())
            })?;
            if position >= sentence.len() {
                return Err(FrameError::MalformedCorpus(format!(
                    "trigger position {position} out of range for a {}-token sentence",
                    sentence.len(),
                )));
            }

            // Trigger first, then the remaining tokens in order.
            let mut token_ids = Vec::with_capacity(sentence.len());
            token_ids.push(tokens.id(&sentence[position]));
            for (i, token) in sentence.iter().enumerate() {
                if i != position {
                    token_ids.push(tokens.id(token));
                }
            }

            let label = frames.id(&frame).unwrap_or(frames.len());
            instances.push(GoldInstance {
                sample: FrameSample { token_ids, label },
                frame,
            });
        }
    }

    Ok(instances)
}

/// The samples alone, for dataset construction.
pub fn samples_from_corpus(
    corpus: &Corpus,
    tokens: &TokenVocab,
    frames: &FrameVocab,
) -> Result<Vec<FrameSample>, FrameError> {
    Ok(gold_instances(corpus, tokens, frames)?
        .into_iter()
        .map(|instance| instance.sample)
        .collect())
}

pub struct FrameDataset {
    samples: Vec<FrameSample>,
}

impl FrameDataset {
    pub fn new(samples: Vec<FrameSample>) -> Self {
        Self { samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<FrameSample> for FrameDataset {
    fn get(&self, index: usize) -> Option<FrameSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
