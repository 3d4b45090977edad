// ============================================================
// Data - Vocabularies
// ============================================================
// Two lookup tables built from the training corpus:
//
//   TokenVocab - token -> embedding row, with reserved ids for
//                padding (0) and unknown tokens (1)
//   FrameVocab - frame label <-> class index
//
// Both round-trip through JSON next to the model checkpoint so
// evaluation resolves ids exactly the way training did.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::annotation::Corpus;

/// Maps lowercased tokens to embedding-table rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenVocab {
    index: HashMap<String, u32>,
}

impl TokenVocab {
    pub const PAD: u32 = 0;
    pub const UNK: u32 = 1;

    /// Collects every distinct token of the given corpora.
    pub fn build(corpora: &[&Corpus]) -> Self {
        let mut index = HashMap::new();
        for corpus in corpora {
            for sentence in corpus.sentences() {
                for token in sentence {
                    let key = token.to_lowercase();
                    let next = (index.len() + 2) as u32;
                    index.entry(key).or_insert(next);
                }
            }
        }
        Self { index }
    }

    /// The embedding row for a token; unknown tokens map to UNK.
    pub fn id(&self, token: &str) -> u32 {
        self.index
            .get(&token.to_lowercase())
            .copied()
            .unwrap_or(Self::UNK)
    }

    /// Embedding-table size, including the PAD and UNK rows.
    pub fn len(&self) -> usize {
        self.index.len() + 2
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Maps frame labels to class indices and back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameVocab {
    index: HashMap<String, usize>,
    names: Vec<String>,
}

impl FrameVocab {
    /// Collects every distinct gold frame label of the given corpora,
    /// in first-seen order.
    pub fn build(corpora: &[&Corpus]) -> Self {
        let mut vocab = Self::default();
        for corpus in corpora {
            for annotations in corpus.annotations() {
                for annotation in annotations {
                    if let Some(frame) = &annotation.frame {
                        if !vocab.index.contains_key(frame) {
                            vocab.index.insert(frame.clone(), vocab.names.len());
                            vocab.names.push(frame.clone());
                        }
                    }
                }
            }
        }
        vocab
    }

    /// Class index for a frame label, `None` for labels unseen at
    /// training time.
    pub fn id(&self, frame: &str) -> Option<usize> {
        self.index.get(frame).copied()
    }

    /// Frame label for a class index.
    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Number of frame classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ─── Unit Tests ──────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::annotation::{Annotation, CorpusKind};

    fn corpus() -> Corpus {
        let s0: Vec<String> = vec!["Cats".into(), "sleep".into()];
        let s1: Vec<String> = vec!["dogs".into(), "run".into()];
        Corpus::new(
            vec![s0.clone(), s1.clone()],
            vec![
                vec![Annotation::gold("Sleep", "sleep.v", 1, "sleep", s0)],
                vec![Annotation::gold("Motion", "run.v", 1, "run", s1)],
            ],
            CorpusKind::Gold,
        )
    }

    #[test]
    fn test_token_vocab_lookup_is_case_insensitive() {
        let c = corpus();
        let vocab = TokenVocab::build(&[&c]);
        assert_eq!(vocab.id("cats"), vocab.id("Cats"));
        assert!(vocab.id("cats") >= 2);
        assert_eq!(vocab.len(), 6);
    }

    #[test]
    fn test_unknown_token_maps_to_unk() {
        let c = corpus();
        let vocab = TokenVocab::build(&[&c]);
        assert_eq!(vocab.id("zebra"), TokenVocab::UNK);
    }

    #[test]
    fn test_frame_vocab_round_trips_labels() {
        let c = corpus();
        let vocab = FrameVocab::build(&[&c]);
        assert_eq!(vocab.len(), 2);
        let id = vocab.id("Motion").expect("known frame");
        assert_eq!(vocab.name(id), Some("Motion"));
        assert_eq!(vocab.id("Placing"), None);
    }

    #[test]
    fn test_vocabs_survive_json() {
        let c = corpus();
        let tokens = TokenVocab::build(&[&c]);
        let frames = FrameVocab::build(&[&c]);

        let tokens2: TokenVocab =
            serde_json::from_str(&serde_json::to_string(&tokens).unwrap()).unwrap();
        let frames2: FrameVocab =
            serde_json::from_str(&serde_json::to_string(&frames).unwrap()).unwrap();

        assert_eq!(tokens.id("sleep"), tokens2.id("sleep"));
        assert_eq!(frames.id("Sleep"), frames2.id("Sleep"));
    }
}
