// ============================================================
// Domain - Annotation and Corpus
// ============================================================
// One Annotation is a single labeled (or predicted) frame-evocation
// event: the frame, the trigger word that evokes it, and the sentence
// it occurred in. A Corpus is an ordered collection of sentences, each
// paired by index with zero or more Annotations.

use serde::{Deserialize, Serialize};

use crate::domain::traits::FeeIdentifier;

/// One frame-evocation event.
///
/// Gold annotations carry `Some(frame)`; annotations produced by FEE
/// prediction leave `frame` as `None` until a classifier fills it in.
/// Immutable once constructed: consumers read fields, never write back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// The evoked frame, e.g. "Motion". `None` for bare FEE predictions.
    pub frame: Option<String>,

    /// Lemmatized form of the frame-evoking element, e.g. "run.v".
    pub lemma: Option<String>,

    /// Token index of the trigger within `sentence`.
    pub position: Option<usize>,

    /// The trigger's raw surface form as it appeared in the text.
    pub surface: Option<String>,

    /// The full tokenized sentence this annotation belongs to.
    pub sentence: Vec<String>,
}

impl Annotation {
    /// A gold annotation parsed from an annotation file.
    pub fn gold(
        frame: impl Into<String>,
        lemma: impl Into<String>,
        position: usize,
        surface: impl Into<String>,
        sentence: Vec<String>,
    ) -> Self {
        Self {
            frame: Some(frame.into()),
            lemma: Some(lemma.into()),
            position: Some(position),
            surface: Some(surface.into()),
            sentence,
        }
    }

    /// A predicted frame-evoking element with the frame still unset.
    pub fn predicted(surface: impl Into<String>, sentence: Vec<String>) -> Self {
        Self {
            frame: None,
            lemma: None,
            position: None,
            surface: Some(surface.into()),
            sentence,
        }
    }
}

/// Distinguishes how a corpus's annotation lists came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorpusKind {
    /// Annotations parsed from a gold annotation file.
    Gold,
    /// Annotations produced by FEE prediction, frames unset.
    Predicted,
    /// Raw text ingestion, no annotations at all.
    Raw,
}

/// An ordered collection of tokenized sentences with per-sentence
/// annotation lists.
///
/// Invariant: `sentences.len() == annotations.len()` and annotation
/// list `i` pairs with sentence `i`. Both loaders and `predict_fees`
/// uphold this; the encoder and evaluators rely on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpus {
    sentences: Vec<Vec<String>>,
    annotations: Vec<Vec<Annotation>>,
    kind: CorpusKind,
}

impl Corpus {
    pub fn new(
        sentences: Vec<Vec<String>>,
        annotations: Vec<Vec<Annotation>>,
        kind: CorpusKind,
    ) -> Self {
        debug_assert_eq!(sentences.len(), annotations.len());
        Self { sentences, annotations, kind }
    }

    pub fn sentences(&self) -> &[Vec<String>] {
        &self.sentences
    }

    pub fn annotations(&self) -> &[Vec<Annotation>] {
        &self.annotations
    }

    pub fn kind(&self) -> CorpusKind {
        self.kind
    }

    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Total number of annotations across all sentences.
    pub fn annotation_count(&self) -> usize {
        self.annotations.iter().map(Vec::len).sum()
    }

    /// Runs the FEE identifier over every sentence and returns a new
    /// predicted view of this corpus: one unset-frame annotation per
    /// candidate trigger surface form.
    ///
    /// The gold view is left untouched, so callers can score predicted
    /// triggers against it afterwards.
    pub fn predict_fees(&self, fee: &dyn FeeIdentifier) -> Corpus {
        let annotations = self
            .sentences
            .iter()
            .map(|sentence| {
                fee.query(sentence)
                    .into_iter()
                    .map(|surface| Annotation::predicted(surface, sentence.clone()))
                    .collect()
            })
            .collect();

        Corpus {
            sentences: self.sentences.clone(),
            annotations,
            kind: CorpusKind::Predicted,
        }
    }
}

// ─── Unit Tests ──────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    struct FixedFees(Vec<String>);

    impl FeeIdentifier for FixedFees {
        fn query(&self, _sentence: &[String]) -> Vec<String> {
            self.0.clone()
        }
    }

    fn tokens(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_predict_fees_returns_unset_frames() {
        let sentence = tokens("cats sleep");
        let gold = Annotation::gold("Sleep", "sleep.v", 1, "sleep", sentence.clone());
        let corpus = Corpus::new(
            vec![sentence],
            vec![vec![gold]],
            CorpusKind::Gold,
        );

        let predicted = corpus.predict_fees(&FixedFees(vec!["sleep".into(), "cats".into()]));

        assert_eq!(predicted.kind(), CorpusKind::Predicted);
        assert_eq!(predicted.len(), corpus.len());
        assert_eq!(predicted.annotation_count(), 2);
        for anns in predicted.annotations() {
            for ann in anns {
                assert!(ann.frame.is_none());
                assert!(ann.surface.is_some());
            }
        }
    }

    #[test]
    fn test_predict_fees_leaves_gold_view_intact() {
        let sentence = tokens("dogs run");
        let corpus = Corpus::new(
            vec![sentence.clone()],
            vec![vec![Annotation::gold("Motion", "run.v", 1, "run", sentence)]],
            CorpusKind::Gold,
        );

        let _predicted = corpus.predict_fees(&FixedFees(vec![]));

        assert_eq!(corpus.kind(), CorpusKind::Gold);
        assert_eq!(corpus.annotation_count(), 1);
        assert_eq!(corpus.annotations()[0][0].frame.as_deref(), Some("Motion"));
    }

    #[test]
    fn test_annotations_pair_with_sentences_by_index() {
        let s0 = tokens("cats sleep");
        let s1 = tokens("dogs run");
        let corpus = Corpus::new(
            vec![s0.clone(), s1.clone()],
            vec![
                vec![Annotation::gold("Sleep", "sleep.v", 1, "sleep", s0.clone())],
                vec![Annotation::gold("Motion", "run.v", 1, "run", s1.clone())],
            ],
            CorpusKind::Gold,
        );

        for (i, anns) in corpus.annotations().iter().enumerate() {
            for ann in anns {
                assert_eq!(ann.sentence, corpus.sentences()[i]);
            }
        }
    }
}
