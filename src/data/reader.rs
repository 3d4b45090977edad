// ============================================================
// Data - Corpus Reader
// ============================================================
// Parses the paired corpus files into a Corpus:
//
//   *.sentences  - one whitespace-tokenized sentence per line
//   *.elements   - one tab-separated annotation record per line;
//                  fields 3..=7 are frame, trigger lemma, trigger
//                  position, trigger surface form, sentence index
//
// Also ingests raw text through an injected SentenceTokenizer for
// prediction on unlabeled documents.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::annotation::{Annotation, Corpus, CorpusKind};
use crate::domain::errors::FrameError;
use crate::domain::traits::SentenceTokenizer;

/// Reads corpus files from paths fixed at construction.
///
/// Each successful read yields a fresh `Corpus`; the reader itself
/// holds no corpus state, so re-reading always replaces rather than
/// appends.
#[derive(Debug, Default)]
pub struct CorpusReader {
    sentence_path: Option<PathBuf>,
    annotation_path: Option<PathBuf>,
    raw_path: Option<PathBuf>,
}

impl CorpusReader {
    /// A reader for a gold sentence/annotation file pair.
    pub fn with_paths(sentence_path: impl Into<PathBuf>, annotation_path: impl Into<PathBuf>) -> Self {
        Self {
            sentence_path: Some(sentence_path.into()),
            annotation_path: Some(annotation_path.into()),
            raw_path: None,
        }
    }

    /// A reader for a raw, unannotated text file.
    pub fn with_raw_path(raw_path: impl Into<PathBuf>) -> Self {
        Self {
            sentence_path: None,
            annotation_path: None,
            raw_path: Some(raw_path.into()),
        }
    }

    /// Reads the sentence and annotation files into a gold corpus.
    ///
    /// Trailing blank lines are trimmed before parsing. Sentence
    /// indices in the annotation stream must be monotonically
    /// non-decreasing and within range; anything else is a
    /// `MalformedCorpus` error, never silently dropped.
    pub fn read_data(&self) -> Result<Corpus, FrameError> {
        let sentence_path = self
            .sentence_path
            .as_deref()
            .ok_or_else(|| FrameError::MissingInput("sentence file".into()))?;
        let annotation_path = self
            .annotation_path
            .as_deref()
            .ok_or_else(|| FrameError::MissingInput("annotation file".into()))?;

        let sentence_lines = read_lines(sentence_path)?;
        let annotation_lines = read_lines(annotation_path)?;

        let sentences: Vec<Vec<String>> = sentence_lines
            .iter()
            .map(|line| line.split_whitespace().map(str::to_string).collect())
            .collect();

        let annotations = digest_records(&annotation_lines, &sentences)?;

        tracing::info!(
            "Read corpus: {} sentences, {} annotations",
            sentences.len(),
            annotations.iter().map(Vec::len).sum::<usize>(),
        );

        Ok(Corpus::new(sentences, annotations, CorpusKind::Gold))
    }

    /// Reads free text and segments it with the injected tokenizer,
    /// yielding an unannotated corpus.
    pub fn read_raw_text(&self, tokenizer: &dyn SentenceTokenizer) -> Result<Corpus, FrameError> {
        let raw_path = self
            .raw_path
            .as_deref()
            .ok_or_else(|| FrameError::MissingInput("raw text file".into()))?;

        let raw = fs::read_to_string(raw_path).map_err(|e| {
            FrameError::MalformedCorpus(format!("cannot read '{}': {e}", raw_path.display()))
        })?;

        let sentences = tokenizer.tokenize(&raw);
        let annotations = vec![Vec::new(); sentences.len()];

        tracing::info!("Read raw text: {} sentences", sentences.len());

        Ok(Corpus::new(sentences, annotations, CorpusKind::Raw))
    }
}

/// Reads a file into lines, trimming a single trailing blank line.
fn read_lines(path: &Path) -> Result<Vec<String>, FrameError> {
    let text = fs::read_to_string(path).map_err(|e| {
        FrameError::MalformedCorpus(format!("cannot read '{}': {e}", path.display()))
    })?;

    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }

    Ok(lines)
}

/// Builds the per-sentence annotation lists from raw tab-separated
/// records, enforcing the sentence-index invariants.
fn digest_records(
    records: &[String],
    sentences: &[Vec<String>],
) -> Result<Vec<Vec<Annotation>>, FrameError> {
    let mut annotations: Vec<Vec<Annotation>> = vec![Vec::new(); sentences.len()];
    let mut last_index = 0usize;

    for (line_no, record) in records.iter().enumerate() {
        let fields: Vec<&str> = record.split('\t').collect();
        if fields.len() < 8 {
            return Err(FrameError::MalformedCorpus(format!(
                "record {} has {} fields, expected at least 8",
                line_no + 1,
                fields.len(),
            )));
        }

        let frame = fields[3];
        let lemma = fields[4];
        let position = parse_position(fields[5], line_no)?;
        let surface = fields[6];
        let sentence_index = fields[7].parse::<usize>().map_err(|_| {
            FrameError::MalformedCorpus(format!(
                "record {}: invalid sentence index '{}'",
                line_no + 1,
                fields[7],
            ))
        })?;

        if sentence_index >= sentences.len() {
            return Err(FrameError::MalformedCorpus(format!(
                "record {}: sentence index {} out of range ({} sentences)",
                line_no + 1,
                sentence_index,
                sentences.len(),
            )));
        }
        if sentence_index < last_index {
            return Err(FrameError::MalformedCorpus(format!(
                "record {}: sentence index {} decreases after {}",
                line_no + 1,
                sentence_index,
                last_index,
            )));
        }
        last_index = sentence_index;

        let sentence = &sentences[sentence_index];
        if position >= sentence.len() {
            return Err(FrameError::MalformedCorpus(format!(
                "record {}: trigger position {} out of range for a {}-token sentence",
                line_no + 1,
                position,
                sentence.len(),
            )));
        }

        annotations[sentence_index].push(Annotation::gold(
            frame,
            lemma,
            position,
            surface,
            sentence.clone(),
        ));
    }

    Ok(annotations)
}

/// Trigger positions may span multiple tokens ("13_14"); the data
/// model addresses the first one.
fn parse_position(field: &str, line_no: usize) -> Result<usize, FrameError> {
    field
        .split('_')
        .next()
        .and_then(|first| first.parse::<usize>().ok())
        .ok_or_else(|| {
            FrameError::MalformedCorpus(format!(
                "record {}: invalid trigger position '{field}'",
                line_no + 1,
            ))
        })
}
