// ============================================================
// Data Layer
// ============================================================
// Everything between corpus files on disk and tensor batches:
//
//   corpus files ──► CorpusReader ──► Corpus
//   raw text     ──► RuleTokenizer ─┘
//   Corpus ──► vocab (token + frame) ──► FrameSample
//   FrameSample ──► FrameDataset ──► FrameBatcher ──► DataLoader
//
// The StaticFeeIdentifier lives here too: it is the default
// implementation behind the domain's FeeIdentifier seam.

/// Paired sentence/annotation file parsing and raw-text ingestion
pub mod reader;

/// Default rule-based sentence/word tokenizer
pub mod tokenizer;

/// Static heuristic FEE candidate generator
pub mod fee;

/// Token and frame-label vocabularies
pub mod vocab;

/// Classifier samples and Burn's Dataset impl
pub mod dataset;

/// Burn's Batcher impl producing padded tensor batches
pub mod batcher;
