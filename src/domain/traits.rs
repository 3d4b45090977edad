// ============================================================
// Domain - Collaborator Traits
// ============================================================
// Seams for the two rule-based collaborators the corpus layer
// consumes. The pipeline only ever talks to these traits, so the
// default implementations in `data/` can be swapped out (e.g. for a
// statistical FEE model) without touching the readers or evaluators.

/// Segments raw text into tokenized sentences.
pub trait SentenceTokenizer {
    fn tokenize(&self, raw: &str) -> Vec<Vec<String>>;
}

/// Proposes candidate frame-evoking elements for one sentence.
///
/// Returns the candidates' raw surface forms; how they are chosen is
/// the implementation's business.
pub trait FeeIdentifier {
    fn query(&self, sentence: &[String]) -> Vec<String>;
}
