// ============================================================
// Domain - Error Taxonomy
// ============================================================
// Typed failures for the corpus/training pipeline. Data-loading
// errors fail fast and surface to the caller uncaught; there is no
// silent defaulting once a load has begun.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    /// A required input path was never provided.
    #[error("no input file available: {0}")]
    MissingInput(String),

    /// A corpus file was unreadable or its content violates the
    /// sentence/annotation format.
    #[error("malformed corpus: {0}")]
    MalformedCorpus(String),

    /// A training or evaluation batch whose label count disagrees
    /// with its sentence count.
    #[error("batch shape mismatch: {sentences} sentences but {labels} labels")]
    BatchShape { sentences: usize, labels: usize },

    /// Attempted to load a checkpoint that does not exist.
    #[error("no saved model found at '{0}'")]
    ModelNotFound(String),
}
