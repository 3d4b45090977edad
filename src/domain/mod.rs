// ============================================================
// Domain Layer
// ============================================================
// Pure types only: no Burn, no file I/O. The annotation/corpus data
// model, the error taxonomy, and the collaborator traits the rest of
// the pipeline is written against.

// The annotated-corpus data model
pub mod annotation;

// Typed pipeline failures
pub mod errors;

// Tokenizer and FEE-identifier seams
pub mod traits;
