// ============================================================
// Application Layer
// ============================================================
// Use cases orchestrating the lower layers. The CLI hands in a
// config struct; everything below here is clap-free.
//
//   train_use_case.rs    - corpus -> vocabularies -> training run
//   evaluate_use_case.rs - frame and FEE identification scoring

/// Training orchestration and its config
pub mod train_use_case;

/// Frame and FEE evaluation against gold annotation files
pub mod evaluate_use_case;
