// ============================================================
// Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   checkpoint.rs - model parameter blob plus the config and
//                   vocabulary JSON files needed to rebuild it
//   metrics.rs    - precision/recall/F1 math and the per-epoch
//                   training metrics CSV

/// Model checkpoint saving and loading
pub mod checkpoint;

/// calc_f scoring and the epoch metrics CSV logger
pub mod metrics;
