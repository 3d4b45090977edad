// ============================================================
// ML Layer (Burn)
// ============================================================
// All Burn-specific code lives here: the feature encoder and
// classifier network in model.rs, the training loop and gold-label
// accuracy evaluation in trainer.rs. Training runs on
// Autodiff<NdArray>; evaluation uses the plain NdArray backend for
// deterministic results.

/// Feature encoder and frame classifier network
pub mod model;

/// Training loop with per-epoch checkpointing and metrics
pub mod trainer;
