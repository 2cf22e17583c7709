// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model, training and evaluation code lives here.
//
//   model.rs     : Embedding → LSTM → mean pool → linear classifier
//                  plus its loss and accuracy
//
//   trainer.rs   : One epoch of shuffled, fixed-stride mini-batch
//                  Adam updates; `fit` runs epochs then evaluates
//
//   evaluator.rs : Forward-only pass over the test split averaging
//                  loss and accuracy per batch
//
// Backends: CPU (ndarray) by default, GPU (wgpu) with
// `--features wgpu`. Training wraps the backend in Autodiff.

/// Sentiment classifier architecture
pub mod model;

/// Training loop
pub mod trainer;

/// Test-split evaluation
pub mod evaluator;

#[cfg(not(feature = "wgpu"))]
pub type InnerBackend = burn::backend::NdArray;
#[cfg(feature = "wgpu")]
pub type InnerBackend = burn::backend::Wgpu;

/// Backend used for training (records gradients)
pub type TrainBackend = burn::backend::Autodiff<InnerBackend>;

pub fn default_device() -> <InnerBackend as burn::prelude::Backend>::Device {
    Default::default()
}
