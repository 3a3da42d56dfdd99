// src/checkpoint/mod.rs
// =============================================================================
// Durable progress for resumable runs.
//
// Submodules:
// - fingerprint: identity of an input (row count + URL column digest)
// - store: atomic save / tolerant load / idempotent delete of the JSON file
// =============================================================================

mod fingerprint;
mod store;

pub use fingerprint::Fingerprint;
pub use store::{Checkpoint, CheckpointStore, CHECKPOINT_VERSION};
