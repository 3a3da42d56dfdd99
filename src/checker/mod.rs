// src/checker/mod.rs
// =============================================================================
// This module contains everything about checking a single URL.
//
// Submodules:
// - status: The result type (Valid / Error <code> / Invalid (<reason>))
// - probe: The Prober trait and the reqwest-backed HttpProber
//
// Batch checking (concurrency, checkpoints, resume) lives in `engine`; this
// module knows nothing about rows or files.
// =============================================================================

mod probe;
mod status;

pub use probe::{HttpProber, Prober, DEFAULT_TIMEOUT};
pub use status::{ParseStatusError, Status};
