// src/lib.rs
// =============================================================================
// url-sentinel: a resumable, concurrent URL checker for spreadsheets.
//
// Modules, leaf-first:
// - checker: one URL -> one Status (Prober trait, HttpProber)
// - checkpoint: durable {row -> status} snapshots and input fingerprints
// - engine: reconcile a checkpoint with fresh rows, then dispatch probes
// - table: CSV / spreadsheet input and output
// - config, error, logging, report: the plumbing around them
//
// The binary (src/main.rs) is a thin CLI on top of `engine::check_rows`.
// =============================================================================

pub mod checker;
pub mod checkpoint;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod report;
pub mod table;
