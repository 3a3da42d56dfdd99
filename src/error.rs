// src/error.rs
// =============================================================================
// Typed errors for the engine.
//
// The binary uses anyhow on top of these, but the library keeps them typed so
// a caller can tell "fix your input file" apart from "the disk is full".
//
// Note what is NOT here: a failed probe. That's Status::Invalid, i.e. data.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the supplied input file. The run never starts.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("unsupported file type for {0} (expected .csv, .xlsx, .xlsm, .xls or .ods)")]
    UnsupportedFormat(PathBuf),

    #[error("input must contain a column named 'URL'")]
    MissingUrlColumn,

    #[error("input has no data rows")]
    Empty,
}

/// Durable checkpoint I/O failures
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("checkpoint encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not move checkpoint into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Invalid run parameters
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("concurrency must be between {min} and {max}, got {value}")]
    Concurrency { value: usize, min: usize, max: usize },

    #[error("checkpoint interval must be at least 1")]
    CheckpointInterval,

    #[error("timeout must be greater than zero")]
    Timeout,
}

/// Anything that stops a run
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("checkpoint could not be written after {attempts} attempts: {source}")]
    Checkpoint {
        attempts: usize,
        #[source]
        source: CheckpointError,
    },
}

/// Failures rendering the result table to bytes
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("export failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("table too large for the output format ({rows} rows, {columns} columns)")]
    TooLarge { rows: usize, columns: usize },

    #[error("cannot write {0}: output must be .csv or .xlsx")]
    UnsupportedOutput(PathBuf),
}
