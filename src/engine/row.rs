// src/engine/row.rs
// =============================================================================
// One unit of work: a URL at a fixed position in the input, and its result.
// =============================================================================

use serde::Serialize;

use crate::checker::Status;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// 0-based position among the input's data rows; the join key for
    /// checkpoints and for restoring order
    pub index: usize,
    pub url: String,
    /// None until resolved, then never reassigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl Row {
    pub fn pending(index: usize, url: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
            status: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status.is_some()
    }
}

/// Everything a run hands back. Owned by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// All rows, in input order
    pub rows: Vec<Row>,
    /// Number of probes this run actually issued
    pub probes_issued: usize,
    /// True when every row has a status
    pub complete: bool,
}
