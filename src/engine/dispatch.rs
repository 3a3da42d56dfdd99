// src/engine/dispatch.rs
// =============================================================================
// Drives the prober over every unresolved row with bounded concurrency.
//
// How it works:
// 1. Split rows into already-resolved (carried over) and pending
// 2. Feed pending rows through `buffer_unordered(concurrency)`: at most
//    `concurrency` probes are in flight, and as soon as one finishes the next
//    one starts. No batch ever waits for its slowest URL.
// 3. Results arrive in completion order and are recorded by index in a
//    single consumer loop (the only place the status map is mutated)
// 4. Every `checkpoint_interval` completions, and once at the end, the whole
//    {index -> status} map is written through the CheckpointStore
// 5. Rows are reassembled in input order
//
// A failed probe is just Status::Invalid. The only thing that aborts a run is
// a checkpoint that can't be written after CHECKPOINT_WRITE_ATTEMPTS tries.
// =============================================================================

use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::{Row, RunResult};
use crate::checker::{Prober, Status};
use crate::checkpoint::{CheckpointStore, Fingerprint};
use crate::config::RunConfig;
use crate::error::EngineError;

/// Consecutive failed checkpoint writes before the run is aborted
pub const CHECKPOINT_WRITE_ATTEMPTS: usize = 3;

/// Reported after every completed probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Probes finished so far in this run
    pub completed: usize,
    /// Probes this run has to issue in total
    pub total: usize,
}

type ProgressFn<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

pub struct Dispatcher<'a, P: Prober + ?Sized> {
    prober: &'a P,
    config: &'a RunConfig,
    checkpoint: Option<(&'a CheckpointStore, &'a Fingerprint)>,
    on_progress: Option<ProgressFn<'a>>,
}

impl<'a, P: Prober + ?Sized> Dispatcher<'a, P> {
    pub fn new(prober: &'a P, config: &'a RunConfig) -> Self {
        Self {
            prober,
            config,
            checkpoint: None,
            on_progress: None,
        }
    }

    /// Persist progress to `store` while running. Without this the run keeps
    /// everything in memory only.
    pub fn with_checkpoints(
        mut self,
        store: &'a CheckpointStore,
        fingerprint: &'a Fingerprint,
    ) -> Self {
        self.checkpoint = Some((store, fingerprint));
        self
    }

    pub fn on_progress(mut self, callback: impl Fn(Progress) + Send + Sync + 'a) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Resolves every row whose status is None and returns all rows in
    /// input order
    pub async fn run(&self, rows: Vec<Row>) -> Result<RunResult, EngineError> {
        // A zero interval would divide by zero and zero concurrency never
        // starts a probe
        self.config.validate()?;

        let mut resolved: BTreeMap<usize, Status> = rows
            .iter()
            .filter_map(|row| row.status.clone().map(|status| (row.index, status)))
            .collect();

        let pending: Vec<(usize, String)> = rows
            .iter()
            .filter(|row| !row.is_resolved())
            .map(|row| (row.index, row.url.clone()))
            .collect();

        let total = pending.len();
        if total == 0 {
            debug!(rows = rows.len(), "nothing to check");
            return Ok(assemble(rows, resolved, 0));
        }

        info!(
            rows = rows.len(),
            pending = total,
            concurrency = self.config.concurrency,
            "starting probes"
        );

        let prober = self.prober;
        let timeout = self.config.timeout;
        let interval = self.config.checkpoint_interval;

        let mut completions = stream::iter(pending)
            .map(move |(index, url)| async move {
                let status = prober.probe(&url, timeout).await;
                (index, url, status)
            })
            .buffer_unordered(self.config.concurrency);

        let mut completed = 0;
        while let Some((index, url, status)) = completions.next().await {
            debug!(index, %url, %status, "probe finished");
            resolved.insert(index, status);
            completed += 1;

            if let Some(callback) = &self.on_progress {
                callback(Progress { completed, total });
            }

            if completed % interval == 0 || completed == total {
                self.save_checkpoint(&resolved)?;
            }
        }

        Ok(assemble(rows, resolved, total))
    }

    fn save_checkpoint(&self, resolved: &BTreeMap<usize, Status>) -> Result<(), EngineError> {
        let Some((store, fingerprint)) = self.checkpoint else {
            return Ok(());
        };

        let mut attempt = 1;
        loop {
            match store.save(resolved, fingerprint) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < CHECKPOINT_WRITE_ATTEMPTS => {
                    warn!(attempt, error = %e, "checkpoint write failed, retrying");
                    attempt += 1;
                }
                Err(source) => {
                    return Err(EngineError::Checkpoint {
                        attempts: attempt,
                        source,
                    })
                }
            }
        }
    }
}

// Writes results back onto their rows and restores input order
fn assemble(
    rows: Vec<Row>,
    mut resolved: BTreeMap<usize, Status>,
    probes_issued: usize,
) -> RunResult {
    let mut rows: Vec<Row> = rows
        .into_iter()
        .map(|mut row| {
            if row.status.is_none() {
                row.status = resolved.remove(&row.index);
            }
            row
        })
        .collect();
    rows.sort_by_key(|row| row.index);

    let complete = rows.iter().all(Row::is_resolved);
    RunResult {
        rows,
        probes_issued,
        complete,
    }
}
