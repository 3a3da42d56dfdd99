// src/engine/mod.rs
// =============================================================================
// The resumable batch-checking engine.
//
// Submodules:
// - row: Row and RunResult
// - reconcile: merge a saved checkpoint into fresh rows (or discard it)
// - dispatch: bounded-concurrency probing with periodic checkpoints
//
// `check_rows` is the one-call entry point used by the CLI:
//
//   rows --> resume (load + reconcile) --> Dispatcher::run --> delete checkpoint
//
// The checkpoint is only deleted once the dispatcher reports every row
// resolved. Anything short of that leaves it on disk for the next run.
// =============================================================================

mod dispatch;
mod reconcile;
mod row;

#[cfg(test)]
mod testing;

pub use dispatch::{Dispatcher, Progress, CHECKPOINT_WRITE_ATTEMPTS};
pub use reconcile::{reconcile, resume, ReconcileOutcome, Reconciliation};
pub use row::{Row, RunResult};

use tracing::warn;

use crate::checker::Prober;
use crate::checkpoint::{CheckpointStore, Fingerprint};
use crate::config::RunConfig;
use crate::error::{EngineError, InputError};

/// Result of `check_rows`: the finished rows plus what happened to any
/// checkpoint found at start-up
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub result: RunResult,
    pub reconcile: ReconcileOutcome,
}

/// Checks every unresolved row, resuming from `store` when allowed.
pub async fn check_rows<P, F>(
    rows: Vec<Row>,
    prober: &P,
    config: &RunConfig,
    store: &CheckpointStore,
    on_progress: F,
) -> Result<CheckOutcome, EngineError>
where
    P: Prober + ?Sized,
    F: Fn(Progress) + Send + Sync,
{
    config.validate()?;
    if rows.is_empty() {
        return Err(InputError::Empty.into());
    }

    let fingerprint = Fingerprint::from_urls(rows.iter().map(|row| row.url.as_str()));
    let Reconciliation { rows, outcome } = resume(store, rows, &fingerprint, config.resume);

    let mut dispatcher = Dispatcher::new(prober, config).on_progress(on_progress);
    if config.resume {
        dispatcher = dispatcher.with_checkpoints(store, &fingerprint);
    }
    let result = dispatcher.run(rows).await?;

    if result.complete && config.resume {
        if let Err(e) = store.delete() {
            warn!(
                path = %store.path().display(),
                error = %e,
                "run finished but checkpoint could not be deleted"
            );
        }
    }

    Ok(CheckOutcome {
        result,
        reconcile: outcome,
    })
}
