// src/engine/reconcile.rs
// =============================================================================
// Merges a previously saved checkpoint into freshly loaded rows.
//
// A checkpoint is only applied when it was written for the same input: same
// row count AND same URL column digest. When it applies, its statuses fill in
// rows that are still unresolved; rows that already carry a status (from the
// input's own Status column) keep it.
//
// `reconcile` is the pure decision. `resume` wraps it with the store: load,
// decide, and drop a checkpoint that doesn't belong to this input.
// =============================================================================

use tracing::{info, warn};

use super::Row;
use crate::checkpoint::{Checkpoint, CheckpointStore, Fingerprint};

/// What happened to the checkpoint during start-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No checkpoint existed (or resume was off)
    Fresh,
    /// A compatible checkpoint filled in `restored` rows
    Resumed { restored: usize },
    /// A checkpoint existed but was for different input
    Discarded { reason: String },
}

#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub rows: Vec<Row>,
    pub outcome: ReconcileOutcome,
}

pub fn reconcile(
    mut rows: Vec<Row>,
    checkpoint: Option<&Checkpoint>,
    fingerprint: &Fingerprint,
) -> Reconciliation {
    let checkpoint = match checkpoint {
        Some(checkpoint) => checkpoint,
        None => {
            return Reconciliation {
                rows,
                outcome: ReconcileOutcome::Fresh,
            }
        }
    };

    // The fingerprint must describe these rows, or the comparison is moot
    debug_assert_eq!(fingerprint.row_count, rows.len());

    if let Some(reason) = fingerprint.mismatch(&checkpoint.fingerprint) {
        return Reconciliation {
            rows,
            outcome: ReconcileOutcome::Discarded { reason },
        };
    }

    let mut restored = 0;
    for row in rows.iter_mut().filter(|row| row.status.is_none()) {
        if let Some(status) = checkpoint.statuses.get(&row.index) {
            row.status = Some(status.clone());
            restored += 1;
        }
    }

    Reconciliation {
        rows,
        outcome: ReconcileOutcome::Resumed { restored },
    }
}

/// Loads the store's checkpoint and reconciles it with `rows`.
///
/// With `enabled == false` any leftover checkpoint is removed and the rows
/// pass through untouched.
pub fn resume(
    store: &CheckpointStore,
    rows: Vec<Row>,
    fingerprint: &Fingerprint,
    enabled: bool,
) -> Reconciliation {
    if !enabled {
        discard(store);
        return Reconciliation {
            rows,
            outcome: ReconcileOutcome::Fresh,
        };
    }

    let checkpoint = store.load();
    let reconciliation = reconcile(rows, checkpoint.as_ref(), fingerprint);

    match &reconciliation.outcome {
        ReconcileOutcome::Fresh => {}
        ReconcileOutcome::Resumed { restored } => {
            info!(path = %store.path().display(), restored, "resuming from checkpoint");
        }
        ReconcileOutcome::Discarded { reason } => {
            info!(path = %store.path().display(), %reason, "discarding stale checkpoint");
            discard(store);
        }
    }

    reconciliation
}

// Failing to remove a stale file isn't worth stopping for; the next save
// overwrites it anyway
fn discard(store: &CheckpointStore) {
    if let Err(e) = store.delete() {
        warn!(path = %store.path().display(), error = %e, "could not delete checkpoint");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Status;
    use crate::checkpoint::CHECKPOINT_VERSION;
    use std::collections::BTreeMap;
    use std::path::Path;
    use tempfile::tempdir;

    fn rows(urls: &[&str]) -> Vec<Row> {
        urls.iter()
            .enumerate()
            .map(|(i, url)| Row::pending(i, *url))
            .collect()
    }

    fn fingerprint_of(rows: &[Row]) -> Fingerprint {
        Fingerprint::from_urls(rows.iter().map(|row| row.url.as_str()))
    }

    fn checkpoint_for(rows: &[Row], statuses: &[(usize, Status)]) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            source: "urls.csv".to_string(),
            fingerprint: fingerprint_of(rows),
            statuses: statuses.iter().cloned().collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_no_checkpoint_passes_through() {
        let fresh = rows(&["a", "b"]);
        let fingerprint = fingerprint_of(&fresh);

        let result = reconcile(fresh.clone(), None, &fingerprint);

        assert_eq!(result.outcome, ReconcileOutcome::Fresh);
        assert_eq!(result.rows, fresh);
    }

    #[test]
    fn test_compatible_checkpoint_is_applied() {
        let fresh = rows(&["a", "b", "c"]);
        let fingerprint = fingerprint_of(&fresh);
        let checkpoint =
            checkpoint_for(&fresh, &[(0, Status::Valid), (2, Status::ErrorCode(404))]);

        let result = reconcile(fresh, Some(&checkpoint), &fingerprint);

        assert_eq!(result.outcome, ReconcileOutcome::Resumed { restored: 2 });
        assert_eq!(result.rows[0].status, Some(Status::Valid));
        assert_eq!(result.rows[1].status, None);
        assert_eq!(result.rows[2].status, Some(Status::ErrorCode(404)));
    }

    #[test]
    fn test_row_count_mismatch_is_never_applied() {
        let old = rows(&["a", "b", "c"]);
        let checkpoint = checkpoint_for(&old, &[(0, Status::Valid)]);
        let fresh = rows(&["a", "b"]);
        let fingerprint = fingerprint_of(&fresh);

        let result = reconcile(fresh, Some(&checkpoint), &fingerprint);

        assert!(matches!(result.outcome, ReconcileOutcome::Discarded { .. }));
        assert!(result.rows.iter().all(|row| row.status.is_none()));
    }

    #[test]
    fn test_same_count_different_urls_is_never_applied() {
        let old = rows(&["a", "b"]);
        let checkpoint = checkpoint_for(&old, &[(0, Status::Valid), (1, Status::Valid)]);
        let fresh = rows(&["x", "y"]);
        let fingerprint = fingerprint_of(&fresh);

        let result = reconcile(fresh, Some(&checkpoint), &fingerprint);

        assert!(matches!(result.outcome, ReconcileOutcome::Discarded { .. }));
        assert!(result.rows.iter().all(|row| row.status.is_none()));
    }

    #[test]
    fn test_existing_status_is_not_overwritten() {
        let mut fresh = rows(&["a", "b"]);
        fresh[0].status = Some(Status::ErrorCode(500));
        let fingerprint = fingerprint_of(&fresh);
        let checkpoint = checkpoint_for(&fresh, &[(0, Status::Valid), (1, Status::Valid)]);

        let result = reconcile(fresh, Some(&checkpoint), &fingerprint);

        assert_eq!(result.outcome, ReconcileOutcome::Resumed { restored: 1 });
        assert_eq!(result.rows[0].status, Some(Status::ErrorCode(500)));
        assert_eq!(result.rows[1].status, Some(Status::Valid));
    }

    #[test]
    fn test_resume_deletes_stale_checkpoint() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::for_input(dir.path(), Path::new("urls.csv"));
        let old = rows(&["a", "b", "c"]);
        let mut statuses = BTreeMap::new();
        statuses.insert(0, Status::Valid);
        store.save(&statuses, &fingerprint_of(&old)).unwrap();

        let fresh = rows(&["a"]);
        let fingerprint = fingerprint_of(&fresh);
        let result = resume(&store, fresh, &fingerprint, true);

        assert!(matches!(result.outcome, ReconcileOutcome::Discarded { .. }));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_resume_disabled_ignores_and_removes_checkpoint() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::for_input(dir.path(), Path::new("urls.csv"));
        let fresh = rows(&["a", "b"]);
        let fingerprint = fingerprint_of(&fresh);
        let mut statuses = BTreeMap::new();
        statuses.insert(0, Status::Valid);
        store.save(&statuses, &fingerprint).unwrap();

        let result = resume(&store, fresh, &fingerprint, false);

        assert_eq!(result.outcome, ReconcileOutcome::Fresh);
        assert!(result.rows.iter().all(|row| row.status.is_none()));
        assert!(!store.path().exists());
    }
}
