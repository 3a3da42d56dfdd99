// src/checkpoint/store.rs
// =============================================================================
// Durable storage for run progress.
//
// A checkpoint is a small JSON file next to the working directory:
//
//   <checkpoint_dir>/<input file name>.checkpoint.json
//
// It holds the {row index -> status} map computed so far plus the input's
// fingerprint. Operations:
// - save:   write to a temp file in the same directory, fsync, rename over the
//           target. A reader never sees a half-written checkpoint.
// - load:   missing file -> None; unreadable or corrupt file -> None (logged)
// - delete: remove the file; already gone is fine
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::Fingerprint;
use crate::checker::Status;
use crate::error::CheckpointError;

/// Bumped whenever the file layout changes; older files are ignored
pub const CHECKPOINT_VERSION: u32 = 1;

/// A checkpoint as read back from disk
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Checkpoint {
    pub version: u32,
    /// File name of the input this checkpoint was written for
    pub source: String,
    pub fingerprint: Fingerprint,
    pub statuses: BTreeMap<usize, Status>,
}

// Borrowed view used for writing, so a save doesn't clone the status map
#[derive(Serialize)]
struct CheckpointFile<'a> {
    version: u32,
    source: &'a str,
    fingerprint: &'a Fingerprint,
    statuses: &'a BTreeMap<usize, Status>,
}

#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
    source: String,
}

impl CheckpointStore {
    /// Store for the checkpoint belonging to `input`, kept in `dir`
    pub fn for_input(dir: &Path, input: &Path) -> Self {
        let source = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "input".to_string());
        Self {
            path: dir.join(format!("{}.checkpoint.json", source)),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically replaces the checkpoint with `statuses`
    pub fn save(
        &self,
        statuses: &BTreeMap<usize, Status>,
        fingerprint: &Fingerprint,
    ) -> Result<(), CheckpointError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let file = CheckpointFile {
            version: CHECKPOINT_VERSION,
            source: &self.source,
            fingerprint,
            statuses,
        };

        // The temp file must live in the same directory, otherwise the
        // rename could cross filesystems and stop being atomic
        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer(&mut writer, &file)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path)?;

        debug!(path = %self.path.display(), resolved = statuses.len(), "checkpoint saved");
        Ok(())
    }

    /// Reads the checkpoint, treating anything unusable as absent
    pub fn load(&self) -> Option<Checkpoint> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "could not read checkpoint, ignoring it"
                );
                return None;
            }
        };

        let checkpoint: Checkpoint = match serde_json::from_slice(&bytes) {
            Ok(checkpoint) => checkpoint,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt checkpoint, ignoring it");
                return None;
            }
        };

        if checkpoint.version != CHECKPOINT_VERSION {
            warn!(
                path = %self.path.display(),
                version = checkpoint.version,
                "checkpoint written by an incompatible version, ignoring it"
            );
            return None;
        }

        Some(checkpoint)
    }

    pub fn delete(&self) -> Result<(), CheckpointError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "checkpoint deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
