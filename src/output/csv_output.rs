//! Progress CSV persistence
//!
//! Each snapshot rewrites the whole file: a `url,status` header followed by one row per
//! URL with a recorded HTTP status. Pending and unreachable URLs are left out.
//!
//! Writes happen on a single worker task fed over a channel, so the traversal loop only
//! hands over an owned copy of the registry and never waits on the disk until shutdown.
//! Snapshots that queue up behind a slow write are superseded by the newest one.

use crate::state::UrlStatus;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// An owned copy of the visited registry
pub type Snapshot = Vec<(String, UrlStatus)>;

/// Errors that can occur while persisting progress
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Cannot open output file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV: {0}")]
    Write(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Persistence task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Persistence worker stopped unexpectedly")]
    WorkerGone,
}

/// Writes a snapshot to `path`, replacing any previous content
///
/// # Returns
///
/// * `Ok(usize)` - Number of data rows written
/// * `Err(PersistError)` - The file could not be created or written
pub fn write_snapshot(path: &Path, snapshot: &[(String, UrlStatus)]) -> Result<usize, PersistError> {
    let file = File::create(path).map_err(|source| PersistError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(["url", "status"])?;

    let mut rows = 0;
    for (url, status) in snapshot.iter().filter(|(_, status)| status.is_fetched()) {
        let code = status.code().to_string();
        writer.write_record([url.as_str(), code.as_str()])?;
        rows += 1;
    }

    writer.flush()?;
    Ok(rows)
}

/// Handle to the persistence worker
///
/// Snapshots are written in the order they are submitted, except that a snapshot still
/// queued when a newer one arrives is dropped unwritten. [`ProgressPersister::finish`]
/// must be awaited before exit so the last snapshot is fully on disk.
pub struct ProgressPersister {
    sender: UnboundedSender<Snapshot>,
    worker: JoinHandle<Result<u64, PersistError>>,
}

impl ProgressPersister {
    /// Spawns the worker that writes snapshots to `path`
    pub fn spawn(path: PathBuf) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(path, receiver));
        Self { sender, worker }
    }

    /// Queues a snapshot for writing without waiting for it
    ///
    /// Fails only if the worker has already stopped after an error; call
    /// [`ProgressPersister::finish`] to retrieve that error.
    pub fn submit(&self, snapshot: Snapshot) -> Result<(), PersistError> {
        self.sender
            .send(snapshot)
            .map_err(|_| PersistError::WorkerGone)
    }

    /// Waits until every queued snapshot has been written
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of file writes performed
    /// * `Err(PersistError)` - The first write error; later snapshots were not written
    pub async fn finish(self) -> Result<u64, PersistError> {
        drop(self.sender);
        self.worker.await?
    }
}

async fn run_worker(
    path: PathBuf,
    mut receiver: UnboundedReceiver<Snapshot>,
) -> Result<u64, PersistError> {
    let mut written = 0;

    while let Some(mut snapshot) = receiver.recv().await {
        let mut skipped = 0;
        while let Ok(newer) = receiver.try_recv() {
            snapshot = newer;
            skipped += 1;
        }
        if skipped > 0 {
            tracing::debug!("Skipped {} stale snapshots", skipped);
        }

        let target = path.clone();
        let rows = tokio::task::spawn_blocking(move || write_snapshot(&target, &snapshot))
            .await?
            .map_err(|e| {
                tracing::error!("Failed to persist progress to {}: {}", path.display(), e);
                e
            })?;

        written += 1;
        tracing::debug!("Persisted {} rows to {}", rows, path.display());
    }

    Ok(written)
}
