//! Log Store
//!
//! Append-only JSONL file. Every append opens the file, writes one whole
//! line, flushes and syncs it while holding the store lock, so concurrent
//! appends never interleave. A failed append is truncated back to the
//! length the file had before it started.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, error, info};

use crate::error::{ConfigError, StorageError};

#[derive(Clone, Debug)]
pub struct LogStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl LogStore {
    /// Open the store, creating the file and its parent directory if needed.
    ///
    /// Fails when the path cannot be opened for appending, so a bad path
    /// is caught before the server starts accepting events.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::LogFile {
                path: path.clone(),
                source,
            })?;
        }

        open_for_append(&path).map_err(|source| ConfigError::LogFile {
            path: path.clone(),
            source,
        })?;

        info!("Log store ready at {:?}", path);
        Ok(Self::unchecked(path))
    }

    /// Build a store without touching the filesystem.
    pub fn unchecked(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one serialized line. `line` must already end with `\n`.
    ///
    /// The lock is taken on the blocking thread, so a request dropped while
    /// waiting cannot let a second append start before the first finishes.
    pub async fn append(&self, line: &[u8]) -> Result<(), StorageError> {
        let path = self.path.clone();
        let lock = Arc::clone(&self.write_lock);
        let bytes = line.to_vec();

        let result = tokio::task::spawn_blocking(move || {
            let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let mut file = open_for_append(&path)?;
            write_or_rollback(&mut file, &bytes)
        })
        .await
        .unwrap_or_else(|join_err| Err(io::Error::from(join_err)));

        result.map_err(|source| StorageError::WriteFailure {
            path: self.path.clone(),
            source,
        })?;

        debug!("Appended {} bytes to {:?}", line.len(), self.path);
        Ok(())
    }
}

fn open_for_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// File operations the append path needs on top of `Write`.
trait LogFile: Write {
    fn size(&self) -> io::Result<u64>;
    fn sync(&self) -> io::Result<()>;
    fn truncate(&self, len: u64) -> io::Result<()>;
}

impl LogFile for File {
    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn sync(&self) -> io::Result<()> {
        self.sync_data()
    }

    fn truncate(&self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Write, flush and sync `line`, or leave the file at its original length.
fn write_or_rollback<F: LogFile>(file: &mut F, line: &[u8]) -> io::Result<()> {
    let original_len = file.size()?;

    let written = file
        .write_all(line)
        .and_then(|_| file.flush())
        .and_then(|_| file.sync());

    if let Err(e) = written {
        if let Err(rollback) = file.truncate(original_len).and_then(|_| file.sync()) {
            error!(
                "Failed to roll back partial append to {} bytes: {}",
                original_len, rollback
            );
        }
        return Err(e);
    }

    Ok(())
}
