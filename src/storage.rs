//! Blob persistence seam.
//!
//! The store persists each owner's collections as independent JSON blobs
//! addressed by string key:
//!
//! ```text
//! tasks_<ownerId>          # array of Task
//! notifications_<ownerId>  # array of Notification
//! user                     # active session User, absent when logged out
//! ```
//!
//! `BlobStore` keeps the entity logic free of I/O: `FileStore` is the
//! durable implementation, `MemoryStore` backs tests.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};

/// Fixed key for the persisted session blob
pub const SESSION_KEY: &str = "user";

/// Blob key for an owner's task collection
pub fn tasks_key(owner_id: &str) -> String {
    format!("tasks_{owner_id}")
}

/// Blob key for an owner's notification collection
pub fn notifications_key(owner_id: &str) -> String {
    format!("notifications_{owner_id}")
}

/// Durable key-value persistence for serialized collections.
///
/// Writes are all-or-nothing from the caller's perspective: on `Err` the
/// previously stored value must still be intact.
pub trait BlobStore {
    /// Read the raw blob for a key, `None` when absent
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write (or replace) the blob for a key
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the blob for a key; absent keys are a no-op
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Read and deserialize a JSON blob
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and write a JSON blob
    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.write(key, &json)
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// File-per-key blob store rooted at a data directory.
///
/// Key `k` lives at `<root>/<k>.json`. Writes are atomic (temp + rename)
/// and serialized across processes by an advisory lock file.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the blob file for a key
    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(".store.lock")
    }
}

impl BlobStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.blob_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::Io(err)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let _lock = FileLock::acquire(self.lock_path(), DEFAULT_LOCK_TIMEOUT_MS)?;
        tracing::debug!(key, path = %self.blob_path(key).display(), "writing blob");
        lock::write_atomic(&self.blob_path(key), value.as_bytes())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _lock = FileLock::acquire(self.lock_path(), DEFAULT_LOCK_TIMEOUT_MS)?;
        match fs::remove_file(self.blob_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::Io(err)),
        }
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// HashMap-backed store for tests and ephemeral sessions.
///
/// `fail_writes` and `fail_reads` make the matching operations return
/// `Persistence`, for exercising the store's rollback and failed-load paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
    fail_writes: bool,
    fail_reads: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blobs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(Error::Persistence(format!("simulated read failure: {key}")));
        }
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Persistence(format!("simulated write failure: {key}")));
        }
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Persistence(format!(
                "simulated remove failure: {key}"
            )));
        }
        self.blobs.remove(key);
        Ok(())
    }
}
