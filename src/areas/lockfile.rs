//! Exclusive repository lock
//!
//! Mutating commands hold an advisory lock on `.kit/kit.lock` for their whole
//! duration. The lock is taken without waiting: if another process holds it the command
//! fails with [`KitError::LockHeld`] and the user can retry.

use crate::artifacts::core::error::KitError;
use file_guard::{FileGuard, Lock};
use std::fs::File;
use std::path::{Path, PathBuf};

pub const LOCK_FILE_NAME: &str = "kit.lock";

/// Held for as long as the value lives; dropping it releases the lock
pub struct RepositoryLock {
    path: PathBuf,
    _guard: FileGuard<Box<File>>,
}

impl RepositoryLock {
    pub fn acquire(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| KitError::io(path, e))?;

        let guard = file_guard::try_lock(Box::new(file), Lock::Exclusive, 0, 1)
            .map_err(|e| lock_error(path, e))?;
        tracing::debug!(path = %path.display(), "acquired repository lock");

        Ok(RepositoryLock {
            path: path.to_path_buf(),
            _guard: guard,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RepositoryLock {
    fn drop(&mut self) {
        tracing::debug!(path = %self.path.display(), "released repository lock");
    }
}

fn lock_error(path: &Path, error: std::io::Error) -> KitError {
    match error.kind() {
        // fcntl reports a conflicting lock as either EAGAIN or EACCES
        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::PermissionDenied => {
            KitError::LockHeld {
                path: path.to_path_buf(),
            }
        }
        _ => KitError::io(path, error),
    }
}
