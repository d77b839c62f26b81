use crate::error::{Result, SyncError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Outcome of copying one file into the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Destination was missing and has been written
    Created,
    /// Destination differed and has been overwritten
    Updated,
    /// Destination already held identical bytes; left untouched
    Unchanged,
}

/// Outcome of removing one stale destination file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Vanished between listing and deletion
    AlreadyGone,
}

/// Performs the byte-level writes and deletes of a sync pass
pub struct Transferrer<'a> {
    extension: &'a str,
    dry_run: bool,
}

impl<'a> Transferrer<'a> {
    pub fn new(extension: &'a str, dry_run: bool) -> Self {
        Self { extension, dry_run }
    }

    /// Copy `source` to `dest` unless `dest` already has the same content
    ///
    /// An unchanged destination is never opened for writing, so its
    /// modification time stays put.
    pub fn copy_if_changed(&self, source: &Path, dest: &Path) -> Result<CopyOutcome> {
        let content = fs::read(source).map_err(|e| SyncError::ReadError {
            path: source.to_path_buf(),
            extension: self.extension.to_string(),
            source: e,
        })?;

        let outcome = match fs::read(dest) {
            Ok(existing) if existing == content => return Ok(CopyOutcome::Unchanged),
            Ok(_) => CopyOutcome::Updated,
            Err(e) if e.kind() == ErrorKind::NotFound => CopyOutcome::Created,
            Err(e) => {
                return Err(SyncError::ReadError {
                    path: dest.to_path_buf(),
                    extension: self.extension.to_string(),
                    source: e,
                })
            }
        };

        if self.dry_run {
            tracing::info!("Would copy: {}", dest.display());
            return Ok(outcome);
        }

        fs::write(dest, &content).map_err(|e| SyncError::WriteError {
            path: dest.to_path_buf(),
            extension: self.extension.to_string(),
            source: e,
        })?;

        Ok(outcome)
    }

    pub fn delete(&self, path: &Path) -> Result<DeleteOutcome> {
        if self.dry_run {
            tracing::info!("Would delete: {}", path.display());
            return Ok(DeleteOutcome::Deleted);
        }

        match fs::remove_file(path) {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(DeleteOutcome::AlreadyGone),
            Err(e) => Err(SyncError::DeleteError {
                path: path.to_path_buf(),
                extension: self.extension.to_string(),
                source: e,
            }),
        }
    }
}
