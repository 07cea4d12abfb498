use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::Result;

/// Cross-process mutual exclusion over a sentinel file.
///
/// The OS-level exclusive advisory lock is authoritative; the sentinel's
/// content (the holder's pid) exists purely for human diagnosis. Acquisition
/// blocks until the lock is granted — callers needing bounded wait must wrap
/// the call themselves.
pub struct ProcessMutex {
    path: PathBuf,
}

impl ProcessMutex {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the exclusive lock is obtained, then stamp the sentinel
    /// with the holder's pid. Released on all exit paths when the returned
    /// guard drops.
    pub fn acquire(&self) -> Result<MutexGuard> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;

        file.lock_exclusive()?;

        // Diagnostic only; the OS lock above is authoritative.
        file.set_len(0)?;
        file.write_all(std::process::id().to_string().as_bytes())?;
        file.flush()?;

        Ok(MutexGuard {
            file,
            path: self.path.clone(),
        })
    }
}

/// RAII guard for an acquired [`ProcessMutex`]. Unlocks and removes the
/// sentinel on drop; an already-missing sentinel is a benign no-op.
pub struct MutexGuard {
    file: File,
    path: PathBuf,
}

impl Drop for MutexGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}
