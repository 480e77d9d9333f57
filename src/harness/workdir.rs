//! Scoped working-directory changes.
//!
//! The process working directory is shared by every thread. [`WorkingDirGuard`] serializes
//! changes through a process-wide lock and puts the previous directory back when dropped,
//! including during unwinding.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Holds the working directory at `dir` until dropped.
#[derive(Debug)]
pub struct WorkingDirGuard {
    previous: PathBuf,
    // Released after `drop` has restored `previous`.
    _lock: MutexGuard<'static, ()>,
}

impl WorkingDirGuard {
    /// Change into `dir`, blocking while another guard is alive.
    pub fn change_to(dir: &Path) -> io::Result<Self> {
        let lock = CWD_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = env::current_dir()?;
        env::set_current_dir(dir)?;
        tracing::debug!("Entered {} (was {})", dir.display(), previous.display());
        Ok(Self { previous, _lock: lock })
    }

    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            tracing::warn!("Failed to restore working directory {}: {}", self.previous.display(), e);
        }
    }
}
