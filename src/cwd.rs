use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error};

/// Restores the process working directory when dropped.
///
/// The working directory is process-global, so tests holding a guard must not
/// run concurrently with other tests that touch it.
#[derive(Debug)]
pub struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    pub fn new() -> Result<Self> {
        let original = env::current_dir().context("Cannot determine current directory")?;
        Ok(CwdGuard { original })
    }

    /// Record the current directory, then change into `path`.
    pub fn enter(path: &Path) -> Result<Self> {
        let guard = Self::new()?;
        change_dir(path)?;
        Ok(guard)
    }

    pub fn original(&self) -> &Path {
        &self.original
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        match env::set_current_dir(&self.original) {
            Ok(()) => debug!("Restored working directory to {}", self.original.display()),
            Err(e) => error!(
                "Failed to restore working directory to {}: {}",
                self.original.display(),
                e
            ),
        }
    }
}

pub fn change_dir(path: &Path) -> Result<()> {
    env::set_current_dir(path)
        .with_context(|| format!("Failed to change directory to {}", path.display()))?;
    debug!("Changed working directory to {}", path.display());
    Ok(())
}
