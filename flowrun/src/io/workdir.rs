//! Scoped working-directory switch with guaranteed restoration.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Switches the process working directory and restores the previous one on
/// drop, whatever the exit path. Acquisition is the change, the guarded
/// region is whatever runs while the guard lives, release is restoration.
#[derive(Debug)]
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    pub fn change_to(target: &Path) -> Result<Self> {
        let previous = env::current_dir().context("capture current directory")?;
        env::set_current_dir(target)
            .with_context(|| format!("change directory to {}", target.display()))?;
        debug!(from = %previous.display(), to = %target.display(), "working directory switched");
        Ok(Self { previous })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(err) = env::set_current_dir(&self.previous) {
            warn!(path = %self.previous.display(), err = %err, "failed to restore working directory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::process_lock;

    #[test]
    fn guard_switches_and_restores() {
        let _lock = process_lock();
        let temp = tempfile::tempdir().expect("tempdir");
        let before = env::current_dir().expect("current dir");

        {
            let _guard = WorkingDirGuard::change_to(temp.path()).expect("change");
            let inside = env::current_dir().expect("current dir");
            assert_eq!(
                inside,
                std::fs::canonicalize(temp.path()).expect("canonicalize")
            );
        }

        assert_eq!(env::current_dir().expect("current dir"), before);
    }

    /// Restoration must happen on error exits too, not just success.
    #[test]
    fn guard_restores_on_error_path() {
        let _lock = process_lock();
        let temp = tempfile::tempdir().expect("tempdir");
        let before = env::current_dir().expect("current dir");

        let result: Result<()> = (|| {
            let _guard = WorkingDirGuard::change_to(temp.path())?;
            anyhow::bail!("guarded region failed")
        })();

        assert!(result.is_err());
        assert_eq!(env::current_dir().expect("current dir"), before);
    }

    #[test]
    fn change_to_missing_dir_fails_without_moving() {
        let _lock = process_lock();
        let temp = tempfile::tempdir().expect("tempdir");
        let before = env::current_dir().expect("current dir");

        let missing = temp.path().join("nope");
        assert!(WorkingDirGuard::change_to(&missing).is_err());
        assert_eq!(env::current_dir().expect("current dir"), before);
    }
}
