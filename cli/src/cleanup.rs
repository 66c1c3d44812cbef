#![deny(missing_docs)]

//! # Cleanup
//!
//! Tracks files written during a run and removes them when the run fails or the
//! process is interrupted.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Exit code used after an interrupt.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Shared list of generated file paths.
#[derive(Debug, Clone, Default)]
pub struct GeneratedFiles {
    paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl GeneratedFiles {
    /// Records a path about to be written.
    pub fn record(&self, path: PathBuf) {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path);
    }

    /// Paths recorded so far.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes every recorded file and forgets them.
    pub fn cleanup(&self) {
        let paths: Vec<_> = self
            .paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();

        for path in paths {
            match fs::remove_file(&path) {
                Ok(()) => info!(path = %path.display(), "removed generated file"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "failed to remove generated file"),
            }
        }
    }
}

/// Spawns a background task removing the recorded files on Ctrl-C.
///
/// The task is fire-and-forget; abort the handle once generation is over.
pub fn spawn_interrupt_watcher(files: GeneratedFiles) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, removing generated files");
            files.cleanup();
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cleanup_removes_recorded_files() {
        let dir = tempdir().unwrap();
        let written = dir.path().join("api.proto");
        let never_written = dir.path().join("other.proto");
        fs::write(&written, "syntax").unwrap();

        let files = GeneratedFiles::default();
        files.record(written.clone());
        files.record(never_written);
        assert_eq!(files.paths().len(), 2);

        files.cleanup();
        assert!(!written.exists());
        assert!(files.paths().is_empty());
    }

    #[test]
    fn test_clones_share_paths() {
        let files = GeneratedFiles::default();
        let watcher_copy = files.clone();
        files.record(PathBuf::from("a.proto"));
        assert_eq!(watcher_copy.paths(), vec![PathBuf::from("a.proto")]);
    }

    #[tokio::test]
    async fn test_watcher_can_be_aborted() {
        let handle = spawn_interrupt_watcher(GeneratedFiles::default());
        handle.abort();
        let err = handle.await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
