//! Error types shared by the scanner and the housekeeping actions

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// Errors produced while walking, hashing, or acting on files
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The root directory is missing or is not a directory
    #[error("Directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A file could not be opened or read
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory entry could not be read during the tree walk
    #[error("Failed to read entry under {}: {message}", .path.display())]
    Walk { path: PathBuf, message: String },

    /// A pool worker panicked while processing a file
    #[error("Worker panicked while processing {}", .path.display())]
    Worker { path: PathBuf },

    /// A video container could not be decoded
    #[error("Failed to read video duration from {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScanError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ScanError::Decode {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether the scan as a whole must abort on this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScanError::NotFound(_) | ScanError::Pool(_))
    }
}

impl From<walkdir::Error> for ScanError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        ScanError::Walk {
            path,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Run per-file work, turning a panic into [`ScanError::Worker`]
///
/// Pool workers wrap each file in this so one bad file cannot tear down
/// the pool.
pub fn catch_worker_panic<T, F>(path: &Path, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(work)) {
        Ok(result) => result,
        Err(_panic) => Err(ScanError::Worker {
            path: path.to_path_buf(),
        }),
    }
}
