//! Destructive housekeeping actions
//!
//! Every action here mutates the filesystem. Callers list candidates first
//! and pass through [`confirm`] before invoking any of them.

pub mod confirm;
pub mod remove;
pub mod rename;
pub mod temp;

use std::path::PathBuf;

use crate::scanner::FileFailure;

pub use confirm::confirm;
pub use remove::remove_files;
pub use rename::{rename_files, renamed_path};
pub use temp::{clear_directory, directory_size, ClearSummary};

/// A file that an action changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub from: PathBuf,
    /// New location, for renames
    pub to: Option<PathBuf>,
}

/// Per-file results of a batch action
#[derive(Debug, Clone, Default)]
pub struct ActionSummary {
    pub applied: Vec<Applied>,
    pub failures: Vec<FileFailure>,
}

impl ActionSummary {
    pub fn success_count(&self) -> usize {
        self.applied.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}
