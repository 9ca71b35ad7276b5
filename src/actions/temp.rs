//! Emptying a scratch directory such as the system temp dir

use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::core::error::{Result, ScanError};
use crate::scanner::{ensure_directory, walk_failure, FileFailure};

/// Counts from clearing a directory
#[derive(Debug, Clone, Default)]
pub struct ClearSummary {
    pub files_deleted: usize,
    pub file_failures: Vec<FileFailure>,
    pub dirs_deleted: usize,
    pub dir_failures: Vec<FileFailure>,
    pub bytes_freed: u64,
}

impl ClearSummary {
    pub fn freed_megabytes(&self) -> f64 {
        self.bytes_freed as f64 / (1024.0 * 1024.0)
    }
}

/// Total size in bytes of the regular files under `dir`
///
/// Entries that cannot be read are not counted.
pub fn directory_size(dir: &Path) -> u64 {
    WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

/// Delete everything inside `dir`, keeping `dir` itself
///
/// Files go first, then the remaining subdirectories deepest first. Items
/// in use or otherwise locked are counted as failures and left in place,
/// as are entries the walk cannot read.
pub fn clear_directory(dir: &Path) -> Result<ClearSummary> {
    ensure_directory(dir)?;

    let initial_size = directory_size(dir);
    let mut summary = ClearSummary::default();

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .min_depth(1)
        .contents_first(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                summary.file_failures.push(walk_failure(dir, e));
                continue;
            }
        };
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        } else {
            files.push(entry.into_path());
        }
    }
    debug!(
        "Clearing {} file(s) and {} director(ies) under {}",
        files.len(),
        dirs.len(),
        dir.display()
    );

    for path in &files {
        match fs::remove_file(path) {
            Ok(()) => {
                info!("Removed file: {}", path.display());
                summary.files_deleted += 1;
            }
            Err(e) => record_failure(&mut summary.file_failures, path, e),
        }
    }

    for path in dirs.iter().filter(|p| p.exists()) {
        match fs::remove_dir_all(path) {
            Ok(()) => {
                info!("Removed directory: {}", path.display());
                summary.dirs_deleted += 1;
            }
            Err(e) => record_failure(&mut summary.dir_failures, path, e),
        }
    }

    summary.bytes_freed = initial_size.saturating_sub(directory_size(dir));
    Ok(summary)
}

fn record_failure(failures: &mut Vec<FileFailure>, path: &Path, e: std::io::Error) {
    let err = ScanError::io(path, e);
    warn!("Failed to remove: {}", err);
    failures.push(FileFailure::from_error(path, &err));
}
