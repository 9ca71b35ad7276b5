//! Recursive file collection

use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::WalkDir;

use crate::core::error::{Result, ScanError};

/// A file that could not be enumerated or processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

impl FileFailure {
    pub fn from_error(path: &Path, err: &ScanError) -> Self {
        Self {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Files found under a root, plus entries the walk could not read
#[derive(Debug, Default)]
pub struct CollectedFiles {
    pub files: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    /// The walk stopped early because shutdown was requested
    pub interrupted: bool,
}

/// Fail with [`ScanError::NotFound`] unless `dir` is an existing directory
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(ScanError::NotFound(dir.to_path_buf()))
    }
}

/// Collect every regular file under a directory
///
/// # Arguments
/// * `dir` - Directory to walk recursively
///
/// # Returns
/// Regular files in walk order. Symlinks are not followed.
pub fn collect_files(dir: &Path) -> Result<CollectedFiles> {
    collect_files_where(dir, |_| true)
}

/// Collect regular files under a directory whose file name passes `accept`
///
/// Entries the walk cannot read are recorded as failures and skipped; only
/// an invalid root aborts the collection.
pub fn collect_files_where<F>(dir: &Path, accept: F) -> Result<CollectedFiles>
where
    F: Fn(&str) -> bool,
{
    walk_files(dir, accept, None)
}

/// Collect every regular file under a directory, stopping once `shutdown`
/// is raised
///
/// A stopped walk returns what it found so far with `interrupted` set.
pub fn collect_files_until(dir: &Path, shutdown: &AtomicBool) -> Result<CollectedFiles> {
    walk_files(dir, |_| true, Some(shutdown))
}

fn walk_files<F>(dir: &Path, accept: F, shutdown: Option<&AtomicBool>) -> Result<CollectedFiles>
where
    F: Fn(&str) -> bool,
{
    ensure_directory(dir)?;

    let mut collected = CollectedFiles::default();

    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        if shutdown.is_some_and(|flag| flag.load(Ordering::SeqCst)) {
            info!("Shutdown requested, stopping walk of {}", dir.display());
            collected.interrupted = true;
            break;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                collected.failures.push(walk_failure(dir, e));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if accept(&entry.file_name().to_string_lossy()) {
            collected.files.push(entry.into_path());
        }
    }

    debug!(
        "Collected {} file(s) under {} ({} unreadable)",
        collected.files.len(),
        dir.display(),
        collected.failures.len()
    );

    Ok(collected)
}

/// Turn an entry the walk could not read into a logged failure
///
/// The failure names the offending entry, or `dir` when walkdir does not
/// know which entry failed.
pub fn walk_failure(dir: &Path, e: walkdir::Error) -> FileFailure {
    let err = ScanError::from(e);
    warn!("{}", err);
    let path = match &err {
        ScanError::Walk { path, .. } if !path.as_os_str().is_empty() => path.clone(),
        _ => dir.to_path_buf(),
    };
    FileFailure::from_error(&path, &err)
}
