//! Bulk file renaming

use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{ActionSummary, Applied};
use crate::core::error::ScanError;
use crate::scanner::FileFailure;

/// Target path for renaming `path` to `new_name`, keeping its directory and
/// extension
pub fn renamed_path(path: &Path, new_name: &str) -> PathBuf {
    let file_name = match path.extension() {
        Some(ext) => format!("{}.{}", new_name, ext.to_string_lossy()),
        None => new_name.to_string(),
    };
    match path.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Rename each file to `new_name` plus its original extension
///
/// An existing target is never overwritten; it is recorded as a failure.
pub fn rename_files(paths: &[PathBuf], new_name: &str) -> ActionSummary {
    let mut summary = ActionSummary::default();

    for path in paths {
        let target = renamed_path(path, new_name);
        match rename_one(path, &target) {
            Ok(()) => {
                info!("Renamed file: {} to {}", path.display(), target.display());
                summary.applied.push(Applied {
                    from: path.clone(),
                    to: Some(target),
                });
            }
            Err(e) => {
                let err = ScanError::io(path, e);
                warn!("Error renaming file: {}", err);
                summary.failures.push(FileFailure::from_error(path, &err));
            }
        }
    }

    summary
}

fn rename_one(from: &Path, to: &Path) -> io::Result<()> {
    if from == to {
        return Ok(());
    }
    if to.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", to.display()),
        ));
    }
    fs::rename(from, to)
}
