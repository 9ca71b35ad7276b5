//! Bulk file removal

use log::{info, warn};
use std::fs;
use std::path::PathBuf;

use super::{ActionSummary, Applied};
use crate::core::error::ScanError;
use crate::scanner::FileFailure;

/// Delete each file, continuing past failures
pub fn remove_files(paths: &[PathBuf]) -> ActionSummary {
    let mut summary = ActionSummary::default();

    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => {
                info!("Deleted file: {}", path.display());
                summary.applied.push(Applied {
                    from: path.clone(),
                    to: None,
                });
            }
            Err(e) => {
                let err = ScanError::io(path, e);
                warn!("Error deleting file: {}", err);
                summary.failures.push(FileFailure::from_error(path, &err));
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_remove_files() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.tmp");
        let b = temp_dir.path().join("b.tmp");
        File::create(&a).unwrap();
        File::create(&b).unwrap();

        let summary = remove_files(&[a.clone(), b.clone()]);
        assert_eq!(summary.success_count(), 2);
        assert!(summary.all_succeeded());
        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[test]
    fn test_remove_continues_past_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let gone = temp_dir.path().join("gone.tmp");
        let present = temp_dir.path().join("present.tmp");
        File::create(&present).unwrap();

        let summary = remove_files(&[gone.clone(), present.clone()]);
        assert_eq!(summary.success_count(), 1);
        assert_eq!(summary.failure_count(), 1);
        assert_eq!(summary.failures[0].path, gone);
        assert!(!present.exists());
    }
}
