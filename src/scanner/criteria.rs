//! Name-based file selection for the remove and rename tools

use std::path::Path;

use super::file_scanner::{collect_files_where, CollectedFiles};
use crate::core::error::Result;

/// Match rules for file names
///
/// A name matches when any supplied rule holds. With no rules set nothing
/// matches, so an empty selection can never sweep a whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCriteria {
    /// Exact file name
    pub filename: Option<String>,
    /// Suffix of the file name, e.g. `.tmp`
    pub extension: Option<String>,
    /// Prefix of the file name
    pub start_name: Option<String>,
}

impl FileCriteria {
    pub fn is_empty(&self) -> bool {
        self.filename.is_none() && self.extension.is_none() && self.start_name.is_none()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.filename.as_deref().is_some_and(|f| name == f)
            || self.extension.as_deref().is_some_and(|e| name.ends_with(e))
            || self.start_name.as_deref().is_some_and(|s| name.starts_with(s))
    }
}

/// Collect files under `dir` whose names match `criteria`
pub fn collect_matching(dir: &Path, criteria: &FileCriteria) -> Result<CollectedFiles> {
    collect_files_where(dir, |name| criteria.matches(name))
}
