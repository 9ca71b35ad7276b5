//! Duplicate file detection by content digest

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::file_scanner::{collect_files_until, FileFailure};
use crate::core::digest::{compute_digest, compute_digest_isolated};
use crate::core::error::Result;

/// Files sharing one content digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateInfo {
    pub hash: String,
    pub paths: Vec<PathBuf>,
}

impl DuplicateInfo {
    pub fn is_duplicate(&self) -> bool {
        self.paths.len() > 1
    }
}

/// Digest to paths mapping, singletons included
///
/// Groups keep the order in which their digest was first seen, and paths
/// keep the order in which they were inserted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DigestMap {
    groups: Vec<DuplicateInfo>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl DigestMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hash: String, path: PathBuf) {
        match self.index.get(&hash) {
            Some(&slot) => self.groups[slot].paths.push(path),
            None => {
                self.index.insert(hash.clone(), self.groups.len());
                self.groups.push(DuplicateInfo {
                    hash,
                    paths: vec![path],
                });
            }
        }
    }

    pub fn get(&self, hash: &str) -> Option<&[PathBuf]> {
        self.index
            .get(hash)
            .map(|&slot| self.groups[slot].paths.as_slice())
    }

    /// Number of distinct digests
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of paths across all groups
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(|g| g.paths.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DuplicateInfo> {
        self.groups.iter()
    }

    /// Groups with more than one member, in discovery order
    pub fn duplicates(&self) -> impl Iterator<Item = &DuplicateInfo> {
        self.groups.iter().filter(|g| g.is_duplicate())
    }
}

/// Filter a digest map down to actionable duplicate groups
pub fn duplicate_groups(map: &DigestMap) -> Vec<DuplicateInfo> {
    map.duplicates().cloned().collect()
}

/// How a scan distributes hashing work
#[derive(Clone)]
pub struct ScanOptions {
    /// Hash on a worker pool instead of the calling thread
    pub parallel: bool,
    /// Pool size; `None` uses the available parallelism
    pub workers: Option<usize>,
    /// Raised to stop hashing further files
    pub shutdown: Arc<AtomicBool>,
    pub progress: ProgressBar,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            workers: None,
            shutdown: Arc::new(AtomicBool::new(false)),
            progress: ProgressBar::hidden(),
        }
    }
}

impl fmt::Debug for ScanOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanOptions")
            .field("parallel", &self.parallel)
            .field("workers", &self.workers)
            .field("shutdown", &self.shutdown.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl ScanOptions {
    pub fn sequential() -> Self {
        Self::default()
    }

    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown = flag;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }
}

/// Outcome of one scan
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    pub digests: DigestMap,
    pub failures: Vec<FileFailure>,
    /// Files successfully digested
    pub hashed: usize,
    /// Files skipped because shutdown was requested
    pub skipped: usize,
    /// Shutdown cut the walk or the hashing short
    pub interrupted: bool,
}

impl ScanReport {
    pub fn duplicate_groups(&self) -> Vec<DuplicateInfo> {
        duplicate_groups(&self.digests)
    }
}

/// Scan a directory tree and group every regular file by content digest
///
/// # Arguments
/// * `root` - Directory to scan recursively
/// * `options` - Sequential or pooled execution, cancellation and progress
///
/// # Returns
/// The unfiltered digest map with per-file failures, or
/// [`ScanError::NotFound`](crate::core::ScanError::NotFound) before any
/// hashing if `root` is not a directory.
pub fn scan_directory(root: &Path, options: &ScanOptions) -> Result<ScanReport> {
    let collected = collect_files_until(root, &options.shutdown)?;
    info!(
        "Hashing {} file(s) under {}",
        collected.files.len(),
        root.display()
    );

    let mut report = hash_files(&collected.files, options)?;
    let mut failures = collected.failures;
    failures.append(&mut report.failures);
    report.failures = failures;
    report.interrupted |= collected.interrupted;

    Ok(report)
}

/// Digest a list of files and group them
///
/// Per-file failures are logged and recorded; they never abort the batch.
pub fn hash_files(paths: &[PathBuf], options: &ScanOptions) -> Result<ScanReport> {
    options.progress.set_length(paths.len() as u64);

    let results = if options.parallel {
        hash_pooled(paths, options)?
    } else {
        hash_sequential(paths, options)
    };

    let mut report = ScanReport::default();
    for (path, outcome) in results {
        match outcome {
            Some(Ok(hash)) => {
                report.digests.insert(hash, path);
                report.hashed += 1;
            }
            Some(Err(e)) => {
                warn!("{}", e);
                report.failures.push(FileFailure::from_error(&path, &e));
            }
            None => report.skipped += 1,
        }
    }
    report.interrupted = report.skipped > 0;

    debug!(
        "Hashed {} file(s), {} failed, {} skipped",
        report.hashed,
        report.failures.len(),
        report.skipped
    );

    Ok(report)
}

type HashOutcome = (PathBuf, Option<Result<String>>);

fn hash_sequential(paths: &[PathBuf], options: &ScanOptions) -> Vec<HashOutcome> {
    paths
        .iter()
        .progress_with(options.progress.clone())
        .map(|path| {
            if options.shutdown.load(Ordering::SeqCst) {
                return (path.clone(), None);
            }
            (path.clone(), Some(compute_digest(path)))
        })
        .collect()
}

fn hash_pooled(paths: &[PathBuf], options: &ScanOptions) -> Result<Vec<HashOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers.unwrap_or(0))
        .thread_name(|i| format!("digest-{}", i))
        .build()?;
    debug!("Hashing on {} worker thread(s)", pool.current_num_threads());

    let shutdown = &options.shutdown;
    let results: Vec<HashOutcome> = pool.install(|| {
        paths
            .par_iter()
            .progress_with(options.progress.clone())
            .map(|path| {
                if shutdown.load(Ordering::SeqCst) {
                    return (path.clone(), None);
                }
                (path.clone(), Some(compute_digest_isolated(path)))
            })
            .collect()
    });

    Ok(results)
}
