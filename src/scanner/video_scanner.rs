//! Total playback runtime of the videos under a directory

use indicatif::ParallelProgressIterator;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::time::Duration;

use super::duplicate_detector::ScanOptions;
use super::file_scanner::{collect_files_where, FileFailure};
use crate::core::duration::{is_video_file, video_duration};
use crate::core::error::{catch_worker_panic, Result, ScanError};

/// One decoded video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoEntry {
    pub path: PathBuf,
    pub duration: Duration,
    /// File size in bytes
    pub size: u64,
}

/// Outcome of measuring a directory of videos
#[derive(Debug, Default, Serialize)]
pub struct RuntimeReport {
    /// Decoded videos in walk order
    pub videos: Vec<VideoEntry>,
    pub failures: Vec<FileFailure>,
    /// Videos skipped because shutdown was requested
    pub skipped: usize,
    pub interrupted: bool,
}

impl RuntimeReport {
    pub fn video_count(&self) -> usize {
        self.videos.len()
    }

    /// Sum of the durations of every decoded video
    pub fn total_runtime(&self) -> Duration {
        self.videos.iter().map(|v| v.duration).sum()
    }
}

type VideoOutcome = (PathBuf, Option<Result<VideoEntry>>);

/// Find every `.mp4`, `.avi` and `.mkv` under `root` and read their
/// durations on a worker pool
///
/// Files that cannot be decoded are recorded as failures and left out of
/// the totals. Only an invalid root or pool aborts the run.
pub fn measure_videos(root: &Path, options: &ScanOptions) -> Result<RuntimeReport> {
    let collected = collect_files_where(root, is_video_file)?;
    info!(
        "Measuring {} video(s) under {}",
        collected.files.len(),
        root.display()
    );
    options.progress.set_length(collected.files.len() as u64);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers.unwrap_or(0))
        .thread_name(|i| format!("video-{}", i))
        .build()?;

    let shutdown = &options.shutdown;
    let results: Vec<VideoOutcome> = pool.install(|| {
        collected
            .files
            .par_iter()
            .progress_with(options.progress.clone())
            .map(|path| {
                if shutdown.load(Ordering::SeqCst) {
                    return (path.clone(), None);
                }
                (
                    path.clone(),
                    Some(catch_worker_panic(path, || measure_one(path))),
                )
            })
            .collect()
    });

    let mut report = RuntimeReport {
        failures: collected.failures,
        ..RuntimeReport::default()
    };
    for (path, outcome) in results {
        match outcome {
            Some(Ok(entry)) => report.videos.push(entry),
            Some(Err(e)) => {
                warn!("{}", e);
                report.failures.push(FileFailure::from_error(&path, &e));
            }
            None => report.skipped += 1,
        }
    }
    report.interrupted = report.skipped > 0;

    debug!(
        "Measured {} video(s), {} failed, {} skipped",
        report.videos.len(),
        report.failures.len(),
        report.skipped
    );

    Ok(report)
}

fn measure_one(path: &Path) -> Result<VideoEntry> {
    let duration = video_duration(path)?;
    let size = fs::metadata(path)
        .map_err(|e| ScanError::io(path, e))?
        .len();
    Ok(VideoEntry {
        path: path.to_path_buf(),
        duration,
        size,
    })
}
