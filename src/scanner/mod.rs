//! File collection, duplicate detection and video runtime totals

pub mod criteria;
pub mod duplicate_detector;
pub mod file_scanner;
pub mod video_scanner;

pub use criteria::{collect_matching, FileCriteria};
pub use duplicate_detector::{
    duplicate_groups, hash_files, scan_directory, DigestMap, DuplicateInfo, ScanOptions,
    ScanReport,
};
pub use file_scanner::{
    collect_files, collect_files_until, collect_files_where, ensure_directory, walk_failure,
    CollectedFiles, FileFailure,
};
pub use video_scanner::{measure_videos, RuntimeReport, VideoEntry};
