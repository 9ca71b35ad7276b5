//! Eternals Library
//!
//! Filesystem housekeeping: content-hash duplicate detection with optional
//! parallel hashing, bulk remove, rename and temp-directory clearing, and
//! total runtime of a video collection.

pub mod actions;
pub mod core;
pub mod logging;
pub mod reporting;
pub mod scanner;

pub use crate::core::digest;
pub use reporting::report_writer;
pub use scanner::duplicate_detector;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::actions::{
        clear_directory, confirm, remove_files, rename_files, renamed_path, ActionSummary,
        ClearSummary,
    };
    pub use crate::core::{compute_digest, video_duration, ScanError};
    pub use crate::reporting::report_writer::{
        render_duplicates, render_summary, write_json_report, write_report, LineKind, ReportLine,
        NO_DUPLICATES,
    };
    pub use crate::reporting::runtime_report::{
        format_size, format_time, render_runtime_summary, render_video_table, RuntimeBreakdown,
    };
    pub use crate::scanner::{
        collect_files, collect_matching, duplicate_groups, hash_files, measure_videos,
        scan_directory, DigestMap, DuplicateInfo, FileCriteria, FileFailure, RuntimeReport,
        ScanOptions, ScanReport, VideoEntry,
    };
}
