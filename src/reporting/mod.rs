//! Report formatting and output files

pub mod report_writer;
pub mod runtime_report;

pub use report_writer::{
    render_duplicates, render_summary, write_json_report, write_report, LineKind, ReportLine,
    NO_DUPLICATES,
};
pub use runtime_report::{
    format_size, format_time, render_runtime_summary, render_video_table, RuntimeBreakdown,
};
