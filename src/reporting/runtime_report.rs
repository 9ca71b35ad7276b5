//! Formatting for video runtime totals

use std::time::Duration;

use super::report_writer::{LineKind, ReportLine};
use crate::scanner::video_scanner::RuntimeReport;

/// A total runtime split into whole days, hours and minutes
///
/// Hours are below 24 and minutes below 60; leftover seconds are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl From<Duration> for RuntimeBreakdown {
    fn from(total: Duration) -> Self {
        let minutes = total.as_secs() / 60;
        let hours = minutes / 60;
        Self {
            days: hours / 24,
            hours: hours % 24,
            minutes: minutes % 60,
        }
    }
}

/// Format seconds as `HH:MM:SS.ss`
///
/// Hours are not wrapped into days, so long runtimes show e.g. `26:00:00.00`.
pub fn format_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let hours = (seconds / 3600.0).floor();
    let rest = seconds - hours * 3600.0;
    let minutes = (rest / 60.0).floor();
    let secs = rest - minutes * 60.0;
    format!("{:02}:{:02}:{:05.2}", hours as u64, minutes as u64, secs)
}

/// Format a byte count as megabytes with two decimals
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Render one row per decoded video: name, runtime and size
pub fn render_video_table(report: &RuntimeReport) -> Vec<ReportLine> {
    let mut lines = vec![ReportLine::new(
        LineKind::Heading,
        format!("{:<60} {:<15} {:<15}", "File Name", "Runtime", "Size"),
    )];

    for video in &report.videos {
        lines.push(ReportLine::new(
            LineKind::Member,
            format!(
                "{:<60} {:<15} {:<15}",
                video.path.display(),
                format_time(video.duration.as_secs_f64()),
                format_size(video.size)
            ),
        ));
    }
    lines.push(ReportLine::blank());

    lines
}

/// Render failures, the video count and the total runtime
pub fn render_runtime_summary(report: &RuntimeReport) -> Vec<ReportLine> {
    let mut lines = Vec::new();

    if !report.failures.is_empty() {
        lines.push(ReportLine::new(LineKind::Heading, "Videos that could not be read:"));
        for failure in &report.failures {
            lines.push(ReportLine::new(
                LineKind::Failure,
                format!("- {}: {}", failure.path.display(), failure.message),
            ));
        }
        lines.push(ReportLine::blank());
    }

    let total = report.total_runtime();
    let split = RuntimeBreakdown::from(total);

    lines.push(ReportLine::new(
        LineKind::Success,
        format!("Total number of videos: {}", report.video_count()),
    ));
    lines.push(ReportLine::new(
        LineKind::Success,
        format!(
            "Total runtime of all videos: {:.2} seconds OR {} days, {} hours, {} minutes.",
            total.as_secs_f64(),
            split.days,
            split.hours,
            split.minutes
        ),
    ));
    if !report.failures.is_empty() {
        lines.push(ReportLine::new(
            LineKind::Summary,
            format!("Videos failed: {}", report.failures.len()),
        ));
    }
    if report.interrupted {
        lines.push(ReportLine::new(
            LineKind::Failure,
            format!("Interrupted: {} video(s) not measured", report.skipped),
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::file_scanner::FileFailure;
    use crate::scanner::video_scanner::VideoEntry;
    use std::path::PathBuf;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00:00.00");
        assert_eq!(format_time(65.5), "00:01:05.50");
        assert_eq!(format_time(3725.25), "01:02:05.25");
        assert_eq!(format_time(93_600.0), "26:00:00.00");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.00 MB");
        assert_eq!(format_size(1024 * 1024 * 3 / 2), "1.50 MB");
    }

    #[test]
    fn test_breakdown_wraps_minutes_and_hours() {
        // 1 day, 2 hours, 3 minutes, 4 seconds
        let total = Duration::from_secs(86_400 + 2 * 3600 + 3 * 60 + 4);
        assert_eq!(
            RuntimeBreakdown::from(total),
            RuntimeBreakdown {
                days: 1,
                hours: 2,
                minutes: 3
            }
        );

        let under_a_minute = RuntimeBreakdown::from(Duration::from_secs_f64(59.9));
        assert_eq!(under_a_minute.minutes, 0);
        assert_eq!(under_a_minute.days, 0);
    }

    #[test]
    fn test_runtime_summary_totals_and_failures() {
        let report = RuntimeReport {
            videos: vec![
                VideoEntry {
                    path: PathBuf::from("/v/a.mp4"),
                    duration: Duration::from_secs(3600),
                    size: 1024,
                },
                VideoEntry {
                    path: PathBuf::from("/v/b.mkv"),
                    duration: Duration::from_secs(1830),
                    size: 2048,
                },
            ],
            failures: vec![FileFailure {
                path: PathBuf::from("/v/c.avi"),
                message: "truncated header".into(),
            }],
            ..RuntimeReport::default()
        };

        let texts: Vec<_> = render_runtime_summary(&report)
            .into_iter()
            .map(|l| l.text)
            .collect();
        assert!(texts.contains(&"- /v/c.avi: truncated header".to_string()));
        assert!(texts.contains(&"Total number of videos: 2".to_string()));
        assert!(texts.contains(
            &"Total runtime of all videos: 5430.00 seconds OR 0 days, 1 hours, 30 minutes."
                .to_string()
        ));
        assert!(texts.contains(&"Videos failed: 1".to_string()));
    }

    #[test]
    fn test_video_table_rows() {
        let report = RuntimeReport {
            videos: vec![VideoEntry {
                path: PathBuf::from("/v/a.mp4"),
                duration: Duration::from_secs(90),
                size: 1024 * 1024,
            }],
            ..RuntimeReport::default()
        };

        let lines = render_video_table(&report);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].text.starts_with("File Name"));
        assert!(lines[1].text.contains("00:01:30.00"));
        assert!(lines[1].text.contains("1.00 MB"));
    }
}
