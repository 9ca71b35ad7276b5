//! Report formatting and writing
//!
//! Formatting is pure: functions here return [`ReportLine`]s tagged with a
//! [`LineKind`], and the console decides how each kind is styled.

use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::scanner::duplicate_detector::{DigestMap, DuplicateInfo, ScanReport};
use crate::scanner::file_scanner::FileFailure;

/// Presentation role of a report line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Heading,
    Digest,
    Member,
    Success,
    Failure,
    Summary,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub kind: LineKind,
    pub text: String,
}

impl ReportLine {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn blank() -> Self {
        Self::new(LineKind::Blank, "")
    }
}

pub const NO_DUPLICATES: &str = "No duplicate files found.";

/// Render every group with more than one member
///
/// Each qualifying group appears exactly once: its digest followed by its
/// member paths. With no qualifying group a single [`NO_DUPLICATES`] line
/// is returned.
pub fn render_duplicates(map: &DigestMap) -> Vec<ReportLine> {
    let mut lines = Vec::new();

    for group in map.duplicates() {
        if lines.is_empty() {
            lines.push(ReportLine::new(LineKind::Heading, "Duplicate files:"));
        }
        lines.push(ReportLine::new(LineKind::Digest, format!("Hash: {}", group.hash)));
        for path in &group.paths {
            lines.push(ReportLine::new(
                LineKind::Member,
                format!("- {}", path.display()),
            ));
        }
        lines.push(ReportLine::blank());
    }

    if lines.is_empty() {
        lines.push(ReportLine::new(LineKind::Success, NO_DUPLICATES));
    }

    lines
}

/// Render per-file failures and the closing counts of a scan
pub fn render_summary(report: &ScanReport) -> Vec<ReportLine> {
    let mut lines = Vec::new();

    if !report.failures.is_empty() {
        lines.push(ReportLine::new(LineKind::Heading, "Files that could not be read:"));
        for failure in &report.failures {
            lines.push(ReportLine::new(
                LineKind::Failure,
                format!("- {}: {}", failure.path.display(), failure.message),
            ));
        }
        lines.push(ReportLine::blank());
    }

    let groups = report.digests.duplicates().count();
    let redundant: usize = report
        .digests
        .duplicates()
        .map(|g| g.paths.len() - 1)
        .sum();

    lines.push(ReportLine::new(
        LineKind::Summary,
        format!("Files hashed: {}", report.hashed),
    ));
    lines.push(ReportLine::new(
        LineKind::Summary,
        format!("Files failed: {}", report.failures.len()),
    ));
    lines.push(ReportLine::new(
        LineKind::Summary,
        format!("Duplicate groups: {} ({} redundant file(s))", groups, redundant),
    ));
    if report.interrupted {
        let text = if report.skipped > 0 {
            format!("Interrupted: {} file(s) not hashed", report.skipped)
        } else {
            "Interrupted: directory walk stopped early".to_string()
        };
        lines.push(ReportLine::new(LineKind::Failure, text));
    }

    lines
}

/// Write a plain-text scan report
///
/// # Arguments
/// * `output_path` - Path to output file
/// * `report` - Scan to write
pub fn write_report(output_path: &Path, report: &ScanReport) -> Result<()> {
    let mut file = BufWriter::new(File::create(output_path)?);

    writeln!(file, "Duplicate File Report")?;
    writeln!(file, "=====================")?;
    writeln!(file)?;

    for line in render_duplicates(&report.digests)
        .iter()
        .chain(render_summary(report).iter())
    {
        writeln!(file, "{}", line.text)?;
    }

    file.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    duplicates: Vec<&'a DuplicateInfo>,
    failures: &'a [FileFailure],
    hashed: usize,
    skipped: usize,
    interrupted: bool,
}

/// Write duplicate groups and failures as pretty JSON
pub fn write_json_report(output_path: &Path, report: &ScanReport) -> Result<()> {
    let json = JsonReport {
        duplicates: report.digests.duplicates().collect(),
        failures: &report.failures,
        hashed: report.hashed,
        skipped: report.skipped,
        interrupted: report.interrupted,
    };
    let file = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(file, &json)?;
    Ok(())
}
