//! Integration tests for duplicate detection
//!
//! Covers grouping behavior over real directory trees in both sequential
//! and pooled modes.

use eternals_rs::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Duplicate groups as order-independent sets, for comparing pooled runs
fn group_sets(report: &ScanReport) -> BTreeSet<(String, BTreeSet<PathBuf>)> {
    report
        .duplicate_groups()
        .into_iter()
        .map(|g| (g.hash, g.paths.into_iter().collect()))
        .collect()
}

/// Test the hello/hello/world scenario
#[test]
fn test_two_identical_one_different() {
    let temp_dir = TempDir::new().unwrap();
    let a = write(temp_dir.path(), "a.txt", b"hello");
    let b = write(temp_dir.path(), "b.txt", b"hello");
    let c = write(temp_dir.path(), "c.txt", b"world");

    let report = scan_directory(temp_dir.path(), &ScanOptions::sequential()).unwrap();

    let groups = report.duplicate_groups();
    assert_eq!(groups.len(), 1, "Exactly one duplicate group");
    assert_eq!(groups[0].paths, vec![a, b]);
    assert_eq!(groups[0].hash, "5d41402abc4b2a76b9719d911017c592");

    // The differing file stays in the raw map as a singleton
    let world = compute_digest(&c).unwrap();
    assert_eq!(report.digests.get(&world).unwrap(), &[c]);
    assert_eq!(report.digests.len(), 2);

    let rendered: Vec<String> = render_duplicates(&report.digests)
        .into_iter()
        .map(|l| l.text)
        .collect();
    assert!(!rendered.iter().any(|t| t.contains("c.txt")));
}

/// Test that distinct contents produce only singleton groups
#[test]
fn test_distinct_contents_have_no_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..10 {
        write(temp_dir.path(), &format!("file_{}.bin", i), format!("content {}", i).as_bytes());
    }

    let report = scan_directory(temp_dir.path(), &ScanOptions::sequential()).unwrap();

    assert_eq!(report.digests.len(), 10);
    assert!(report.digests.iter().all(|g| g.paths.len() == 1));
    assert!(report.duplicate_groups().is_empty());
}

/// Test that an empty directory yields an empty map and the no-duplicates line
#[test]
fn test_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    let report = scan_directory(temp_dir.path(), &ScanOptions::sequential()).unwrap();

    assert!(report.digests.is_empty());
    assert_eq!(report.hashed, 0);
    let lines = render_duplicates(&report.digests);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, NO_DUPLICATES);
}

/// Test that a missing root fails before any hashing
#[test]
fn test_missing_root_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does_not_exist");

    for options in [ScanOptions::sequential(), ScanOptions::parallel()] {
        let err = scan_directory(&missing, &options).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(ref p) if p == &missing));
    }
}

/// Test that groups span nested directories in walk order
#[test]
fn test_nested_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let top = write(temp_dir.path(), "copy.dat", b"payload");
    let deep = write(temp_dir.path(), "x/y/z/copy.dat", b"payload");
    let mid = write(temp_dir.path(), "x/other.dat", b"payload");

    let report = scan_directory(temp_dir.path(), &ScanOptions::sequential()).unwrap();
    let groups = report.duplicate_groups();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].paths, vec![top, mid, deep]);
}

/// Test that sequential and pooled scans agree on the set of groups
#[test]
fn test_sequential_and_parallel_agree() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..40 {
        // Eight distinct contents, five copies each
        let content = format!("bucket {}", i % 8);
        write(temp_dir.path(), &format!("d{}/f{}.txt", i % 3, i), content.as_bytes());
    }
    write(temp_dir.path(), "unique.txt", b"only one of me");

    let sequential = scan_directory(temp_dir.path(), &ScanOptions::sequential()).unwrap();
    let parallel =
        scan_directory(temp_dir.path(), &ScanOptions::parallel().with_workers(4)).unwrap();

    assert_eq!(sequential.duplicate_groups().len(), 8);
    assert_eq!(group_sets(&sequential), group_sets(&parallel));
    assert_eq!(sequential.hashed, parallel.hashed);
}

/// Test that each file lands in exactly one group
#[test]
fn test_each_file_hashed_once() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..25 {
        write(temp_dir.path(), &format!("f{}", i), &[(i % 4) as u8; 100]);
    }

    let report = scan_directory(temp_dir.path(), &ScanOptions::parallel()).unwrap();

    let all: Vec<&PathBuf> = report.digests.iter().flat_map(|g| g.paths.iter()).collect();
    let unique: BTreeSet<&PathBuf> = all.iter().copied().collect();
    assert_eq!(all.len(), 25);
    assert_eq!(unique.len(), 25);
    assert_eq!(report.digests.file_count(), 25);
}

/// Test digest determinism and single-byte sensitivity
#[test]
fn test_digest_deterministic_and_sensitive() {
    let temp_dir = TempDir::new().unwrap();
    let mut content = vec![7u8; 10_000];
    let path = write(temp_dir.path(), "data.bin", &content);

    let first = compute_digest(&path).unwrap();
    let second = compute_digest(&path).unwrap();
    assert_eq!(first, second);

    content[5_000] ^= 0x01;
    fs::write(&path, &content).unwrap();
    let changed = compute_digest(&path).unwrap();
    assert_ne!(first, changed);
}

/// Test that the report file lists each qualifying group once
#[test]
fn test_report_file_lists_groups() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data");
    write(&data, "a.txt", b"hello");
    write(&data, "b.txt", b"hello");
    write(&data, "c.txt", b"world");

    let report = scan_directory(&data, &ScanOptions::sequential()).unwrap();
    let output = temp_dir.path().join("report.txt");
    write_report(&output, &report).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content.matches("Hash: ").count(), 1);
    assert!(content.contains("Files hashed: 3"));
    assert!(content.contains("Files failed: 0"));
}
