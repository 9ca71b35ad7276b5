//! Playback duration of video containers

use matroska::Matroska;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use super::error::{Result, ScanError};

/// File extensions treated as videos, lower case
pub const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "avi", "mkv"];

/// RIFF header, `hdrl` list header, `avih` chunk header and the 56-byte
/// main AVI header
const AVI_HEADER_LEN: usize = 88;

/// Whether a file name carries one of [`VIDEO_EXTENSIONS`]
///
/// The comparison ignores ASCII case.
pub fn is_video_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Read the playback duration of a video file
///
/// The container is chosen by extension: MP4 via its `moov` header,
/// Matroska via the segment info, AVI via the main header's frame count
/// and frame period.
///
/// # Returns
/// The duration, [`ScanError::Io`] if the file cannot be opened, or
/// [`ScanError::Decode`] if the container cannot be parsed.
pub fn video_duration(path: &Path) -> Result<Duration> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" => mp4_duration(path),
        "mkv" => mkv_duration(path),
        "avi" => avi_duration(path),
        other => Err(ScanError::decode(
            path,
            format!("unsupported container '{}'", other),
        )),
    }
}

fn mp4_duration(path: &Path) -> Result<Duration> {
    let file = File::open(path).map_err(|e| ScanError::io(path, e))?;
    let size = file.metadata().map_err(|e| ScanError::io(path, e))?.len();

    let reader = mp4::Mp4Reader::read_header(BufReader::new(file), size)
        .map_err(|e| ScanError::decode(path, e))?;
    Ok(reader.duration())
}

fn mkv_duration(path: &Path) -> Result<Duration> {
    let file = File::open(path).map_err(|e| ScanError::io(path, e))?;

    let mkv = Matroska::open(file).map_err(|e| ScanError::decode(path, e))?;
    mkv.info
        .duration
        .ok_or_else(|| ScanError::decode(path, "segment info has no duration"))
}

fn avi_duration(path: &Path) -> Result<Duration> {
    let file = File::open(path).map_err(|e| ScanError::io(path, e))?;
    let mut header = [0u8; AVI_HEADER_LEN];
    BufReader::new(file)
        .read_exact(&mut header)
        .map_err(|e| ScanError::decode(path, format!("truncated header: {}", e)))?;

    parse_avi_header(&header).map_err(|message| ScanError::decode(path, message))
}

fn parse_avi_header(header: &[u8; AVI_HEADER_LEN]) -> std::result::Result<Duration, &'static str> {
    if &header[0..4] != b"RIFF" || &header[8..12] != b"AVI " {
        return Err("not a RIFF AVI file");
    }
    if &header[12..16] != b"LIST" || &header[20..24] != b"hdrl" {
        return Err("missing hdrl header list");
    }
    if &header[24..28] != b"avih" {
        return Err("missing main AVI header");
    }

    let micros_per_frame = u64::from(le_u32(header, 32));
    let total_frames = u64::from(le_u32(header, 48));
    Ok(Duration::from_micros(micros_per_frame * total_frames))
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
