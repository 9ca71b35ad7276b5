//! Streaming MD5 content digests

use md5::{Digest, Md5};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::{catch_worker_panic, Result, ScanError};

/// Size of each read folded into the hash accumulator
pub const CHUNK_SIZE: usize = 4096;

/// Compute the MD5 digest of a file
///
/// The file is streamed in [`CHUNK_SIZE`] chunks, so memory use does not
/// grow with file size.
///
/// # Arguments
/// * `path` - Path to a readable regular file
///
/// # Returns
/// Lower-case hex MD5 digest (32 characters)
pub fn compute_digest(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| ScanError::io(path, e))?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(|e| ScanError::io(path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}

/// Digest a file with panic isolation
///
/// Used by pool workers: a panic while hashing one file becomes a
/// per-file [`ScanError::Worker`] instead of tearing down the pool.
pub fn compute_digest_isolated(path: &Path) -> Result<String> {
    catch_worker_panic(path, || compute_digest(path))
}
