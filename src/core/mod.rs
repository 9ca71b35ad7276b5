//! Content digests, video durations and the shared error type

pub mod digest;
pub mod duration;
pub mod error;

pub use digest::{compute_digest, compute_digest_isolated, CHUNK_SIZE};
pub use duration::{is_video_file, video_duration, VIDEO_EXTENSIONS};
pub use error::{catch_worker_panic, Result, ScanError};
