//! Sharded directory layout for records.
//!
//! A record lives at `<root>/ab/cd/ef/01/<full-id>/`, where the four
//! two-character segments are the first eight hex digits of its id. Each
//! directory level therefore holds at most 256 children no matter how many
//! records the store accumulates.

use std::path::{Path, PathBuf};

use crate::id::RecordId;

/// Number of path segments produced for one record (4 shards + full id).
pub const SHARD_DEPTH: usize = 5;

/// Split a record id into its directory segments.
///
/// ```
/// use mound_types::{shard_segments, RecordId};
///
/// let id: RecordId = "0f8fad5b-d9cb-469f-a165-70867728950e".parse().unwrap();
/// let segments = shard_segments(&id);
/// assert_eq!(segments[..4], ["0f", "8f", "ad", "5b"]);
/// assert_eq!(segments[4], "0f8fad5b-d9cb-469f-a165-70867728950e");
/// ```
pub fn shard_segments(id: &RecordId) -> [String; SHARD_DEPTH] {
    let full = id.to_canonical();
    [
        full[0..2].to_string(),
        full[2..4].to_string(),
        full[4..6].to_string(),
        full[6..8].to_string(),
        full,
    ]
}

/// Directory holding a record's document and blobs under `root`.
pub fn shard_path(root: &Path, id: &RecordId) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in shard_segments(id) {
        path.push(segment);
    }
    path
}
