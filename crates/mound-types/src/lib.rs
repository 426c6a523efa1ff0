//! Foundation types for Mound, a run-provenance store.
//!
//! Every execution of a program becomes a record identified by a
//! [`RecordId`]. This crate holds the pure, I/O-free pieces shared by the
//! storage layer and its callers.
//!
//! # Key Types
//!
//! - [`RecordId`] -- random UUID identifying one record
//! - [`Status`] -- completion status (`-1` unfinished, `0` success)
//! - [`BlobDescriptor`] -- name-or-index entry for one output stream
//!
//! The [`shard`] module maps a record id to its on-disk directory.

pub mod blob;
pub mod error;
pub mod id;
pub mod shard;
pub mod status;

pub use blob::BlobDescriptor;
pub use error::TypeError;
pub use id::{is_valid_record_id, RecordId};
pub use shard::{shard_path, shard_segments, SHARD_DEPTH};
pub use status::{semver, Status};
