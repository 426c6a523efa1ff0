//! Filesystem-backed run-provenance store.
//!
//! Each execution of a program becomes a [`Record`]: a metadata document
//! plus any number of append-only blob streams, stored under
//! `<root>/ab/cd/ef/01/<id>/`. Records can link to the ids of other
//! records to declare what they were derived from.
//!
//! ```no_run
//! # async fn run() -> mound_store::StoreResult<()> {
//! use mound_store::{Mound, StoreConfig};
//!
//! let mound = Mound::new(&StoreConfig::new("/var/lib/mound")?)?;
//! let record = mound.create("build", "semver|1.0.0")?;
//! record.await_ready().await?;
//!
//! let log = record.create_stream(Some("log")).await?;
//! log.append_line("compiling").await?;
//!
//! record.finalize(0).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # On-disk Layout
//!
//! - `doc` -- single-line JSON metadata document, rewritten on every change
//! - `0`, `1`, ... -- blob streams, named by slot index
//!
//! # Design Rules
//!
//! 1. Metadata rewrites are serialized per record and land in request order.
//! 2. Appends to one slot land in call order; slots are independent.
//! 3. Arguments are validated before any I/O; rejected calls change nothing.
//! 4. All I/O errors are propagated, never silently ignored.
//! 5. Document writes are plain overwrites: a crash mid-write can leave a
//!    truncated or stale `doc`.

pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod mound;
pub mod record;
pub mod stream;

// Re-export primary types at crate root for ergonomic imports.
pub use config::{StoreConfig, DATA_DIR_ENV};
pub use document::{RecordDocument, DOC_FILE};
pub use error::{StoreError, StoreResult};
pub use mound::Mound;
pub use mound_types::{BlobDescriptor, RecordId, Status};
pub use record::Record;
pub use stream::Stream;
