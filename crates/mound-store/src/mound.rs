use std::path::{Path, PathBuf};

use mound_types::{shard_path, RecordId};

use crate::config::StoreConfig;
use crate::context;
use crate::document::RecordDocument;
use crate::error::StoreResult;
use crate::record::Record;

/// Record factory bound to one store root.
///
/// Prefer this over [`Record::create`] when the root comes from
/// configuration: the root travels with the value instead of living in
/// process-wide state.
#[derive(Clone, Debug)]
pub struct Mound {
    root: PathBuf,
}

impl Mound {
    /// Build a factory from a configuration; fails if it is unconfigured.
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        Ok(Self {
            root: config.root()?.to_path_buf(),
        })
    }

    /// Build a factory from the process-wide context.
    pub fn from_context() -> StoreResult<Self> {
        Self::new(&context::current())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a new record. See [`Record::create_in`].
    pub fn create(&self, program: &str, version: &str) -> StoreResult<Record> {
        Record::create_in(&self.root, program, version)
    }

    /// Directory of record `id` in this store.
    pub fn record_dir(&self, id: &RecordId) -> PathBuf {
        shard_path(&self.root, id)
    }

    /// Read the stored metadata document of record `id`.
    pub async fn load(&self, id: &RecordId) -> StoreResult<RecordDocument> {
        RecordDocument::load(&self.root, id).await
    }
}
