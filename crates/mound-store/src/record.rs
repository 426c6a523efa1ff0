use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mound_types::{is_valid_record_id, shard_path, BlobDescriptor, RecordId, Status};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::context;
use crate::document::{RecordDocument, DOC_FILE};
use crate::error::{StoreError, StoreResult};
use crate::stream::Stream;

/// Progress of the background step that provisions a record on disk.
enum Readiness {
    Pending(JoinHandle<StoreResult<()>>),
    Ready,
    Failed(String),
}

/// In-memory state guarded by the per-record document lock.
///
/// A record counts as finalized once its document carries a finished
/// status, so the flag on disk and in memory cannot disagree.
struct RecordState {
    doc: RecordDocument,
}

struct RecordInner {
    id: RecordId,
    dir: PathBuf,
    /// Held across every read-modify-write of the metadata document, so
    /// rewrites land on disk in the order they were requested.
    state: Mutex<RecordState>,
    readiness: Mutex<Readiness>,
    /// One append lock per created slot; the vector length is the slot count.
    slots: std::sync::Mutex<Vec<Arc<Mutex<()>>>>,
}

/// One program execution: metadata document plus append-only blob streams.
///
/// Creating a record returns immediately while its directory and initial
/// document are written in the background. Every operation that touches
/// the metadata document waits for that step first; callers that need the
/// files on disk call [`Record::await_ready`].
///
/// `Record` is a cheap handle: clones share the same underlying record.
#[derive(Clone)]
pub struct Record {
    inner: Arc<RecordInner>,
}

impl Record {
    /// Create a record under the process-wide store root.
    ///
    /// Fails with [`StoreError::Unconfigured`] unless
    /// [`context::configure`] has been called.
    pub fn create(program: &str, version: &str) -> StoreResult<Self> {
        let config = context::current();
        Self::create_in(config.root()?, program, version)
    }

    /// Create a record under `root`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn create_in(root: impl AsRef<Path>, program: &str, version: &str) -> StoreResult<Self> {
        require_text("program", program)?;
        require_text("version", version)?;
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| StoreError::NoRuntime)?;

        let id = RecordId::generate();
        let dir = shard_path(root.as_ref(), &id);
        let doc = RecordDocument::new(id, program, version);
        let initial = doc.to_line()?;

        let provision = runtime.spawn(provision(dir.clone(), initial));
        info!(did = %id, program, version, dir = %dir.display(), "record created");

        Ok(Self {
            inner: Arc::new(RecordInner {
                id,
                dir,
                state: Mutex::new(RecordState { doc }),
                readiness: Mutex::new(Readiness::Pending(provision)),
                slots: std::sync::Mutex::new(Vec::new()),
            }),
        })
    }

    /// Wait for the record's directory and initial document to exist.
    ///
    /// The first caller after a failed provisioning receives the original
    /// error; later callers receive [`StoreError::Provisioning`].
    pub async fn await_ready(&self) -> StoreResult<()> {
        let mut readiness = self.inner.readiness.lock().await;
        match &mut *readiness {
            Readiness::Ready => Ok(()),
            Readiness::Failed(reason) => Err(StoreError::Provisioning(reason.clone())),
            Readiness::Pending(handle) => {
                let outcome = match handle.await {
                    Ok(result) => result,
                    Err(e) => Err(StoreError::Provisioning(e.to_string())),
                };
                match outcome {
                    Ok(()) => {
                        *readiness = Readiness::Ready;
                        Ok(())
                    }
                    Err(e) => {
                        warn!(did = %self.inner.id, error = %e, "record provisioning failed");
                        *readiness = Readiness::Failed(e.to_string());
                        Err(e)
                    }
                }
            }
        }
    }

    /// Set the completion status and rewrite the document.
    ///
    /// May be called more than once; the last call wins. Passing
    /// [`Status::UNFINISHED`] reopens the record for metadata changes.
    pub async fn finalize(&self, status: impl Into<Status>) -> StoreResult<()> {
        let status = status.into();
        self.await_ready().await?;

        let mut state = self.inner.state.lock().await;
        let mut next = state.doc.clone();
        next.status = status;
        self.persist(&next).await?;
        state.doc = next;

        info!(did = %self.inner.id, %status, "record finalized");
        Ok(())
    }

    /// Declare a dependency on another record by id.
    ///
    /// The target must be a canonical record id; it is not checked for
    /// existence. Linking the same id twice stores it once.
    pub async fn link(&self, target: &str) -> StoreResult<()> {
        if !is_valid_record_id(target) {
            return Err(StoreError::InvalidIdentifier(target.to_string()));
        }
        self.await_ready().await?;

        let mut state = self.inner.state.lock().await;
        self.ensure_open(&state)?;
        let mut next = state.doc.clone();
        if !next.sources.iter().any(|source| source == target) {
            next.sources.push(target.to_string());
        }
        self.persist(&next).await?;
        state.doc = next;

        debug!(did = %self.inner.id, source = target, "record linked");
        Ok(())
    }

    /// Link to the record with id `target`.
    pub async fn link_id(&self, target: &RecordId) -> StoreResult<()> {
        self.link(&target.to_canonical()).await
    }

    /// Allocate the next blob slot and return its index.
    ///
    /// An unnamed slot is listed in the document by its index.
    pub async fn create_blob_slot(&self, name: Option<&str>) -> StoreResult<u64> {
        if let Some(name) = name {
            require_text("blob name", name)?;
        }
        self.await_ready().await?;

        let mut state = self.inner.state.lock().await;
        self.ensure_open(&state)?;
        let index = state.doc.blobs.len() as u64;
        let mut next = state.doc.clone();
        next.blobs.push(BlobDescriptor::for_slot(index, name));
        self.persist(&next).await?;
        state.doc = next;
        self.inner
            .slots
            .lock()
            .expect("slot table lock poisoned")
            .push(Arc::new(Mutex::new(())));

        debug!(did = %self.inner.id, slot = index, name = ?name, "blob slot created");
        Ok(index)
    }

    /// Allocate a blob slot and return a [`Stream`] bound to it.
    pub async fn create_stream(&self, name: Option<&str>) -> StoreResult<Stream> {
        let slot = self.create_blob_slot(name).await?;
        Ok(Stream::new(self.clone(), slot))
    }

    /// A [`Stream`] for an already created slot.
    pub fn stream(&self, slot: u64) -> StoreResult<Stream> {
        self.slot_lock(slot)?;
        Ok(Stream::new(self.clone(), slot))
    }

    /// Append raw bytes to a blob slot, creating its file on first use.
    ///
    /// Appends to the same slot are applied in call order; appends to
    /// different slots proceed independently.
    pub async fn append(&self, slot: u64, data: impl AsRef<[u8]>) -> StoreResult<()> {
        let lock = self.slot_lock(slot)?;
        let _guard = lock.lock().await;

        let data = data.as_ref();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.blob_path(slot))
            .await?;
        file.write_all(data).await?;
        file.flush().await?;

        debug!(did = %self.inner.id, slot, bytes = data.len(), "blob appended");
        Ok(())
    }

    /// Append `data` followed by a single `\n`.
    pub async fn append_line(&self, slot: u64, data: impl AsRef<[u8]>) -> StoreResult<()> {
        let data = data.as_ref();
        let mut line = Vec::with_capacity(data.len() + 1);
        line.extend_from_slice(data);
        line.push(b'\n');
        self.append(slot, line).await
    }

    /// Append formatted text, e.g. `record.append_fmt(0, format_args!("{n} items"))`.
    pub fn append_fmt(
        &self,
        slot: u64,
        args: fmt::Arguments<'_>,
    ) -> impl Future<Output = StoreResult<()>> + Send + '_ {
        let text = args.to_string();
        self.append(slot, text)
    }

    pub fn id(&self) -> RecordId {
        self.inner.id
    }

    /// Directory holding this record's document and blobs.
    pub fn dir(&self) -> &Path {
        &self.inner.dir
    }

    pub fn doc_path(&self) -> PathBuf {
        self.inner.dir.join(DOC_FILE)
    }

    /// File backing blob `slot`. Named by index, never by blob name.
    pub fn blob_path(&self, slot: u64) -> PathBuf {
        self.inner.dir.join(slot.to_string())
    }

    /// Number of blob slots created so far.
    pub fn blob_count(&self) -> u64 {
        self.inner.slots.lock().expect("slot table lock poisoned").len() as u64
    }

    /// Current in-memory document.
    pub async fn snapshot(&self) -> RecordDocument {
        self.inner.state.lock().await.doc.clone()
    }

    pub async fn status(&self) -> Status {
        self.inner.state.lock().await.doc.status
    }

    pub async fn is_finalized(&self) -> bool {
        self.inner.state.lock().await.doc.status.is_finished()
    }

    fn ensure_open(&self, state: &RecordState) -> StoreResult<()> {
        if state.doc.status.is_finished() {
            return Err(StoreError::Finalized(self.inner.id));
        }
        Ok(())
    }

    fn slot_lock(&self, slot: u64) -> StoreResult<Arc<Mutex<()>>> {
        let slots = self.inner.slots.lock().expect("slot table lock poisoned");
        usize::try_from(slot)
            .ok()
            .and_then(|i| slots.get(i))
            .cloned()
            .ok_or_else(|| {
                StoreError::InvalidArgument(format!(
                    "blob slot {slot} has not been created (record has {})",
                    slots.len()
                ))
            })
    }

    /// Overwrite the document file with `doc`. Caller holds the state lock.
    async fn persist(&self, doc: &RecordDocument) -> StoreResult<()> {
        let line = doc.to_line()?;
        fs::write(self.doc_path(), line).await?;
        debug!(did = %self.inner.id, "document written");
        Ok(())
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("id", &self.inner.id)
            .field("dir", &self.inner.dir)
            .field("blob_count", &self.blob_count())
            .finish()
    }
}

/// Create the record directory (idempotent) and write the initial document.
async fn provision(dir: PathBuf, initial: Vec<u8>) -> StoreResult<()> {
    fs::create_dir_all(&dir).await?;
    fs::write(dir.join(DOC_FILE), initial).await?;
    Ok(())
}

fn require_text(what: &str, value: &str) -> StoreResult<()> {
    if value.is_empty() {
        return Err(StoreError::InvalidArgument(format!(
            "{what} may not be an empty string"
        )));
    }
    Ok(())
}
