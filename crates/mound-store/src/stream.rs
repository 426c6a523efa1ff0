use std::fmt;
use std::future::Future;
use std::path::PathBuf;

use crate::error::StoreResult;
use crate::record::Record;

/// Handle to one blob slot of a [`Record`].
///
/// Holds nothing but the owning record and the slot index; every call is
/// forwarded to the record, so two handles for the same slot are
/// interchangeable.
#[derive(Clone, Debug)]
pub struct Stream {
    record: Record,
    slot: u64,
}

impl Stream {
    pub(crate) fn new(record: Record, slot: u64) -> Self {
        Self { record, slot }
    }

    pub fn slot(&self) -> u64 {
        self.slot
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// File backing this stream.
    pub fn path(&self) -> PathBuf {
        self.record.blob_path(self.slot)
    }

    pub async fn append(&self, data: impl AsRef<[u8]>) -> StoreResult<()> {
        self.record.append(self.slot, data).await
    }

    pub async fn append_line(&self, data: impl AsRef<[u8]>) -> StoreResult<()> {
        self.record.append_line(self.slot, data).await
    }

    pub fn append_fmt(
        &self,
        args: fmt::Arguments<'_>,
    ) -> impl Future<Output = StoreResult<()>> + Send + '_ {
        self.record.append_fmt(self.slot, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mound_types::BlobDescriptor;

    async fn ready_record(root: &std::path::Path) -> Record {
        let record = Record::create_in(root, "stream-test", "1").unwrap();
        record.await_ready().await.unwrap();
        record
    }

    #[tokio::test]
    async fn stream_forwards_to_record() {
        let dir = tempfile::tempdir().unwrap();
        let record = ready_record(dir.path()).await;
        let stream = record.create_stream(Some("log")).await.unwrap();

        assert_eq!(stream.slot(), 0);
        assert_eq!(stream.record().id(), record.id());
        stream.append("partial ").await.unwrap();
        stream.append_line("line").await.unwrap();
        stream.append_fmt(format_args!("{}-{}\n", "a", 1)).await.unwrap();

        let data = tokio::fs::read_to_string(stream.path()).await.unwrap();
        assert_eq!(data, "partial line\na-1\n");
        assert_eq!(
            record.snapshot().await.blobs,
            vec![BlobDescriptor::Named("log".into())]
        );
    }

    #[tokio::test]
    async fn handles_for_same_slot_share_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let record = ready_record(dir.path()).await;
        record.create_blob_slot(None).await.unwrap();
        let first = record.stream(0).unwrap();
        let second = record.stream(0).unwrap();

        first.append_line("one").await.unwrap();
        second.append_line("two").await.unwrap();
        record.append_line(0, "three").await.unwrap();

        let data = tokio::fs::read_to_string(first.path()).await.unwrap();
        assert_eq!(data, "one\ntwo\nthree\n");
    }

    #[tokio::test]
    async fn streams_are_independent_per_slot() {
        let dir = tempfile::tempdir().unwrap();
        let record = ready_record(dir.path()).await;
        let out = record.create_stream(None).await.unwrap();
        let err = record.create_stream(Some("stderr")).await.unwrap();

        out.append_line("Hello, mound!").await.unwrap();
        err.append_line("warning").await.unwrap();

        assert_eq!(
            tokio::fs::read_to_string(out.path()).await.unwrap(),
            "Hello, mound!\n"
        );
        assert_eq!(
            tokio::fs::read_to_string(err.path()).await.unwrap(),
            "warning\n"
        );
        assert_eq!(err.slot(), 1);
    }
}
