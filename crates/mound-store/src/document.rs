use std::path::{Path, PathBuf};

use mound_types::{shard_path, BlobDescriptor, RecordId, Status};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// File name of the metadata document inside a record directory.
pub const DOC_FILE: &str = "doc";

/// The metadata document of one record.
///
/// Written as a single line of compact JSON followed by `\n`. Field order
/// is part of the on-disk format: `did`, `program`, `version`, `status`,
/// `blobs`, `sources`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDocument {
    pub did: RecordId,
    pub program: String,
    pub version: String,
    pub status: Status,
    pub blobs: Vec<BlobDescriptor>,
    /// Linked record ids, verbatim as passed to `link`.
    pub sources: Vec<String>,
}

impl RecordDocument {
    /// Fresh, unfinished document with no blobs or sources.
    pub fn new(did: RecordId, program: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            did,
            program: program.into(),
            version: version.into(),
            status: Status::UNFINISHED,
            blobs: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Encode as one JSON line, terminator included.
    pub fn to_line(&self) -> StoreResult<Vec<u8>> {
        let mut line =
            serde_json::to_vec(self).map_err(|e| StoreError::Serialization(e.to_string()))?;
        line.push(b'\n');
        Ok(line)
    }

    /// Decode from the bytes of a `doc` file.
    pub fn from_slice(data: &[u8]) -> StoreResult<Self> {
        serde_json::from_slice(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Path of the document for record `did` under `root`.
    pub fn path(root: &Path, did: &RecordId) -> PathBuf {
        shard_path(root, did).join(DOC_FILE)
    }

    /// Read the stored document of record `did` under `root`.
    pub async fn load(root: &Path, did: &RecordId) -> StoreResult<Self> {
        let data = tokio::fs::read(Self::path(root, did)).await?;
        Self::from_slice(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_id() -> RecordId {
        "0f8fad5b-d9cb-469f-a165-70867728950e".parse().unwrap()
    }

    #[test]
    fn new_document_is_empty_and_unfinished() {
        let doc = RecordDocument::new(sample_id(), "prog", "1.0");
        assert_eq!(doc.status, Status::UNFINISHED);
        assert!(doc.blobs.is_empty());
        assert!(doc.sources.is_empty());
    }

    #[test]
    fn line_format_is_exact() {
        let mut doc = RecordDocument::new(sample_id(), "mound", "0.0.1-test");
        doc.blobs.push(BlobDescriptor::Named("input".into()));
        doc.blobs.push(BlobDescriptor::Indexed(1));
        doc.sources.push("ABCDEF01-2345-6789-abcd-ef0123456789".into());
        doc.status = Status::SUCCESS;

        let line = String::from_utf8(doc.to_line().unwrap()).unwrap();
        assert_eq!(
            line,
            concat!(
                r#"{"did":"0f8fad5b-d9cb-469f-a165-70867728950e","program":"mound","#,
                r#""version":"0.0.1-test","status":0,"blobs":["input",1],"#,
                r#""sources":["ABCDEF01-2345-6789-abcd-ef0123456789"]}"#,
                "\n"
            )
        );
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn decodes_written_line() {
        let doc = RecordDocument::new(sample_id(), "p", "v");
        let decoded = RecordDocument::from_slice(&doc.to_line().unwrap()).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn truncated_document_is_a_serialization_error() {
        let err = RecordDocument::from_slice(br#"{"did":"0f8fad5b"#).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn path_is_inside_shard_directory() {
        let path = RecordDocument::path(Path::new("/root"), &sample_id());
        assert_eq!(
            path,
            PathBuf::from("/root/0f/8f/ad/5b/0f8fad5b-d9cb-469f-a165-70867728950e/doc")
        );
    }

    #[tokio::test]
    async fn load_missing_document_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RecordDocument::load(dir.path(), &sample_id()).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
