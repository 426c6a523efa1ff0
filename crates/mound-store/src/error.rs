use mound_types::{RecordId, TypeError};

/// Errors from record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An argument failed validation before any I/O was attempted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A link target is not a canonical record id.
    #[error("invalid record identifier: {0:?}")]
    InvalidIdentifier(String),

    /// I/O error from directory creation, document write, or blob append.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization of the metadata document failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// No store root has been configured.
    #[error("store root is not configured")]
    Unconfigured,

    /// Records provision themselves in the background and need a tokio runtime.
    #[error("no tokio runtime available to provision the record")]
    NoRuntime,

    /// Background provisioning of the record failed earlier.
    #[error("record provisioning failed: {0}")]
    Provisioning(String),

    /// The record was finalized and no longer accepts metadata changes.
    #[error("record {0} is finalized")]
    Finalized(RecordId),

    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
