use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::domain::entities::ObjectSummary;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Transport, credential or service failure while querying the store
    #[error("{0}")]
    Unavailable(String),

    /// The payload could not be written (transport failure or unreadable stream)
    #[error("{0}")]
    UploadFailed(String),
}

/// Type alias for an upload payload stream
pub type PayloadReader = Pin<Box<dyn AsyncRead + Send>>;

/// File contents handed to [`ObjectStorage::put_object`].
pub struct ObjectPayload {
    pub reader: PayloadReader,
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
}

impl ObjectPayload {
    pub fn new(reader: PayloadReader) -> Self {
        Self {
            reader,
            content_length: None,
            content_type: None,
        }
    }

    /// Payload backed by an in-memory buffer
    pub fn from_bytes(bytes: bytes::Bytes) -> Self {
        let content_length = Some(bytes.len() as u64);
        Self {
            reader: Box::pin(std::io::Cursor::new(bytes)),
            content_length,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }
}

/// Port for the external object store.
///
/// Every call is a single attempt; failures surface to the caller unchanged.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// All objects whose key starts with `prefix`. No match is an empty vector.
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectSummary>, StorageError>;

    /// Whether at least one object lives under `prefix`
    async fn exists(&self, prefix: &str) -> Result<bool, StorageError>;

    /// Write a zero-byte placeholder at `prefix`. Safe to repeat.
    async fn put_marker(&self, prefix: &str) -> Result<(), StorageError>;

    /// Write the payload at `key`, replacing any existing object.
    /// Returns the number of bytes stored.
    async fn put_object(&self, key: &str, payload: ObjectPayload) -> Result<u64, StorageError>;
}
