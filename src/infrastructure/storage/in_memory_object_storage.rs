use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::io::AsyncReadExt;

use crate::application::ports::{ObjectPayload, ObjectStorage, StorageError};
use crate::domain::entities::ObjectSummary;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    last_modified: DateTime<Utc>,
}

/// Process-local object store with S3 key semantics (flat, ordered keys)
#[derive(Debug, Default)]
pub struct InMemoryObjectStorage {
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl InMemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the object at `key`, if any
    pub fn object(&self, key: &str) -> Option<Bytes> {
        self.objects.read().get(key).map(|o| o.data.clone())
    }

    /// All keys in lexicographic order
    pub fn keys(&self) -> Vec<String> {
        self.objects.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    fn insert(&self, key: &str, data: Bytes) {
        self.objects.write().insert(
            key.to_string(),
            StoredObject {
                data,
                last_modified: Utc::now(),
            },
        );
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectSummary>, StorageError> {
        let objects = self.objects.read();
        Ok(objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, object)| ObjectSummary {
                key: key.clone(),
                size: object.data.len() as u64,
                last_modified: object.last_modified,
            })
            .collect())
    }

    async fn exists(&self, prefix: &str) -> Result<bool, StorageError> {
        let objects = self.objects.read();
        Ok(objects
            .range(prefix.to_string()..)
            .next()
            .is_some_and(|(key, _)| key.starts_with(prefix)))
    }

    async fn put_marker(&self, prefix: &str) -> Result<(), StorageError> {
        self.insert(prefix, Bytes::new());
        Ok(())
    }

    async fn put_object(&self, key: &str, payload: ObjectPayload) -> Result<u64, StorageError> {
        let mut reader = payload.reader;
        let mut buffer = Vec::new();
        reader
            .read_to_end(&mut buffer)
            .await
            .map_err(|e| StorageError::UploadFailed(format!("payload read failed: {e}")))?;

        let size_bytes = buffer.len() as u64;
        self.insert(key, Bytes::from(buffer));
        Ok(size_bytes)
    }
}
