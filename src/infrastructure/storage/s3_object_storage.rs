use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::{ByteStream, DateTime as S3DateTime};
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::application::ports::{ObjectPayload, ObjectStorage, StorageError};
use crate::config::Config;
use crate::domain::entities::ObjectSummary;

/// Object storage backed by an S3 bucket
#[derive(Clone)]
pub struct S3ObjectStorage {
    client: Client,
    bucket: String,
}

impl S3ObjectStorage {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from static credentials in the configuration
    pub fn from_config(config: &Config) -> Self {
        let credentials = Credentials::new(
            config.aws_access_key_id.clone(),
            config.aws_secret_access_key.clone(),
            None,
            None,
            "environment",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.s3_endpoint_url {
            builder = builder.endpoint_url(endpoint.clone()).force_path_style(true);
        }

        Self::new(Client::from_conf(builder.build()), config.bucket_name.clone())
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn unavailable<E>(operation: &str, err: E) -> StorageError
    where
        E: std::error::Error,
    {
        let message = DisplayErrorContext(err).to_string();
        warn!(operation, error = %message, "object store request failed");
        StorageError::Unavailable(message)
    }
}

fn to_utc(timestamp: &S3DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectSummary>, StorageError> {
        let mut objects = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let response = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| Self::unavailable("list_objects_v2", e))?;

            for object in response.contents() {
                let Some(key) = object.key() else {
                    continue;
                };
                objects.push(ObjectSummary {
                    key: key.to_string(),
                    size: object.size().unwrap_or_default().max(0) as u64,
                    last_modified: object
                        .last_modified()
                        .and_then(to_utc)
                        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
                });
            }

            match response.next_continuation_token() {
                Some(token) => continuation_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!(bucket = %self.bucket, prefix, count = objects.len(), "listed objects");
        Ok(objects)
    }

    async fn exists(&self, prefix: &str) -> Result<bool, StorageError> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .max_keys(1)
            .send()
            .await
            .map_err(|e| Self::unavailable("list_objects_v2", e))?;

        Ok(!response.contents().is_empty())
    }

    async fn put_marker(&self, prefix: &str) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(prefix)
            .content_length(0)
            .body(ByteStream::from_static(b""))
            .send()
            .await
            .map_err(|e| Self::unavailable("put_object", e))?;

        debug!(bucket = %self.bucket, prefix, "folder marker written");
        Ok(())
    }

    async fn put_object(&self, key: &str, payload: ObjectPayload) -> Result<u64, StorageError> {
        let ObjectPayload {
            mut reader,
            content_length,
            content_type,
        } = payload;

        // PutObject needs the full length up front, so the payload is buffered.
        let capacity = content_length.unwrap_or(0).min(64 * 1024 * 1024) as usize;
        let mut buffer = Vec::with_capacity(capacity);
        reader
            .read_to_end(&mut buffer)
            .await
            .map_err(|e| StorageError::UploadFailed(format!("payload read failed: {e}")))?;

        if let Some(expected) = content_length {
            if expected != buffer.len() as u64 {
                return Err(StorageError::UploadFailed(format!(
                    "payload truncated: expected {expected} bytes, read {}",
                    buffer.len()
                )));
            }
        }

        let size_bytes = buffer.len() as u64;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .set_content_type(content_type)
            .body(ByteStream::from(buffer))
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(e).to_string();
                warn!(key, error = %message, "object upload failed");
                StorageError::UploadFailed(message)
            })?;

        Ok(size_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_s3_timestamps() {
        let ts = S3DateTime::from_secs(1_700_000_000);
        let converted = to_utc(&ts).unwrap();
        assert_eq!(converted.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn from_config_keeps_bucket() {
        let config = Config::from_lookup(|key| match key {
            "AWS_ACCESS_KEY_ID" => Some("AKIAEXAMPLE".to_string()),
            "AWS_SECRET_ACCESS_KEY" => Some("secret".to_string()),
            "AWS_STORAGE_BUCKET_NAME" => Some("certificates".to_string()),
            "S3_ENDPOINT_URL" => Some("http://localhost:9000".to_string()),
            _ => None,
        });

        let storage = S3ObjectStorage::from_config(&config);
        assert_eq!(storage.bucket(), "certificates");
    }
}
