use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::dto::{UploadFileRequest, UploadFileResponse};
use crate::application::ports::{ObjectPayload, ObjectStorage, StorageError};
use crate::application::validation::{key_segment, present};
use crate::domain::errors::DomainError;
use crate::domain::key_builder::{build_folder_prefix, build_key, ensure_key_length};

pub const MISSING_UPLOAD_FIELDS: &str =
    "Missing required fields: name, certificate_type, document_name, or pdf_file.";

#[derive(Debug, Error)]
pub enum UploadFileError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Error checking folder existence: {0}")]
    FolderCheck(StorageError),

    #[error("Error creating folder: {0}")]
    FolderCreate(StorageError),

    #[error("File upload failed: {0}")]
    Upload(StorageError),
}

impl From<DomainError> for UploadFileError {
    fn from(err: DomainError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

/// Use case: store a document under `{name}/{certificate_type}/{document_name}/`
pub struct UploadFileUseCase {
    storage: Arc<dyn ObjectStorage>,
}

impl UploadFileUseCase {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// Execute upload workflow
    pub async fn execute(
        &self,
        request: UploadFileRequest,
        payload: Option<ObjectPayload>,
    ) -> Result<UploadFileResponse, UploadFileError> {
        // 1. Validate request; nothing touches storage before this passes
        let (Some(name), Some(certificate_type), Some(document_name), Some(file_name), Some(payload)) = (
            present(request.name.as_deref()),
            present(request.certificate_type.as_deref()),
            present(request.document_name.as_deref()),
            present(request.file_name.as_deref()),
            payload,
        ) else {
            return Err(UploadFileError::InvalidRequest(
                MISSING_UPLOAD_FIELDS.to_string(),
            ));
        };

        let user = key_segment("name", name)?;
        let category = key_segment("certificate_type", certificate_type)?;
        let label = key_segment("document_name", document_name)?;
        let file_name = key_segment("pdf_file", file_name)?;

        // 2. Build folder prefix and final key
        let folder = build_folder_prefix(user.as_str(), category.as_str(), label.as_str());
        let file_key = build_key(&folder, file_name.as_str());
        ensure_key_length(&file_key)?;

        // 3. Make sure the folder marker exists
        let folder_exists = self
            .storage
            .exists(&folder)
            .await
            .map_err(UploadFileError::FolderCheck)?;

        if !folder_exists {
            debug!(folder = %folder, "creating folder marker");
            self.storage
                .put_marker(&folder)
                .await
                .map_err(UploadFileError::FolderCreate)?;
        }

        // 4. Upload payload
        let size_bytes = self
            .storage
            .put_object(&file_key, payload)
            .await
            .map_err(UploadFileError::Upload)?;

        info!(file_key = %file_key, size_bytes, "file uploaded");

        Ok(UploadFileResponse::new(file_key))
    }
}
