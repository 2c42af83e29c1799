use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::dto::{FileEntryDto, ListFilesRequest, ListFilesResponse};
use crate::application::ports::{ObjectStorage, StorageError};
use crate::application::validation::{key_segment, present};
use crate::domain::entities::FileEntry;
use crate::domain::errors::DomainError;
use crate::domain::key_builder::{build_category_prefix, build_prefix};

pub const MISSING_LIST_FIELDS: &str = "Missing required fields: name or certificate_type.";

#[derive(Debug, Error)]
pub enum ListFilesError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Error fetching files: {0}")]
    Storage(#[from] StorageError),
}

impl From<DomainError> for ListFilesError {
    fn from(err: DomainError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

/// Use case: list the files stored under a user's document prefix
pub struct ListFilesUseCase {
    storage: Arc<dyn ObjectStorage>,
}

impl ListFilesUseCase {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    pub async fn execute(
        &self,
        request: ListFilesRequest,
    ) -> Result<ListFilesResponse, ListFilesError> {
        // 1. Validate required fields
        let (Some(name), Some(certificate_type)) = (
            present(request.name.as_deref()),
            present(request.certificate_type.as_deref()),
        ) else {
            return Err(ListFilesError::InvalidRequest(
                MISSING_LIST_FIELDS.to_string(),
            ));
        };

        let user = key_segment("name", name)?;
        let category = key_segment("certificate_type", certificate_type)?;

        // 2. Build prefix; without a label the whole category is listed
        let prefix = match present(request.document_name.as_deref()) {
            Some(label) => {
                let label = key_segment("document_name", label)?;
                build_prefix(user.as_str(), category.as_str(), label.as_str())
            }
            None => build_category_prefix(user.as_str(), category.as_str()),
        };

        // 3. Query storage
        debug!(prefix = %prefix, "listing files");
        let objects = self.storage.list(&prefix).await?;

        // 4. Convert to DTOs
        let files: Vec<FileEntryDto> = objects
            .into_iter()
            .map(FileEntry::from)
            .map(FileEntryDto::from)
            .collect();

        info!(prefix = %prefix, count = files.len(), "files listed");

        Ok(ListFilesResponse::from_files(files))
    }
}
