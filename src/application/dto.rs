use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::FileEntry;

pub const NO_FILES_MESSAGE: &str = "No files found.";
pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully";

/// DTO for a stored file in listing responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileEntryDto {
    /// Last segment of the storage key
    pub file_name: String,
    /// Full storage key
    pub file_key: String,
    /// Size in bytes
    pub size: u64,
    /// RFC 3339 timestamp
    pub last_modified: String,
}

impl From<FileEntry> for FileEntryDto {
    fn from(entry: FileEntry) -> Self {
        Self {
            file_name: entry.name().to_string(),
            file_key: entry.key().to_string(),
            size: entry.size(),
            last_modified: entry.last_modified().to_rfc3339(),
        }
    }
}

/// DTO for list request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ListFilesRequest {
    pub name: Option<String>,
    pub certificate_type: Option<String>,
    pub document_name: Option<String>,
}

/// DTO for list response. Exactly one of `files` or `message` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListFilesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileEntryDto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ListFilesResponse {
    pub fn from_files(files: Vec<FileEntryDto>) -> Self {
        if files.is_empty() {
            return Self {
                files: None,
                message: Some(NO_FILES_MESSAGE.to_string()),
            };
        }
        Self {
            files: Some(files),
            message: None,
        }
    }
}

/// DTO for upload request fields (the payload travels separately)
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UploadFileRequest {
    pub name: Option<String>,
    pub certificate_type: Option<String>,
    pub document_name: Option<String>,
    /// File name of the `pdf_file` part as sent by the client
    pub file_name: Option<String>,
}

/// DTO for upload response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadFileResponse {
    pub message: String,
    pub file_key: String,
}

impl UploadFileResponse {
    pub fn new(file_key: String) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            file_key,
        }
    }
}

/// DTO for login request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Generic `{message}` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
