use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::use_cases::{ListFilesError, LoginError, LogoutError, UploadFileError};

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = %self.message, "request failed");
        }

        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}

// Convert use case errors to API errors

impl From<ListFilesError> for ApiError {
    fn from(err: ListFilesError) -> Self {
        match err {
            ListFilesError::InvalidRequest(msg) => ApiError::bad_request(msg),
            e @ ListFilesError::Storage(_) => ApiError::internal_error(e.to_string()),
        }
    }
}

impl From<UploadFileError> for ApiError {
    fn from(err: UploadFileError) -> Self {
        match err {
            UploadFileError::InvalidRequest(msg) => ApiError::bad_request(msg),
            e @ (UploadFileError::FolderCheck(_)
            | UploadFileError::FolderCreate(_)
            | UploadFileError::Upload(_)) => ApiError::internal_error(e.to_string()),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            e @ LoginError::InvalidPayload(_) => ApiError::bad_request(e.to_string()),
            LoginError::InvalidRequest(msg) => ApiError::bad_request(msg),
            e @ LoginError::InvalidCredentials => ApiError::unauthorized(e.to_string()),
            LoginError::Auth(e) => ApiError::internal_error(format!("Authentication error: {}", e)),
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(err: LogoutError) -> Self {
        match err {
            e @ LogoutError::NotAuthenticated => ApiError::unauthorized(e.to_string()),
            LogoutError::Auth(e) => ApiError::internal_error(format!("Authentication error: {}", e)),
        }
    }
}
