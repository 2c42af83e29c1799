use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    response::Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::application::dto::{UploadFileRequest, UploadFileResponse};
use crate::application::ports::ObjectPayload;
use crate::application::use_cases::UploadFileUseCase;

pub const FILE_FIELD: &str = "pdf_file";

fn multipart_error(err: MultipartError) -> ApiError {
    ApiError::new(err.status(), err.body_text())
}

/// POST /upload_certificate_view
/// Upload a file under `{name}/{certificate_type}/{document_name}/`
#[utoipa::path(
    post,
    path = "/upload_certificate_view",
    tag = "files",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "Text parts `name`, `certificate_type`, `document_name` and a file part `pdf_file`"
    ),
    responses(
        (status = 200, description = "File stored", body = UploadFileResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Session required"),
        (status = 413, description = "Payload too large"),
        (status = 500, description = "Folder check, folder creation or upload failed")
    )
)]
pub async fn upload_handler(
    State(use_case): State<Arc<UploadFileUseCase>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadFileResponse>, ApiError> {
    let mut request = UploadFileRequest::default();
    let mut payload = None;

    // A body that is not multipart carries none of the required fields
    if let Ok(mut multipart) = multipart {
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "name" => request.name = Some(field.text().await.map_err(multipart_error)?),
                "certificate_type" => {
                    request.certificate_type = Some(field.text().await.map_err(multipart_error)?)
                }
                "document_name" => {
                    request.document_name = Some(field.text().await.map_err(multipart_error)?)
                }
                FILE_FIELD => {
                    request.file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await.map_err(multipart_error)?;
                    payload = Some(ObjectPayload::from_bytes(data).with_content_type(content_type));
                }
                other => debug!(field = %other, "ignoring unknown multipart field"),
            }
        }
    }

    let response = use_case.execute(request, payload).await?;
    Ok(Json(response))
}
