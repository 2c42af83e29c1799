use axum::{
    extract::{Query, State},
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::application::dto::{ListFilesRequest, ListFilesResponse};
use crate::application::use_cases::ListFilesUseCase;

/// POST /list_uploaded_files_view
/// List files stored under `{name}/{certificate_type}/{document_name}`
#[utoipa::path(
    post,
    path = "/list_uploaded_files_view",
    tag = "files",
    params(
        ("name" = String, Query, description = "Owner of the files"),
        ("certificate_type" = String, Query, description = "Certificate category"),
        ("document_name" = Option<String>, Query, description = "Document label; omit to list the whole category")
    ),
    responses(
        (status = 200, description = "Files listed, or `message` when nothing matched", body = ListFilesResponse),
        (status = 400, description = "Missing or invalid parameters"),
        (status = 401, description = "Session required"),
        (status = 500, description = "Storage error")
    )
)]
pub async fn list_files_handler(
    State(use_case): State<Arc<ListFilesUseCase>>,
    Query(query): Query<ListFilesRequest>,
) -> Result<Json<ListFilesResponse>, ApiError> {
    let response = use_case.execute(query).await?;
    Ok(Json(response))
}
