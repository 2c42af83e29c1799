use axum::response::Json;
use utoipa::OpenApi;

use crate::api::handlers::health::HealthResponse;
use crate::application::dto::{
    FileEntryDto, ListFilesResponse, LoginRequest, MessageResponse, UploadFileResponse,
};

/// OpenAPI document for the certificate vault API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Certificate Vault API",
        version = "1.0.0",
        description = "Per-user certificate file storage on S3 with cookie sessions"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::list::list_files_handler,
        crate::api::handlers::upload::upload_handler,
        crate::api::handlers::auth::login_handler,
        crate::api::handlers::auth::logout_handler,
    ),
    components(
        schemas(
            FileEntryDto,
            ListFilesResponse,
            UploadFileResponse,
            LoginRequest,
            MessageResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "files", description = "Listing and uploading certificate files"),
        (name = "session", description = "Cookie session login and logout")
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
