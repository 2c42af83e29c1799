use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::errors::ApiError;

/// Declared request size, if the client sent a usable `Content-Length`
pub fn parse_content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// Reject uploads whose declared size is over the limit before reading the body.
/// Streamed bodies without a length are capped by the body limit layer instead.
pub async fn enforce_upload_limit(
    State(max_bytes): State<usize>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(declared) = parse_content_length(request.headers()) {
        if declared > max_bytes {
            tracing::warn!(declared, max_bytes, "Upload rejected: declared size over limit");
            return ApiError::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Request body too large: {declared} bytes exceeds {max_bytes}"),
            )
            .into_response();
        }
    }

    next.run(request).await
}
