use axum::{body::Bytes, extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::session::{session_token, SessionCookie};
use crate::application::dto::{LoginRequest, MessageResponse};
use crate::application::use_cases::{LoginUseCase, LogoutUseCase};

/// State shared by the session endpoints
#[derive(Clone)]
pub struct SessionState {
    pub login_use_case: Arc<LoginUseCase>,
    pub logout_use_case: Arc<LogoutUseCase>,
    pub cookie: SessionCookie,
}

/// POST /login_view
/// Verify credentials and open a cookie session
#[utoipa::path(
    post,
    path = "/login_view",
    tag = "session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened; `sessionid` cookie set", body = MessageResponse),
        (status = 400, description = "Invalid JSON or missing fields"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login_handler(
    State(state): State<SessionState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let request = LoginUseCase::parse_request(&body)?;
    let outcome = state
        .login_use_case
        .execute(request, session_token(&jar))
        .await?;

    Ok((
        jar.add(state.cookie.issue(&outcome.token)),
        Json(MessageResponse::new("Login successful")),
    ))
}

/// POST /logout_view
/// Close the session named by the `sessionid` cookie
#[utoipa::path(
    post,
    path = "/logout_view",
    tag = "session",
    responses(
        (status = 200, description = "Session closed; cookie cleared", body = MessageResponse),
        (status = 401, description = "No live session")
    )
)]
pub async fn logout_handler(
    State(state): State<SessionState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    state.logout_use_case.execute(session_token(&jar)).await?;

    Ok((
        jar.add(state.cookie.clear()),
        Json(MessageResponse::new("Logout successful")),
    ))
}
