use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::handlers::{
    health_handler, list_files_handler, login_handler, logout_handler, upload_handler,
    SessionState,
};
use crate::api::middleware::{cors, metrics, session, size_limits};
use crate::api::openapi::openapi_handler;
use crate::application::ports::Authenticator;
use crate::application::use_cases::{
    ListFilesUseCase, LoginUseCase, LogoutUseCase, UploadFileUseCase,
};
use crate::config::Config;

/// Application state container
pub struct AppState {
    pub list_use_case: Arc<ListFilesUseCase>,
    pub upload_use_case: Arc<UploadFileUseCase>,
    pub login_use_case: Arc<LoginUseCase>,
    pub logout_use_case: Arc<LogoutUseCase>,
    pub authenticator: Arc<dyn Authenticator>,
    pub config: Config,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let session_state = SessionState {
        login_use_case: Arc::clone(&state.login_use_case),
        logout_use_case: Arc::clone(&state.logout_use_case),
        cookie: session::SessionCookie {
            secure: state.config.session_cookie_secure,
            max_age_secs: state.config.session_ttl_secs,
        },
    };

    // Upload route with its own body limits; declared oversize bodies get a JSON 413
    let upload_routes = Router::new()
        .route(
            "/upload_certificate_view",
            post(upload_handler).with_state(Arc::clone(&state.upload_use_case)),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.config.max_upload_bytes))
        .layer(axum_middleware::from_fn_with_state(
            state.config.max_upload_bytes,
            size_limits::enforce_upload_limit,
        ));

    // Storage routes; optionally gated behind a live session
    let mut file_routes = Router::new()
        .route(
            "/list_uploaded_files_view",
            post(list_files_handler).with_state(Arc::clone(&state.list_use_case)),
        )
        .merge(upload_routes);

    if state.config.require_session {
        file_routes = file_routes.route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&state.authenticator),
            session::require_session,
        ));
    }

    Router::new()
        // Health check and API document (no session required)
        .route("/health", get(health_handler))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .route("/login_view", post(login_handler).with_state(session_state.clone()))
        .route("/logout_view", post(logout_handler).with_state(session_state))
        .merge(file_routes)
        .layer(cors::create_cors_layer(&state.config.allowed_origins))
        .layer(axum_middleware::from_fn(metrics::metrics_middleware))
}
