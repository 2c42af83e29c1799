use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::api::errors::ApiError;
use crate::application::ports::Authenticator;
use crate::domain::value_objects::SessionToken;

pub const SESSION_COOKIE: &str = "sessionid";

/// Session cookie attributes
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub secure: bool,
    pub max_age_secs: u64,
}

impl SessionCookie {
    /// Cookie carrying a freshly issued token
    pub fn issue(&self, token: &SessionToken) -> Cookie<'static> {
        let max_age = i64::try_from(self.max_age_secs).unwrap_or(i64::MAX);
        let mut cookie = Cookie::build((SESSION_COOKIE, token.as_str().to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(max_age))
            .build();
        if self.secure {
            cookie.set_secure(true);
        }
        cookie
    }

    /// Cookie that makes the browser drop the session
    pub fn clear(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(0))
            .build()
    }
}

/// Session token carried by the request's cookies, if any
pub fn session_token(jar: &CookieJar) -> Option<SessionToken> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .map(|value| SessionToken::from_string(value.to_string()))
}

/// Reject requests that do not carry a live session
pub async fn require_session(
    State(authenticator): State<Arc<dyn Authenticator>>,
    request: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let active = match session_token(&jar) {
        Some(token) => authenticator.is_active(&token).await,
        None => false,
    };

    if !active {
        return ApiError::unauthorized("User is not authenticated").into_response();
    }

    next.run(request).await
}
