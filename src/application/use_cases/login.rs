use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::dto::LoginRequest;
use crate::application::ports::{AuthError, Authenticator};
use crate::application::validation::present;
use crate::domain::value_objects::{Credentials, Identity, SessionToken};

pub const MISSING_CREDENTIALS: &str = "Username and password are required.";

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Invalid JSON")]
    InvalidPayload(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Result of a successful login
#[derive(Debug)]
pub struct LoginOutcome {
    pub identity: Identity,
    pub token: SessionToken,
}

fn credential_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Use case: verify credentials and open a session
pub struct LoginUseCase {
    authenticator: Arc<dyn Authenticator>,
}

impl LoginUseCase {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Parse a raw request body. Anything but a JSON object is an invalid
    /// payload. Empty field values count as missing; other non-string values
    /// are kept in their JSON form and left to credential verification.
    pub fn parse_request(body: &[u8]) -> Result<LoginRequest, LoginError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| LoginError::InvalidPayload(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(LoginError::InvalidPayload(
                "expected a JSON object".to_string(),
            ));
        };

        Ok(LoginRequest {
            username: credential_field(fields.get("username")),
            password: credential_field(fields.get("password")),
        })
    }

    /// `previous` is the session the client already holds, if any; it is
    /// replaced so a session id never survives a login.
    pub async fn execute(
        &self,
        request: LoginRequest,
        previous: Option<SessionToken>,
    ) -> Result<LoginOutcome, LoginError> {
        let (Some(username), Some(password)) = (
            present(request.username.as_deref()),
            present(request.password.as_deref()),
        ) else {
            return Err(LoginError::InvalidRequest(MISSING_CREDENTIALS.to_string()));
        };

        let credentials = Credentials::new(username, password);
        let Some(identity) = self.authenticator.verify(&credentials).await? else {
            warn!(username = %credentials.username(), "login rejected");
            return Err(LoginError::InvalidCredentials);
        };

        if let Some(previous) = previous {
            self.authenticator.teardown(&previous).await?;
        }

        let token = self.authenticator.establish(&identity).await?;
        info!(username = %identity, "login succeeded");

        Ok(LoginOutcome { identity, token })
    }
}
