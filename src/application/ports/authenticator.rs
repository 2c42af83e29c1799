use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::domain::value_objects::{Credentials, Identity, SessionToken};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Credential backend error: {0}")]
    Backend(String),
}

/// Port for the authentication collaborator: credential checks and
/// session lifecycle (`Anonymous -> Authenticated -> Anonymous`).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Check credentials. `Ok(None)` means they were rejected.
    async fn verify(&self, credentials: &Credentials) -> Result<Option<Identity>, AuthError>;

    /// Open a session for an already verified identity
    async fn establish(&self, identity: &Identity) -> Result<SessionToken, AuthError>;

    /// Whether the token refers to a live session
    async fn is_active(&self, token: &SessionToken) -> bool;

    /// End the session. Unknown tokens are ignored.
    async fn teardown(&self, token: &SessionToken) -> Result<(), AuthError>;
}
